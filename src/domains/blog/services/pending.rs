// =====================================================
// 진행 중 액션 추적
// In-flight action tracking
// =====================================================
// 액션 종류별로 하나만 실행 가능하다. 같은 종류가 이미 실행 중이면
// ActionInProgress로 거절한다.
//
// 세션 세대(generation)가 바뀌면 (재연결) 이전 세대의 액션은
// 새 액션을 막지 않는다.
//
// ActionGuard가 drop될 때 항목이 제거된다 (성공/실패/패닉 모두).
// =====================================================

use std::collections::BTreeMap;
use parking_lot::Mutex;
use crate::domains::blog::models::ActionKind;
use crate::shared::errors::BlogError;

#[derive(Default)]
pub struct PendingActions {
    /// 액션 종류 → 시작한 세션 세대
    inner: Mutex<BTreeMap<ActionKind, u64>>,
}

impl PendingActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 액션 시작 (같은 세대에 같은 종류가 진행 중이면 거절)
    /// Start an action of `kind` for session `generation`
    pub fn begin(&self, kind: ActionKind, generation: u64) -> Result<ActionGuard<'_>, BlogError> {
        let mut inner = self.inner.lock();
        if inner.get(&kind) == Some(&generation) {
            return Err(BlogError::ActionInProgress(kind));
        }
        inner.insert(kind, generation);

        Ok(ActionGuard {
            pending: self,
            kind,
            generation,
        })
    }

    /// 주어진 세대에서 진행 중인 액션 목록
    pub fn active(&self, generation: u64) -> Vec<ActionKind> {
        self.inner
            .lock()
            .iter()
            .filter(|(_, g)| **g == generation)
            .map(|(kind, _)| *kind)
            .collect()
    }
}

/// 액션 종료 시 pending 항목 제거 (finally 역할)
pub struct ActionGuard<'a> {
    pending: &'a PendingActions,
    kind: ActionKind,
    generation: u64,
}

impl Drop for ActionGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.pending.inner.lock();
        // 새 세대가 같은 종류를 이미 시작했다면 그 항목은 건드리지 않음
        if inner.get(&self.kind) == Some(&self.generation) {
            inner.remove(&self.kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_kind_is_rejected() {
        let pending = PendingActions::new();
        let guard = pending.begin(ActionKind::CreatePost, 1).unwrap();

        assert_eq!(
            pending.begin(ActionKind::CreatePost, 1).err(),
            Some(BlogError::ActionInProgress(ActionKind::CreatePost))
        );
        // 다른 종류는 허용
        let _register = pending.begin(ActionKind::Register, 1).unwrap();
        assert_eq!(pending.active(1), vec![ActionKind::Register, ActionKind::CreatePost]);

        drop(guard);
        assert!(!pending.active(1).contains(&ActionKind::CreatePost));
        assert!(pending.begin(ActionKind::CreatePost, 1).is_ok());
    }

    #[test]
    fn test_new_generation_supersedes() {
        let pending = PendingActions::new();
        let old = pending.begin(ActionKind::Initialize, 1).unwrap();
        let new = pending.begin(ActionKind::Initialize, 2).unwrap();

        // 이전 세대 guard가 끝나도 새 세대 항목은 유지
        drop(old);
        assert_eq!(pending.active(2), vec![ActionKind::Initialize]);
        assert!(pending.active(1).is_empty());

        drop(new);
        assert!(pending.active(2).is_empty());
    }
}
