// Domains
pub mod blog;
