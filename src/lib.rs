// Solana blog session store + post detail loader
pub mod domains;
pub mod routes;
pub mod shared;
