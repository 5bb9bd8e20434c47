pub mod instructions;
pub mod transaction;

pub use instructions::{build_create_and_mint, AssembledMint};
pub use transaction::{build_partially_signed, PartiallySignedTransaction};
