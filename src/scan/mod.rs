pub mod owner;
pub mod resolve;

pub use owner::list_nft_candidates;
pub use resolve::{resolve, Resolution, SkipReason};
