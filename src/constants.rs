/// Fixed symbol embedded in every minted token's metadata. The scanner uses
/// it to tell Aftershow collectibles apart from unrelated tokens in a wallet.
pub const ASSET_SYMBOL: &str = "AFTER";

/// Prefix applied to the on-chain display name of every collectible.
pub const NAME_PREFIX: &str = "Aftershow: ";

/// Value of the fixed `Type` attribute in every metadata document.
pub const COLLECTIBLE_TYPE: &str = "Aftershow Collectible";

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;

pub const NFT_DECIMALS: u8 = 0;
pub const NFT_SUPPLY: u64 = 1;

/// ed25519 secret key as stored in configuration: seed followed by the
/// public key, 64 bytes total.
pub const SECRET_KEY_LENGTH: usize = 64;

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Scheme prefix of a self-contained metadata document.
pub const EMBEDDED_JSON_PREFIX: &str = "data:application/json;base64,";
