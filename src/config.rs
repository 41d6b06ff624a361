use serde::Deserialize;

use crate::address::Address;
use crate::amm::{RAYDIUM_AMM_V4_PROGRAM_ID, WRAPPED_SOL_MINT};
use crate::pipeline::enrichment::pool_keys_url;

pub const DEFAULT_POOL_KEYS_API_URL: &str = "https://api.raydium.io/ammV3/amm/pool/keys";

/// Scanner settings. Every field has a mainnet default, so an empty object
/// deserializes to a working config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerConfig {
    /// Program whose pool-create instructions are decoded.
    pub amm_program_id: Address,
    /// Mint that is normalized onto the `solAddress` side of a pool.
    pub wrapped_native_mint: Address,
    pub pool_keys_api_url: String,
    /// Reject pool-create payloads whose discriminator is not `initialize2`.
    pub strict_opcode: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            amm_program_id: RAYDIUM_AMM_V4_PROGRAM_ID,
            wrapped_native_mint: WRAPPED_SOL_MINT,
            pool_keys_api_url: DEFAULT_POOL_KEYS_API_URL.to_string(),
            strict_opcode: false,
        }
    }
}

impl ScannerConfig {
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pool-keys request for `lp_mint` against the configured endpoint.
    pub fn pool_keys_request_url(&self, lp_mint: &Address) -> String {
        pool_keys_url(&self.pool_keys_api_url, lp_mint)
    }
}
