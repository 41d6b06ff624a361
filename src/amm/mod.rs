pub mod codec;
pub mod schema;
pub mod swap;

use crate::address::Address;

/// Raydium AMM v4 (`675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8`).
pub const RAYDIUM_AMM_V4_PROGRAM_ID: Address = Address::new([
    75, 217, 73, 196, 54, 2, 195, 63, 32, 119, 144, 237, 22, 163, 82, 76, 161, 185, 151, 92, 241,
    33, 162, 169, 12, 255, 236, 125, 248, 182, 138, 205,
]);

/// Wrapped SOL mint (`So11111111111111111111111111111111111111112`).
pub const WRAPPED_SOL_MINT: Address = Address::new([
    6, 155, 136, 87, 254, 171, 129, 132, 251, 104, 127, 99, 70, 24, 192, 53, 218, 196, 57, 220, 26,
    235, 59, 85, 152, 160, 240, 0, 0, 0, 0, 1,
]);

pub const SYSTEM_PROGRAM_ID: Address = Address::new([0; 32]);

/// SPL Token (`TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`).
pub const TOKEN_PROGRAM_ID: Address = Address::new([
    6, 221, 246, 225, 215, 101, 161, 147, 217, 203, 225, 70, 206, 235, 121, 172, 28, 180, 133, 237,
    95, 91, 55, 145, 58, 140, 245, 133, 126, 255, 0, 169,
]);

/// SPL Associated Token Account (`ATokenGPv1sfdS5qUnx9GbS6hX1TTjR1L6rT3HaZJFA`).
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Address = Address::new([
    2, 108, 137, 121, 164, 168, 90, 83, 153, 0, 22, 126, 152, 234, 118, 6, 193, 119, 88, 31, 136,
    37, 69, 92, 214, 27, 238, 154, 1, 69, 13, 41,
]);

/// Named account roles shared by the pool-create and swap layouts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum AccountRole {
    ProgramId,
    AmmId,
    AmmAuthority,
    AmmOpenOrders,
    LpMint,
    TokenAddress,
    SolAddress,
    TokenVault,
    SolVault,
    AmmTargetOrders,
    Deployer,
    MarketProgramId,
    MarketId,
    MarketBaseVault,
    MarketQuoteVault,
    MarketAuthority,
    MarketBids,
    MarketAsks,
    MarketEventQueue,
    UserSource,
    UserDestination,
    Signer,
}
