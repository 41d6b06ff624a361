//! Positional account layouts for the two AMM instruction shapes.

use crate::address::Address;
use crate::amm::AccountRole;
use crate::error::Error;

pub const POOL_CREATE_ROLES: [(usize, AccountRole); 16] = [
    (0, AccountRole::ProgramId),
    (4, AccountRole::AmmId),
    (5, AccountRole::AmmAuthority),
    (6, AccountRole::AmmOpenOrders),
    (7, AccountRole::LpMint),
    (8, AccountRole::TokenAddress),
    (9, AccountRole::SolAddress),
    (10, AccountRole::TokenVault),
    (11, AccountRole::SolVault),
    (13, AccountRole::AmmTargetOrders),
    (15, AccountRole::MarketProgramId),
    (16, AccountRole::MarketId),
    (17, AccountRole::Deployer),
    (18, AccountRole::MarketBaseVault),
    (19, AccountRole::MarketQuoteVault),
    (20, AccountRole::MarketAuthority),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapKeySpec {
    pub role: AccountRole,
    pub is_signer: bool,
    pub is_writable: bool,
}

const fn writable(role: AccountRole) -> SwapKeySpec {
    SwapKeySpec {
        role,
        is_signer: false,
        is_writable: true,
    }
}

const fn readonly(role: AccountRole) -> SwapKeySpec {
    SwapKeySpec {
        role,
        is_signer: false,
        is_writable: false,
    }
}

pub const SWAP_KEY_LAYOUT: [SwapKeySpec; 16] = [
    writable(AccountRole::AmmId),
    readonly(AccountRole::AmmAuthority),
    writable(AccountRole::AmmOpenOrders),
    writable(AccountRole::TokenVault),
    writable(AccountRole::SolVault),
    readonly(AccountRole::MarketProgramId),
    writable(AccountRole::MarketId),
    writable(AccountRole::MarketBids),
    writable(AccountRole::MarketAsks),
    writable(AccountRole::MarketEventQueue),
    writable(AccountRole::MarketBaseVault),
    writable(AccountRole::MarketQuoteVault),
    readonly(AccountRole::MarketAuthority),
    writable(AccountRole::UserSource),
    writable(AccountRole::UserDestination),
    SwapKeySpec {
        role: AccountRole::Signer,
        is_signer: true,
        is_writable: false,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolCreateAccounts {
    pub program_id: Address,
    pub amm_id: Address,
    pub amm_authority: Address,
    pub amm_open_orders: Address,
    pub lp_mint: Address,
    pub token_address: Address,
    pub sol_address: Address,
    pub token_vault: Address,
    pub sol_vault: Address,
    pub amm_target_orders: Address,
    pub market_program_id: Address,
    pub market_id: Address,
    pub deployer: Address,
    pub market_base_vault: Address,
    pub market_quote_vault: Address,
    pub market_authority: Address,
}

pub fn resolve_pool_create_accounts(
    account_refs: &[u8],
    accounts: &[Address],
) -> Result<PoolCreateAccounts, Error> {
    let mut resolved = [Address::default(); POOL_CREATE_ROLES.len()];
    for (slot, &(position, role)) in resolved.iter_mut().zip(POOL_CREATE_ROLES.iter()) {
        let index = account_refs
            .get(position)
            .map(|&i| usize::from(i))
            .ok_or(Error::MissingRole { role, position })?;
        *slot = *accounts
            .get(index)
            .ok_or(Error::UnresolvedAccount { role, index })?;
    }

    let [
        program_id,
        amm_id,
        amm_authority,
        amm_open_orders,
        lp_mint,
        token_address,
        sol_address,
        token_vault,
        sol_vault,
        amm_target_orders,
        market_program_id,
        market_id,
        deployer,
        market_base_vault,
        market_quote_vault,
        market_authority,
    ] = resolved;

    Ok(PoolCreateAccounts {
        program_id,
        amm_id,
        amm_authority,
        amm_open_orders,
        lp_mint,
        token_address,
        sol_address,
        token_vault,
        sol_vault,
        amm_target_orders,
        market_program_id,
        market_id,
        deployer,
        market_base_vault,
        market_quote_vault,
        market_authority,
    })
}
