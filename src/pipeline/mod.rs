pub mod enrichment;
pub mod locator;
pub mod scanner;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amm::codec::{PoolCreateParams, check_pool_create_opcode, decode_pool_create};
use crate::amm::schema::{PoolCreateAccounts, resolve_pool_create_accounts};
use crate::amm::{ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::config::ScannerConfig;
use crate::error::Error;
use crate::pipeline::locator::LocatedInstruction;
use crate::types::decimal_str;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr)]
pub enum EventWarning {
    DegenerateAmounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LpEvent {
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
    pub deployer: Address,
    pub market_program_id: Address,
    pub market_id: Address,
    pub market_base_vault: Address,
    pub market_quote_vault: Address,
    pub market_authority: Address,
    pub system_program_id: Address,
    pub token_program_id: Address,
    pub associated_token_program_id: Address,
    #[serde(with = "decimal_str")]
    pub init_pc_amount: u64,
    #[serde(with = "decimal_str")]
    pub init_coin_amount: u64,
    #[serde(rename = "K", with = "decimal_str")]
    pub k: u128,
    #[serde(rename = "V", with = "decimal_str")]
    pub v: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_asks: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_bids: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_event_queue: Option<Address>,
    #[serde(skip)]
    pub warnings: Vec<EventWarning>,
}

impl LpEvent {
    fn from_parts(accounts: PoolCreateAccounts, params: &PoolCreateParams) -> Self {
        let mut warnings = Vec::new();
        let v = match pool_ratio(params.init_pc_amount, params.init_coin_amount) {
            PoolRatio::Ratio(v) => v,
            PoolRatio::Degenerate => {
                warnings.push(EventWarning::DegenerateAmounts);
                0.0
            }
        };

        Self {
            program_id: accounts.program_id,
            amm_id: accounts.amm_id,
            amm_authority: accounts.amm_authority,
            amm_open_orders: accounts.amm_open_orders,
            lp_mint: accounts.lp_mint,
            token_address: accounts.token_address,
            sol_address: accounts.sol_address,
            token_vault: accounts.token_vault,
            sol_vault: accounts.sol_vault,
            amm_target_orders: accounts.amm_target_orders,
            deployer: accounts.deployer,
            market_program_id: accounts.market_program_id,
            market_id: accounts.market_id,
            market_base_vault: accounts.market_base_vault,
            market_quote_vault: accounts.market_quote_vault,
            market_authority: accounts.market_authority,
            system_program_id: SYSTEM_PROGRAM_ID,
            token_program_id: TOKEN_PROGRAM_ID,
            associated_token_program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
            init_pc_amount: params.init_pc_amount,
            init_coin_amount: params.init_coin_amount,
            k: liquidity_product(params.init_pc_amount, params.init_coin_amount),
            v,
            market_asks: None,
            market_bids: None,
            market_event_queue: None,
            warnings,
        }
    }

    pub fn has_warning(&self, warning: EventWarning) -> bool {
        self.warnings.contains(&warning)
    }
}

/// `K = pc * coin`, exact for every pair of u64 inputs.
pub fn liquidity_product(init_pc_amount: u64, init_coin_amount: u64) -> u128 {
    u128::from(init_pc_amount) * u128::from(init_coin_amount)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoolRatio {
    Ratio(f64),
    Degenerate,
}

/// `V = min(pc, coin) / max(pc, coin)`.
pub fn pool_ratio(init_pc_amount: u64, init_coin_amount: u64) -> PoolRatio {
    if init_pc_amount == 0 || init_coin_amount == 0 {
        return PoolRatio::Degenerate;
    }
    let lo = init_pc_amount.min(init_coin_amount) as f64;
    let hi = init_pc_amount.max(init_coin_amount) as f64;
    PoolRatio::Ratio(lo / hi)
}

pub fn invert_coin_and_pc_mint(event: &mut LpEvent, wrapped_mint: &Address) -> bool {
    if event.token_address != *wrapped_mint {
        return false;
    }
    std::mem::swap(&mut event.token_address, &mut event.sol_address);
    std::mem::swap(&mut event.token_vault, &mut event.sol_vault);
    true
}

pub struct LpEventAssembler<'a> {
    config: &'a ScannerConfig,
}

impl<'a> LpEventAssembler<'a> {
    pub fn new(config: &'a ScannerConfig) -> Self {
        Self { config }
    }

    pub fn assemble(
        &self,
        located: &LocatedInstruction<'_>,
        account_keys: &[Address],
    ) -> Result<LpEvent, Error> {
        let accounts = resolve_pool_create_accounts(located.account_refs, account_keys)?;
        let params = decode_pool_create(located.data)?;
        if self.config.strict_opcode {
            check_pool_create_opcode(&params)?;
        }

        let mut event = LpEvent::from_parts(accounts, &params);
        if event.has_warning(EventWarning::DegenerateAmounts) {
            tracing::warn!(
                lp_mint = %event.lp_mint,
                init_pc_amount = params.init_pc_amount,
                init_coin_amount = params.init_coin_amount,
                "degenerate pool amounts, recording V = 0"
            );
        }
        if invert_coin_and_pc_mint(&mut event, &self.config.wrapped_native_mint) {
            tracing::debug!(lp_mint = %event.lp_mint, "inverted coin and pc mint");
        }
        Ok(event)
    }
}
