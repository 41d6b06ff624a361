use serde::Deserialize;

use crate::address::Address;
use crate::amm::AccountRole;
use crate::amm::codec::{SwapDirection, encode_swap};
use crate::amm::schema::SWAP_KEY_LAYOUT;
use crate::error::Error;
use crate::types::{EncodedInstruction, InstructionKey};

/// Decimals assumed when a pool record does not carry its own.
pub const DEFAULT_DECIMALS: u8 = 9;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapTokenData {
    pub program_id: Option<String>,
    pub amm_id: Option<String>,
    pub amm_authority: Option<String>,
    pub amm_open_orders: Option<String>,
    pub token_vault: Option<String>,
    pub sol_vault: Option<String>,
    pub market_program_id: Option<String>,
    pub market_id: Option<String>,
    pub market_bids: Option<String>,
    pub market_asks: Option<String>,
    pub market_event_queue: Option<String>,
    pub market_base_vault: Option<String>,
    pub market_quote_vault: Option<String>,
    pub market_authority: Option<String>,
    pub decimals: Option<u8>,
}

impl SwapTokenData {
    pub const REQUIRED: [AccountRole; 13] = [
        AccountRole::AmmId,
        AccountRole::AmmAuthority,
        AccountRole::AmmOpenOrders,
        AccountRole::TokenVault,
        AccountRole::SolVault,
        AccountRole::MarketProgramId,
        AccountRole::MarketId,
        AccountRole::MarketBids,
        AccountRole::MarketAsks,
        AccountRole::MarketEventQueue,
        AccountRole::MarketBaseVault,
        AccountRole::MarketQuoteVault,
        AccountRole::MarketAuthority,
    ];

    fn field(&self, role: AccountRole) -> Option<&str> {
        let value = match role {
            AccountRole::ProgramId => &self.program_id,
            AccountRole::AmmId => &self.amm_id,
            AccountRole::AmmAuthority => &self.amm_authority,
            AccountRole::AmmOpenOrders => &self.amm_open_orders,
            AccountRole::TokenVault => &self.token_vault,
            AccountRole::SolVault => &self.sol_vault,
            AccountRole::MarketProgramId => &self.market_program_id,
            AccountRole::MarketId => &self.market_id,
            AccountRole::MarketBids => &self.market_bids,
            AccountRole::MarketAsks => &self.market_asks,
            AccountRole::MarketEventQueue => &self.market_event_queue,
            AccountRole::MarketBaseVault => &self.market_base_vault,
            AccountRole::MarketQuoteVault => &self.market_quote_vault,
            AccountRole::MarketAuthority => &self.market_authority,
            _ => return None,
        };
        value.as_deref()
    }

    fn address(&self, role: AccountRole) -> Result<Address, Error> {
        let invalid = || Error::InvalidField {
            field: role.to_string(),
        };
        let raw = self
            .field(role)
            .filter(|s| !s.is_empty())
            .ok_or_else(invalid)?;
        raw.parse().map_err(|_| invalid())
    }

    pub fn decimals_or_default(&self) -> u8 {
        self.decimals.unwrap_or(DEFAULT_DECIMALS)
    }
}

#[derive(Debug, Clone)]
pub struct SwapParams {
    pub token_data: SwapTokenData,
    pub source_account: Address,
    pub destination_account: Address,
    pub signer: Address,
    /// Amount in base units, already scaled by the mint decimals.
    pub amount: u128,
    pub direction: SwapDirection,
}

struct SwapAccounts {
    program_id: Address,
    pool: [Address; 13],
    source: Address,
    destination: Address,
    signer: Address,
}

impl SwapAccounts {
    fn validate(params: &SwapParams) -> Result<Self, Error> {
        let mut pool = [Address::default(); 13];
        for (slot, role) in pool.iter_mut().zip(SwapTokenData::REQUIRED) {
            *slot = params.token_data.address(role)?;
        }
        let program_id = params.token_data.address(AccountRole::ProgramId)?;
        Ok(Self {
            program_id,
            pool,
            source: params.source_account,
            destination: params.destination_account,
            signer: params.signer,
        })
    }

    fn get(&self, role: AccountRole) -> Address {
        match role {
            AccountRole::UserSource => self.source,
            AccountRole::UserDestination => self.destination,
            AccountRole::Signer => self.signer,
            AccountRole::ProgramId => self.program_id,
            _ => SwapTokenData::REQUIRED
                .iter()
                .position(|r| *r == role)
                .map_or_else(Address::default, |i| self.pool[i]),
        }
    }
}

pub fn build_swap_instruction(params: &SwapParams) -> Result<EncodedInstruction, Error> {
    let accounts = SwapAccounts::validate(params)?;
    let data = encode_swap(params.direction, params.amount)?;

    let keys = SWAP_KEY_LAYOUT
        .iter()
        .map(|spec| InstructionKey {
            pubkey: accounts.get(spec.role),
            is_signer: spec.is_signer,
            is_writable: spec.is_writable,
        })
        .collect();

    Ok(EncodedInstruction {
        program_id: accounts.program_id,
        keys,
        data: data.to_vec(),
    })
}

/// Converts a UI amount into base units: `floor(ui_amount * 10^decimals)`.
pub fn scale_ui_amount(ui_amount: f64, decimals: u8) -> Result<u128, Error> {
    if !ui_amount.is_finite() || ui_amount < 0.0 {
        return Err(Error::InvalidAmount {
            reason: format!("amount must be a non-negative finite number, got {ui_amount}"),
        });
    }
    let scaled = (ui_amount * 10_f64.powi(i32::from(decimals))).floor();
    if scaled > u64::MAX as f64 {
        return Err(Error::AmountOverflow {
            amount: scaled as u128,
        });
    }
    Ok(scaled as u128)
}
