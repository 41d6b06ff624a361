use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::decimal_str;

/// Minimum body length of a pool-create instruction.
pub const POOL_CREATE_PAYLOAD_LEN: usize = 26;
/// Exact body length of an encoded swap instruction.
pub const SWAP_PAYLOAD_LEN: usize = 9;
/// AMM v4 `initialize2` opcode, checked only in strict mode.
pub const POOL_CREATE_OPCODE: u8 = 1;

const SWAP_BASE_IN_OPCODE: u8 = 9;
const SWAP_BASE_OUT_OPCODE: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCreateParams {
    pub discriminator: u8,
    pub nonce: u8,
    #[serde(with = "decimal_str")]
    pub open_time: u64,
    #[serde(with = "decimal_str")]
    pub init_pc_amount: u64,
    #[serde(with = "decimal_str")]
    pub init_coin_amount: u64,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SwapDirection {
    BaseIn,
    BaseOut,
}

impl SwapDirection {
    pub fn opcode(self) -> u8 {
        match self {
            Self::BaseIn => SWAP_BASE_IN_OPCODE,
            Self::BaseOut => SWAP_BASE_OUT_OPCODE,
        }
    }
}

fn read_u64_le(data: &[u8], offset: usize) -> Option<u64> {
    let bytes: [u8; 8] = data.get(offset..offset + 8)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}

/// Decodes a pool-create instruction body.
pub fn decode_pool_create(data: &[u8]) -> Result<PoolCreateParams, Error> {
    let truncated = || Error::TruncatedPayload {
        expected: POOL_CREATE_PAYLOAD_LEN,
        actual: data.len(),
    };
    if data.len() < POOL_CREATE_PAYLOAD_LEN {
        return Err(truncated());
    }

    Ok(PoolCreateParams {
        discriminator: data[0],
        nonce: data[1],
        open_time: read_u64_le(data, 2).ok_or_else(truncated)?,
        init_pc_amount: read_u64_le(data, 10).ok_or_else(truncated)?,
        init_coin_amount: read_u64_le(data, 18).ok_or_else(truncated)?,
    })
}

pub fn encode_pool_create(params: &PoolCreateParams) -> Vec<u8> {
    let mut data = Vec::with_capacity(POOL_CREATE_PAYLOAD_LEN);
    data.push(params.discriminator);
    data.push(params.nonce);
    data.extend_from_slice(&params.open_time.to_le_bytes());
    data.extend_from_slice(&params.init_pc_amount.to_le_bytes());
    data.extend_from_slice(&params.init_coin_amount.to_le_bytes());
    data
}

pub fn check_pool_create_opcode(params: &PoolCreateParams) -> Result<(), Error> {
    if params.discriminator == POOL_CREATE_OPCODE {
        Ok(())
    } else {
        Err(Error::UnexpectedOpcode {
            opcode: params.discriminator,
        })
    }
}

pub fn encode_swap(
    direction: SwapDirection,
    amount: u128,
) -> Result<[u8; SWAP_PAYLOAD_LEN], Error> {
    let amount = u64::try_from(amount).map_err(|_| Error::AmountOverflow { amount })?;
    let mut data = [0_u8; SWAP_PAYLOAD_LEN];
    data[0] = direction.opcode();
    data[1..].copy_from_slice(&amount.to_le_bytes());
    Ok(data)
}
