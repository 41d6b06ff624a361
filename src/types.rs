use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::Error;

/// A fetched ledger transaction as delivered by the RPC layer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTransaction {
    /// Transaction signatures (base58); the first one identifies the transaction.
    #[serde(default)]
    pub signatures: Vec<String>,
    pub message: WireMessage,
}

impl WireTransaction {
    pub fn signature(&self) -> Option<&str> {
        self.signatures.first().map(String::as_str)
    }
}

/// Transaction message in either the legacy or the versioned field naming.
///
/// Versioned messages carry `staticAccountKeys` / `compiledInstructions`;
/// legacy messages carry `accountKeys` / `instructions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMessage {
    pub static_account_keys: Option<Vec<Address>>,
    pub account_keys: Option<Vec<Address>>,
    pub compiled_instructions: Option<Vec<WireInstruction>>,
    pub instructions: Option<Vec<WireInstruction>>,
}

/// One compiled instruction; account indices arrive as `accounts` (legacy)
/// or `accountKeyIndexes` (versioned).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireInstruction {
    pub program_id_index: u8,
    pub accounts: Option<Vec<u8>>,
    pub account_key_indexes: Option<Vec<u8>>,
    pub data: WireData,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireData {
    Base64(String),
    Bytes(Vec<u8>),
}

impl WireData {
    pub fn into_bytes(self) -> Result<Vec<u8>, Error> {
        match self {
            Self::Base64(s) => Ok(BASE64.decode(s)?),
            Self::Bytes(b) => Ok(b),
        }
    }
}

/// Canonical instruction: program and accounts as indices into
/// [`LedgerTransaction::account_keys`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInstruction {
    pub program_index: u8,
    /// `None` when the wire instruction carried neither index field.
    pub account_refs: Option<Vec<u8>>,
    pub data: Vec<u8>,
}

/// Canonical transaction shape consumed by the instruction locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTransaction {
    pub signature: Option<String>,
    pub account_keys: Vec<Address>,
    pub instructions: Vec<RawInstruction>,
}

impl LedgerTransaction {
    pub fn program_of(&self, ix: &RawInstruction) -> Option<&Address> {
        self.account_keys.get(usize::from(ix.program_index))
    }
}

impl TryFrom<WireTransaction> for LedgerTransaction {
    type Error = Error;

    /// Folds the legacy/versioned naming variants into one shape.
    fn try_from(wire: WireTransaction) -> Result<Self, Self::Error> {
        let signature = wire.signature().map(str::to_string);
        let WireMessage {
            static_account_keys,
            account_keys,
            compiled_instructions,
            instructions,
        } = wire.message;

        let account_keys = static_account_keys
            .or(account_keys)
            .ok_or_else(|| Error::Parse {
                reason: "transaction message has no account keys".into(),
            })?;

        let instructions = compiled_instructions
            .or(instructions)
            .unwrap_or_default()
            .into_iter()
            .map(|ix| -> Result<RawInstruction, Error> {
                Ok(RawInstruction {
                    program_index: ix.program_id_index,
                    account_refs: ix.accounts.or(ix.account_key_indexes),
                    data: ix.data.into_bytes()?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            signature,
            account_keys,
            instructions,
        })
    }
}

/// One account entry of an [`EncodedInstruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionKey {
    pub pubkey: Address,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// A ready-to-submit instruction; wrapping it in a transaction is the
/// submitter's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedInstruction {
    pub program_id: Address,
    pub keys: Vec<InstructionKey>,
    pub data: Vec<u8>,
}

/// Serde adapter rendering numbers as decimal strings, so u64/u128 values
/// survive JSON consumers that parse numbers as doubles.
pub(crate) mod decimal_str {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T: Display, S: Serializer>(
        value: &T,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
