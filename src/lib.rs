#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod address;
pub mod amm;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use address::Address;
pub use amm::AccountRole;
pub use amm::codec::{
    PoolCreateParams, SwapDirection, decode_pool_create, encode_pool_create, encode_swap,
};
pub use amm::schema::{PoolCreateAccounts, resolve_pool_create_accounts};
pub use amm::swap::{SwapParams, SwapTokenData, build_swap_instruction, scale_ui_amount};
pub use config::ScannerConfig;
pub use error::Error;
pub use pipeline::enrichment::{
    AbsentReason, Enrichment, LookupError, LpEventSink, MarketAccounts, MarketMetadataSource,
    NoMarketMetadata, SinkError, enrich_lp_event, parse_pool_keys_response, pool_keys_url,
};
pub use pipeline::locator::{LocatedInstruction, locate_instruction};
pub use pipeline::scanner::{
    BatchSummary, PipelineContext, ProcessedLpEvent, process_batch, process_ledger_transaction,
    process_transaction,
};
pub use pipeline::{
    EventWarning, LpEvent, LpEventAssembler, PoolRatio, invert_coin_and_pc_mint, liquidity_product,
    pool_ratio,
};
pub use types::{
    EncodedInstruction, InstructionKey, LedgerTransaction, RawInstruction, WireTransaction,
};
