//! Collaborator seams: market metadata lookup and record persistence.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::pipeline::LpEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAccounts {
    pub market_asks: Address,
    pub market_bids: Address,
    pub market_event_queue: Address,
}

#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    #[error("metadata transport error: {reason}")]
    Transport { reason: String },

    #[error("malformed metadata response: {reason}")]
    Malformed { reason: String },
}

/// Market metadata keyed by LP mint. `Ok(None)` means the pool is unknown.
pub trait MarketMetadataSource: Sync {
    fn fetch_market_accounts(
        &self,
        lp_mint: &Address,
    ) -> Result<Option<MarketAccounts>, LookupError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarketMetadata;

impl MarketMetadataSource for NoMarketMetadata {
    fn fetch_market_accounts(
        &self,
        _lp_mint: &Address,
    ) -> Result<Option<MarketAccounts>, LookupError> {
        Ok(None)
    }
}

#[derive(thiserror::Error, Debug)]
#[error("persistence failed: {reason}")]
pub struct SinkError {
    pub reason: String,
}

pub trait LpEventSink: Sync {
    fn persist(&self, event: &LpEvent) -> Result<(), SinkError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
    NotFound,
    LookupFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    Applied(MarketAccounts),
    Absent(AbsentReason),
}

impl Enrichment {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

pub fn enrich_lp_event(event: &mut LpEvent, source: &dyn MarketMetadataSource) -> Enrichment {
    match source.fetch_market_accounts(&event.lp_mint) {
        Ok(Some(market)) => {
            event.market_asks = Some(market.market_asks);
            event.market_bids = Some(market.market_bids);
            event.market_event_queue = Some(market.market_event_queue);
            tracing::debug!(lp_mint = %event.lp_mint, "merged market accounts");
            Enrichment::Applied(market)
        }
        Ok(None) => {
            tracing::info!(lp_mint = %event.lp_mint, "no market accounts found");
            Enrichment::Absent(AbsentReason::NotFound)
        }
        Err(err) => {
            tracing::warn!(lp_mint = %event.lp_mint, error = %err, "market lookup failed");
            Enrichment::Absent(AbsentReason::LookupFailed(err.to_string()))
        }
    }
}

pub fn pool_keys_url(base_url: &str, lp_mint: &Address) -> String {
    format!("{base_url}?ids={lp_mint}")
}

/// Reads the market accounts from `data[0]` of a pool-keys response body.
pub fn parse_pool_keys_response(
    body: &serde_json::Value,
) -> Result<Option<MarketAccounts>, LookupError> {
    let Some(data) = body.get("data").and_then(|v| v.as_array()) else {
        return Err(LookupError::Malformed {
            reason: "response has no data array".into(),
        });
    };

    let Some(first) = data.first() else {
        return Ok(None);
    };

    serde_json::from_value::<MarketAccounts>(first.clone())
        .map(Some)
        .map_err(|e| LookupError::Malformed {
            reason: e.to_string(),
        })
}
