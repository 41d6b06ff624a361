use crate::config::ScannerConfig;
use crate::error::Error;
use crate::pipeline::enrichment::{Enrichment, LpEventSink, MarketMetadataSource, enrich_lp_event};
use crate::pipeline::locator::locate_instruction;
use crate::pipeline::{LpEvent, LpEventAssembler};
use crate::types::{LedgerTransaction, WireTransaction};

#[derive(Clone, Copy)]
pub struct PipelineContext<'a> {
    pub config: &'a ScannerConfig,
    pub metadata: &'a dyn MarketMetadataSource,
    pub sink: &'a dyn LpEventSink,
}

#[derive(Debug)]
pub struct ProcessedLpEvent {
    pub event: LpEvent,
    pub enrichment: Enrichment,
    pub persisted: bool,
}

/// `Ok(None)` means no pool-create instruction was found.
pub fn process_transaction(
    ctx: PipelineContext<'_>,
    wire: WireTransaction,
) -> Result<Option<ProcessedLpEvent>, Error> {
    let tx = LedgerTransaction::try_from(wire)?;
    process_ledger_transaction(ctx, &tx)
}

pub fn process_ledger_transaction(
    ctx: PipelineContext<'_>,
    tx: &LedgerTransaction,
) -> Result<Option<ProcessedLpEvent>, Error> {
    let Some(located) = locate_instruction(tx, &ctx.config.amm_program_id) else {
        return Ok(None);
    };

    let mut event = LpEventAssembler::new(ctx.config).assemble(&located, &tx.account_keys)?;
    let enrichment = enrich_lp_event(&mut event, ctx.metadata);

    let signature = tx.signature.as_deref().unwrap_or_default();
    let persisted = match ctx.sink.persist(&event) {
        Ok(()) => {
            tracing::info!(signature, amm_id = %event.amm_id, "saved pool record");
            true
        }
        Err(err) => {
            tracing::error!(
                signature,
                amm_id = %event.amm_id,
                error = %err,
                "failed to save pool record"
            );
            false
        }
    };

    Ok(Some(ProcessedLpEvent {
        event,
        enrichment,
        persisted,
    }))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub irrelevant: usize,
    pub failed: usize,
}

pub fn process_batch<I>(ctx: PipelineContext<'_>, transactions: I) -> BatchSummary
where
    I: IntoIterator<Item = WireTransaction>,
{
    let mut summary = BatchSummary::default();
    for wire in transactions {
        let signature = wire.signature().unwrap_or_default().to_string();
        match process_transaction(ctx, wire) {
            Ok(Some(_)) => summary.processed += 1,
            Ok(None) => summary.irrelevant += 1,
            Err(err) => {
                tracing::warn!(signature = %signature, error = %err, "skipping transaction");
                summary.failed += 1;
            }
        }
    }
    summary
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::address::Address;
    use crate::amm::RAYDIUM_AMM_V4_PROGRAM_ID;
    use crate::amm::codec::{PoolCreateParams, encode_pool_create};
    use crate::pipeline::enrichment::{
        AbsentReason, LookupError, MarketAccounts, NoMarketMetadata, SinkError,
    };
    use crate::types::RawInstruction;

    #[derive(Default)]
    struct RecordingSink {
        saved: Mutex<Vec<LpEvent>>,
    }

    impl LpEventSink for RecordingSink {
        fn persist(&self, event: &LpEvent) -> Result<(), SinkError> {
            self.saved.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl LpEventSink for FailingSink {
        fn persist(&self, _event: &LpEvent) -> Result<(), SinkError> {
            Err(SinkError {
                reason: "db offline".into(),
            })
        }
    }

    struct FixedMarket(MarketAccounts);

    impl MarketMetadataSource for FixedMarket {
        fn fetch_market_accounts(
            &self,
            _lp_mint: &Address,
        ) -> Result<Option<MarketAccounts>, LookupError> {
            Ok(Some(self.0))
        }
    }

    struct BrokenLookup;

    impl MarketMetadataSource for BrokenLookup {
        fn fetch_market_accounts(
            &self,
            _lp_mint: &Address,
        ) -> Result<Option<MarketAccounts>, LookupError> {
            Err(LookupError::Transport {
                reason: "timeout".into(),
            })
        }
    }

    fn addr(seed: u8) -> Address {
        Address::new([seed; 32])
    }

    fn pool_tx(instructions: Vec<RawInstruction>) -> LedgerTransaction {
        let mut account_keys: Vec<Address> = (0..21).map(addr).collect();
        account_keys.push(RAYDIUM_AMM_V4_PROGRAM_ID);
        LedgerTransaction {
            signature: Some("sig".into()),
            account_keys,
            instructions,
        }
    }

    fn pool_ix(pc: u64, coin: u64) -> RawInstruction {
        RawInstruction {
            program_index: 21,
            account_refs: Some((0..21).collect()),
            data: encode_pool_create(&PoolCreateParams {
                discriminator: 1,
                nonce: 255,
                open_time: 0,
                init_pc_amount: pc,
                init_coin_amount: coin,
            }),
        }
    }

    #[test]
    fn persists_exactly_one_record_for_first_match() {
        let config = ScannerConfig::default();
        let sink = RecordingSink::default();
        let ctx = PipelineContext {
            config: &config,
            metadata: &NoMarketMetadata,
            sink: &sink,
        };

        let tx = pool_tx(vec![pool_ix(100, 200), pool_ix(5, 5)]);
        let processed = process_ledger_transaction(ctx, &tx).unwrap().unwrap();

        assert_eq!(processed.event.init_pc_amount, 100);
        assert!(processed.persisted);
        assert_eq!(
            processed.enrichment,
            Enrichment::Absent(AbsentReason::NotFound)
        );
        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].init_pc_amount, 100);
    }

    #[test]
    fn irrelevant_transaction_is_none() {
        let config = ScannerConfig::default();
        let sink = RecordingSink::default();
        let ctx = PipelineContext {
            config: &config,
            metadata: &NoMarketMetadata,
            sink: &sink,
        };
        let tx = pool_tx(vec![]);
        assert!(process_ledger_transaction(ctx, &tx).unwrap().is_none());
        assert!(sink.saved.lock().unwrap().is_empty());
    }

    #[test]
    fn market_accounts_are_merged_before_persisting() {
        let config = ScannerConfig::default();
        let sink = RecordingSink::default();
        let market = MarketAccounts {
            market_asks: addr(30),
            market_bids: addr(31),
            market_event_queue: addr(32),
        };
        let lookup = FixedMarket(market);
        let ctx = PipelineContext {
            config: &config,
            metadata: &lookup,
            sink: &sink,
        };

        let processed = process_ledger_transaction(ctx, &pool_tx(vec![pool_ix(1, 2)]))
            .unwrap()
            .unwrap();
        assert!(processed.enrichment.is_applied());
        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved[0].market_asks, Some(addr(30)));
        assert_eq!(saved[0].market_bids, Some(addr(31)));
        assert_eq!(saved[0].market_event_queue, Some(addr(32)));
    }

    #[test]
    fn lookup_failure_does_not_abort() {
        let config = ScannerConfig::default();
        let sink = RecordingSink::default();
        let ctx = PipelineContext {
            config: &config,
            metadata: &BrokenLookup,
            sink: &sink,
        };

        let processed = process_ledger_transaction(ctx, &pool_tx(vec![pool_ix(1, 2)]))
            .unwrap()
            .unwrap();
        assert!(matches!(
            processed.enrichment,
            Enrichment::Absent(AbsentReason::LookupFailed(_))
        ));
        assert_eq!(processed.event.market_asks, None);
        assert_eq!(sink.saved.lock().unwrap().len(), 1);
    }

    #[test]
    fn sink_failure_is_reported_not_raised() {
        let config = ScannerConfig::default();
        let ctx = PipelineContext {
            config: &config,
            metadata: &NoMarketMetadata,
            sink: &FailingSink,
        };
        let processed = process_ledger_transaction(ctx, &pool_tx(vec![pool_ix(1, 2)]))
            .unwrap()
            .unwrap();
        assert!(!processed.persisted);
    }

    #[test]
    fn decode_error_surfaces_and_persists_nothing() {
        let config = ScannerConfig::default();
        let sink = RecordingSink::default();
        let ctx = PipelineContext {
            config: &config,
            metadata: &NoMarketMetadata,
            sink: &sink,
        };
        let mut ix = pool_ix(1, 2);
        ix.data.truncate(20);
        let result = process_ledger_transaction(ctx, &pool_tx(vec![ix]));
        assert!(matches!(result, Err(Error::TruncatedPayload { .. })));
        assert!(sink.saved.lock().unwrap().is_empty());
    }
}
