use crate::address::Address;
use crate::types::LedgerTransaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedInstruction<'a> {
    pub index: usize,
    pub account_refs: &'a [u8],
    pub data: &'a [u8],
}

/// First instruction addressed to `program_id` with a non-empty payload.
pub fn locate_instruction<'a>(
    tx: &'a LedgerTransaction,
    program_id: &Address,
) -> Option<LocatedInstruction<'a>> {
    for (index, ix) in tx.instructions.iter().enumerate() {
        if tx.program_of(ix) != Some(program_id) || ix.data.is_empty() {
            continue;
        }
        let Some(account_refs) = ix.account_refs.as_deref() else {
            tracing::warn!(
                signature = tx.signature.as_deref().unwrap_or_default(),
                index,
                "target instruction has no account indices, skipping"
            );
            continue;
        };
        tracing::debug!(
            signature = tx.signature.as_deref().unwrap_or_default(),
            index,
            "located pool instruction"
        );
        return Some(LocatedInstruction {
            index,
            account_refs,
            data: &ix.data,
        });
    }
    None
}
