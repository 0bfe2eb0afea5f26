//! Batch application with per-transaction atomicity.

use std::path::Path;

use serde::Deserialize;
use seth_domain::SethTransaction;
use seth_executor::ExecutionEngine;
use seth_overlay::{MemoryState, OverlayState};
use seth_primitives::Address;
use seth_processor::{ErrorKind, TransactionProcessor, TransitionOutput};

/// One signed transaction.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct BatchEntry {
    pub sender: Address,
    pub transaction: SethTransaction,
}

/// Ordered transactions applied one after another.
#[derive(Clone, Debug, Default)]
pub(crate) struct Batch {
    entries: Vec<BatchEntry>,
}

/// Outcome of one batch entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Report {
    Applied(TransitionOutput),
    Rejected { kind: ErrorKind, message: String },
}

impl Batch {
    pub(crate) fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub(crate) fn from_json(content: &str) -> eyre::Result<Self> {
        Ok(Self { entries: serde_json::from_str(content)? })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Apply every entry to `state`.
    ///
    /// Each transaction runs against an overlay. Accepted transactions are
    /// committed before the next one runs; rejected ones leave no trace.
    pub(crate) fn apply<E: ExecutionEngine>(
        &self,
        processor: &TransactionProcessor<E>,
        state: &MemoryState,
    ) -> eyre::Result<Vec<Report>> {
        let mut reports = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let overlay = OverlayState::new(state);
            match processor.apply(&entry.transaction, &entry.sender, &overlay) {
                Ok(output) => {
                    state.commit(overlay.into_changes()?)?;
                    reports.push(Report::Applied(output));
                }
                Err(err) => {
                    tracing::info!(sender = %entry.sender, kind = %err.kind(), "transaction rejected");
                    reports.push(Report::Rejected { kind: err.kind(), message: err.to_string() });
                }
            }
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use seth_domain::{Account, AccountPermissions, GLOBAL_PERMISSIONS_ADDRESS, PermFlags};
    use seth_executor::RevmEngine;
    use seth_traits::StateAccessor;

    use super::*;

    const ALICE: &str = "0x1111111111111111111111111111111111111111";
    const BOB: &str = "0x2222222222222222222222222222222222222222";

    fn batch(json: &str) -> Batch {
        Batch::from_json(json).expect("batch")
    }

    #[test]
    fn bootstrap_batch_registers_and_sponsors() {
        let state = MemoryState::new();
        let processor = TransactionProcessor::new(RevmEngine::default());
        let json = format!(
            r#"[
                {{ "sender": "{ALICE}", "transaction": {{ "type": "create_external_account" }} }},
                {{ "sender": "{ALICE}", "transaction": {{
                    "type": "create_external_account", "nonce": 1, "to": "{BOB}"
                }} }}
            ]"#
        );

        let reports = batch(&json).apply(&processor, &state).unwrap();
        assert!(reports.iter().all(|r| matches!(r, Report::Applied(_))));

        let alice = state.get_account(&ALICE.parse().unwrap()).unwrap().unwrap();
        assert_eq!(alice.sequence, 2);
        assert_eq!(alice.permissions, AccountPermissions::all_granted());

        let bob = state.get_account(&BOB.parse().unwrap()).unwrap().unwrap();
        assert_eq!(bob.sequence, 1);
        assert_eq!(bob.permissions, AccountPermissions::all_granted().without_root());
    }

    #[test]
    fn rejected_entry_leaves_no_trace() {
        let global = Account::new(GLOBAL_PERMISSIONS_ADDRESS, 1)
            .with_permissions(AccountPermissions::explicit(PermFlags::CALL));
        let state = MemoryState::with_accounts([global]);
        let processor = TransactionProcessor::new(RevmEngine::default());
        let json = format!(
            r#"[
                {{ "sender": "{ALICE}", "transaction": {{ "type": "create_external_account" }} }},
                {{ "sender": "{BOB}", "transaction": {{
                    "type": "set_permissions", "nonce": 0, "to": "{ALICE}"
                }} }}
            ]"#
        );

        let reports = batch(&json).apply(&processor, &state).unwrap();
        assert_eq!(
            reports[0],
            Report::Rejected {
                kind: ErrorKind::PermissionDenied,
                message: format!("account {ALICE} does not have create_account permission"),
            }
        );
        assert!(matches!(
            reports[1],
            Report::Rejected { kind: ErrorKind::MissingPermissions, .. }
        ));
        assert_eq!(state.len().unwrap(), 1);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"[{{ "sender": "{ALICE}", "transaction": {{ "type": "create_external_account" }} }}]"#
        )
        .expect("write");
        assert_eq!(Batch::load(file.path()).unwrap().len(), 1);
    }

    #[test]
    fn unknown_transaction_type_is_rejected_at_parse() {
        let json = format!(r#"[{{ "sender": "{ALICE}", "transaction": {{ "type": "burn" }} }}]"#);
        assert!(Batch::from_json(&json).is_err());
    }
}
