//! Property-based tests for DocumentWorkflow.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::DocumentWorkflow;
use crate::workflow::types::{DraftSnapshot, DraftStatus, InvoiceStatus};

fn arb_invoice_status() -> impl Strategy<Value = InvoiceStatus> {
    prop::sample::select(InvoiceStatus::ALL)
}

fn arb_draft_status() -> impl Strategy<Value = DraftStatus> {
    prop::sample::select(DraftStatus::ALL)
}

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_draft() -> impl Strategy<Value = DraftSnapshot> {
    (arb_draft_status(), 0i64..100_000).prop_map(|(status, cents)| DraftSnapshot {
        status,
        paid: Decimal::new(cents, 2),
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Whatever an invoice action returns is a valid transition.
    #[test]
    fn prop_actions_follow_transition_table(
        status in arb_invoice_status(),
        balance in arb_amount(),
        amount in arb_amount(),
    ) {
        if let Ok(next) = DocumentWorkflow::exchange(status, balance) {
            prop_assert!(DocumentWorkflow::is_valid_transition(status, next));
        }
        if let Ok(next) = DocumentWorkflow::pay_invoice(status, balance, amount) {
            prop_assert!(DocumentWorkflow::is_valid_transition(status, next));
        }
        if let Ok(next) = DocumentWorkflow::void_invoice(status, "reason") {
            prop_assert!(DocumentWorkflow::is_valid_transition(status, next));
        }
        if let Ok(next) = DocumentWorkflow::revert_exchange(status, &[]) {
            prop_assert!(DocumentWorkflow::is_valid_transition(status, next));
        }
    }

    /// Whole-cent payments above the balance are always rejected.
    #[test]
    fn prop_payment_bounded_by_balance(balance in arb_amount(), amount in arb_amount()) {
        let result = DocumentWorkflow::pay_invoice(InvoiceStatus::Pending, balance, amount);
        if amount > balance {
            let is_exceeds = matches!(result, Err(WorkflowError::ExceedsBalance { .. }));
            prop_assert!(is_exceeds);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Paying the full balance always settles the invoice.
    #[test]
    fn prop_full_payment_settles(status in prop::sample::select(vec![InvoiceStatus::Pending, InvoiceStatus::Partial]), balance in arb_amount()) {
        prop_assert_eq!(
            DocumentWorkflow::pay_invoice(status, balance, balance),
            Ok(InvoiceStatus::Paid)
        );
    }

    /// A revert succeeds exactly when no draft has received money.
    #[test]
    fn prop_revert_blocked_iff_any_payment(drafts in prop::collection::vec(arb_draft(), 0..8)) {
        let touched = drafts
            .iter()
            .any(|d| d.paid > Decimal::ZERO || d.status != DraftStatus::Pending);
        let result = DocumentWorkflow::revert_exchange(InvoiceStatus::Exchanged, &drafts);
        if touched {
            prop_assert_eq!(result, Err(WorkflowError::DraftsHavePayments));
        } else {
            prop_assert_eq!(result, Ok(InvoiceStatus::Pending));
        }
    }

    /// Blank reasons never void an invoice.
    #[test]
    fn prop_blank_reason_rejected(status in arb_invoice_status(), spaces in " {0,10}") {
        prop_assert_eq!(
            DocumentWorkflow::void_invoice(status, &spaces),
            Err(WorkflowError::VoidReasonRequired)
        );
    }
}
