//! Transition rules for back-office documents.

use rust_decimal::Decimal;

use crate::tolerance::within_tolerance;
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{
    AdvanceStatus, DraftSnapshot, DraftStatus, ExpenseStatus, InvoiceStatus, OrderStatus,
};

/// Stateless rules for document status transitions.
///
/// Every method returns the status the backend is expected to move the
/// document to, or the reason the action is not allowed.
pub struct DocumentWorkflow;

impl DocumentWorkflow {
    /// Exchange an invoice's balance for a draft schedule.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::InvalidTransition` unless Pending or Partial
    /// * `WorkflowError::NoBalance` if nothing is owed
    pub fn exchange(
        current_status: InvoiceStatus,
        balance: Decimal,
    ) -> Result<InvoiceStatus, WorkflowError> {
        if !current_status.is_payable() {
            return Err(invalid(current_status.as_str(), InvoiceStatus::Exchanged.as_str()));
        }
        if balance <= Decimal::ZERO {
            return Err(WorkflowError::NoBalance);
        }
        Ok(InvoiceStatus::Exchanged)
    }

    /// Undo an exchange, discarding its drafts.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::InvalidTransition` unless Exchanged
    /// * `WorkflowError::DraftsHavePayments` if any draft received money
    pub fn revert_exchange(
        current_status: InvoiceStatus,
        drafts: &[DraftSnapshot],
    ) -> Result<InvoiceStatus, WorkflowError> {
        if current_status != InvoiceStatus::Exchanged {
            return Err(invalid(current_status.as_str(), InvoiceStatus::Pending.as_str()));
        }
        if drafts.iter().any(DraftSnapshot::has_payments) {
            return Err(WorkflowError::DraftsHavePayments);
        }
        Ok(InvoiceStatus::Pending)
    }

    /// Void an invoice. Only untouched invoices can be voided.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::VoidReasonRequired` if the reason is blank
    /// * `WorkflowError::InvalidTransition` unless Pending
    pub fn void_invoice(
        current_status: InvoiceStatus,
        reason: &str,
    ) -> Result<InvoiceStatus, WorkflowError> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::VoidReasonRequired);
        }
        match current_status {
            InvoiceStatus::Pending => Ok(InvoiceStatus::Voided),
            _ => Err(invalid(current_status.as_str(), InvoiceStatus::Voided.as_str())),
        }
    }

    /// Register a payment against an invoice.
    ///
    /// The invoice is Paid when the amount is less than a cent away from the
    /// balance, otherwise Partial. Overpaying by a cent or more is rejected.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::InvalidTransition` unless Pending or Partial
    /// * `WorkflowError::NonPositiveAmount` / `WorkflowError::ExceedsBalance`
    pub fn pay_invoice(
        current_status: InvoiceStatus,
        balance: Decimal,
        amount: Decimal,
    ) -> Result<InvoiceStatus, WorkflowError> {
        if !current_status.is_payable() {
            return Err(invalid(current_status.as_str(), InvoiceStatus::Paid.as_str()));
        }
        if settles(balance, amount)? {
            Ok(InvoiceStatus::Paid)
        } else {
            Ok(InvoiceStatus::Partial)
        }
    }

    /// Pay a single draft of an exchanged invoice.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::InvalidTransition` if the draft is already Paid
    /// * `WorkflowError::NonPositiveAmount` / `WorkflowError::ExceedsBalance`
    pub fn pay_draft(
        current_status: DraftStatus,
        balance: Decimal,
        amount: Decimal,
    ) -> Result<DraftStatus, WorkflowError> {
        if current_status == DraftStatus::Paid {
            return Err(invalid(current_status.as_str(), DraftStatus::Paid.as_str()));
        }
        if settles(balance, amount)? {
            Ok(DraftStatus::Paid)
        } else {
            Ok(DraftStatus::Partial)
        }
    }

    /// Pay out an advance in full.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` unless Pending.
    pub fn pay_advance(current_status: AdvanceStatus) -> Result<AdvanceStatus, WorkflowError> {
        match current_status {
            AdvanceStatus::Pending => Ok(AdvanceStatus::Paid),
            _ => Err(invalid(current_status.as_str(), AdvanceStatus::Paid.as_str())),
        }
    }

    /// Void an advance that was not paid out.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` unless Pending.
    pub fn void_advance(current_status: AdvanceStatus) -> Result<AdvanceStatus, WorkflowError> {
        match current_status {
            AdvanceStatus::Pending => Ok(AdvanceStatus::Voided),
            _ => Err(invalid(current_status.as_str(), AdvanceStatus::Voided.as_str())),
        }
    }

    /// Void a registered expense.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` if already voided.
    pub fn void_expense(current_status: ExpenseStatus) -> Result<ExpenseStatus, WorkflowError> {
        match current_status {
            ExpenseStatus::Registered => Ok(ExpenseStatus::Voided),
            ExpenseStatus::Voided => Err(invalid(
                current_status.as_str(),
                ExpenseStatus::Voided.as_str(),
            )),
        }
    }

    /// Generate a supplier invoice from an open order.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::InvoiceNumberRequired` if the number is blank
    /// * `WorkflowError::InvalidTransition` unless Open
    pub fn generate_invoice(
        current_status: OrderStatus,
        number: &str,
    ) -> Result<OrderStatus, WorkflowError> {
        if number.trim().is_empty() {
            return Err(WorkflowError::InvoiceNumberRequired);
        }
        match current_status {
            OrderStatus::Open => Ok(OrderStatus::Invoiced),
            _ => Err(invalid(current_status.as_str(), OrderStatus::Invoiced.as_str())),
        }
    }

    /// Cancel an open order.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidTransition` unless Open.
    pub fn cancel_order(current_status: OrderStatus) -> Result<OrderStatus, WorkflowError> {
        match current_status {
            OrderStatus::Open => Ok(OrderStatus::Cancelled),
            _ => Err(invalid(current_status.as_str(), OrderStatus::Cancelled.as_str())),
        }
    }

    /// Check if an invoice status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Partial | Paid | Exchanged | Voided
    /// - Partial → Partial | Paid | Exchanged
    /// - Exchanged → Pending | Paid
    #[must_use]
    pub fn is_valid_transition(from: InvoiceStatus, to: InvoiceStatus) -> bool {
        matches!(
            (from, to),
            (
                InvoiceStatus::Pending,
                InvoiceStatus::Partial
                    | InvoiceStatus::Paid
                    | InvoiceStatus::Exchanged
                    | InvoiceStatus::Voided
            ) | (
                InvoiceStatus::Partial,
                InvoiceStatus::Partial | InvoiceStatus::Paid | InvoiceStatus::Exchanged
            ) | (
                InvoiceStatus::Exchanged,
                InvoiceStatus::Pending | InvoiceStatus::Paid
            )
        )
    }
}

const fn invalid(from: &'static str, to: &'static str) -> WorkflowError {
    WorkflowError::InvalidTransition { from, to }
}

/// Validates a payment against a balance; `true` when it settles the balance.
fn settles(balance: Decimal, amount: Decimal) -> Result<bool, WorkflowError> {
    if amount <= Decimal::ZERO {
        return Err(WorkflowError::NonPositiveAmount(amount));
    }
    let settled = within_tolerance(amount, balance);
    if amount > balance && !settled {
        return Err(WorkflowError::ExceedsBalance { amount, balance });
    }
    Ok(settled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft(status: DraftStatus, paid: Decimal) -> DraftSnapshot {
        DraftSnapshot { status, paid }
    }

    #[test]
    fn test_exchange_from_pending_and_partial() {
        assert_eq!(
            DocumentWorkflow::exchange(InvoiceStatus::Pending, dec!(1000.00)),
            Ok(InvoiceStatus::Exchanged)
        );
        assert_eq!(
            DocumentWorkflow::exchange(InvoiceStatus::Partial, dec!(400.00)),
            Ok(InvoiceStatus::Exchanged)
        );
    }

    #[test]
    fn test_exchange_requires_balance() {
        assert_eq!(
            DocumentWorkflow::exchange(InvoiceStatus::Pending, dec!(0)),
            Err(WorkflowError::NoBalance)
        );
    }

    #[test]
    fn test_exchange_twice_fails() {
        assert!(matches!(
            DocumentWorkflow::exchange(InvoiceStatus::Exchanged, dec!(100)),
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_revert_with_untouched_drafts() {
        let drafts = [
            draft(DraftStatus::Pending, dec!(0)),
            draft(DraftStatus::Pending, dec!(0)),
        ];
        assert_eq!(
            DocumentWorkflow::revert_exchange(InvoiceStatus::Exchanged, &drafts),
            Ok(InvoiceStatus::Pending)
        );
    }

    #[test]
    fn test_revert_blocked_by_paid_draft() {
        let drafts = [
            draft(DraftStatus::Paid, dec!(250.00)),
            draft(DraftStatus::Pending, dec!(0)),
        ];
        assert_eq!(
            DocumentWorkflow::revert_exchange(InvoiceStatus::Exchanged, &drafts),
            Err(WorkflowError::DraftsHavePayments)
        );
    }

    #[test]
    fn test_revert_requires_exchanged() {
        assert!(matches!(
            DocumentWorkflow::revert_exchange(InvoiceStatus::Pending, &[]),
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_void_invoice() {
        assert_eq!(
            DocumentWorkflow::void_invoice(InvoiceStatus::Pending, "Duplicated"),
            Ok(InvoiceStatus::Voided)
        );
        assert_eq!(
            DocumentWorkflow::void_invoice(InvoiceStatus::Pending, "  "),
            Err(WorkflowError::VoidReasonRequired)
        );
        assert!(DocumentWorkflow::void_invoice(InvoiceStatus::Partial, "Duplicated").is_err());
        assert!(DocumentWorkflow::void_invoice(InvoiceStatus::Exchanged, "Duplicated").is_err());
    }

    #[test]
    fn test_pay_invoice_partial_then_paid() {
        assert_eq!(
            DocumentWorkflow::pay_invoice(InvoiceStatus::Pending, dec!(1000.00), dec!(400.00)),
            Ok(InvoiceStatus::Partial)
        );
        assert_eq!(
            DocumentWorkflow::pay_invoice(InvoiceStatus::Partial, dec!(600.00), dec!(600.00)),
            Ok(InvoiceStatus::Paid)
        );
    }

    #[test]
    fn test_pay_invoice_cent_short_stays_partial() {
        assert_eq!(
            DocumentWorkflow::pay_invoice(InvoiceStatus::Pending, dec!(100.00), dec!(99.99)),
            Ok(InvoiceStatus::Partial)
        );
        assert_eq!(
            DocumentWorkflow::pay_invoice(InvoiceStatus::Pending, dec!(100.00), dec!(100.01)),
            Err(WorkflowError::ExceedsBalance {
                amount: dec!(100.01),
                balance: dec!(100.00),
            })
        );
        assert_eq!(
            DocumentWorkflow::pay_invoice(InvoiceStatus::Pending, dec!(100.00), dec!(100.005)),
            Ok(InvoiceStatus::Paid)
        );
    }

    #[test]
    fn test_pay_invoice_rejects_bad_amounts() {
        assert_eq!(
            DocumentWorkflow::pay_invoice(InvoiceStatus::Pending, dec!(100.00), dec!(0)),
            Err(WorkflowError::NonPositiveAmount(dec!(0)))
        );
        assert_eq!(
            DocumentWorkflow::pay_invoice(InvoiceStatus::Pending, dec!(100.00), dec!(100.02)),
            Err(WorkflowError::ExceedsBalance {
                amount: dec!(100.02),
                balance: dec!(100.00),
            })
        );
    }

    #[test]
    fn test_pay_draft() {
        assert_eq!(
            DocumentWorkflow::pay_draft(DraftStatus::Pending, dec!(250.00), dec!(250.00)),
            Ok(DraftStatus::Paid)
        );
        assert_eq!(
            DocumentWorkflow::pay_draft(DraftStatus::Pending, dec!(250.00), dec!(50.00)),
            Ok(DraftStatus::Partial)
        );
        assert!(DocumentWorkflow::pay_draft(DraftStatus::Paid, dec!(0), dec!(1)).is_err());
    }

    #[test]
    fn test_advance_rules() {
        assert_eq!(
            DocumentWorkflow::pay_advance(AdvanceStatus::Pending),
            Ok(AdvanceStatus::Paid)
        );
        assert_eq!(
            DocumentWorkflow::void_advance(AdvanceStatus::Pending),
            Ok(AdvanceStatus::Voided)
        );
        assert!(DocumentWorkflow::void_advance(AdvanceStatus::Paid).is_err());
        assert!(DocumentWorkflow::pay_advance(AdvanceStatus::Voided).is_err());
    }

    #[test]
    fn test_expense_rules() {
        assert_eq!(
            DocumentWorkflow::void_expense(ExpenseStatus::Registered),
            Ok(ExpenseStatus::Voided)
        );
        assert!(DocumentWorkflow::void_expense(ExpenseStatus::Voided).is_err());
    }

    #[test]
    fn test_order_rules() {
        assert_eq!(
            DocumentWorkflow::generate_invoice(OrderStatus::Open, "F001-123"),
            Ok(OrderStatus::Invoiced)
        );
        assert_eq!(
            DocumentWorkflow::generate_invoice(OrderStatus::Open, ""),
            Err(WorkflowError::InvoiceNumberRequired)
        );
        assert!(DocumentWorkflow::generate_invoice(OrderStatus::Cancelled, "1").is_err());
        assert_eq!(
            DocumentWorkflow::cancel_order(OrderStatus::Open),
            Ok(OrderStatus::Cancelled)
        );
        assert!(DocumentWorkflow::cancel_order(OrderStatus::Invoiced).is_err());
    }

    #[test]
    fn test_is_valid_transition() {
        // Valid transitions
        assert!(DocumentWorkflow::is_valid_transition(
            InvoiceStatus::Pending,
            InvoiceStatus::Exchanged
        ));
        assert!(DocumentWorkflow::is_valid_transition(
            InvoiceStatus::Exchanged,
            InvoiceStatus::Pending
        ));
        assert!(DocumentWorkflow::is_valid_transition(
            InvoiceStatus::Partial,
            InvoiceStatus::Paid
        ));
        assert!(DocumentWorkflow::is_valid_transition(
            InvoiceStatus::Partial,
            InvoiceStatus::Partial
        ));
        assert_eq!(
            DocumentWorkflow::pay_invoice(InvoiceStatus::Partial, dec!(600.00), dec!(100.00)),
            Ok(InvoiceStatus::Partial)
        );

        // Invalid transitions
        assert!(!DocumentWorkflow::is_valid_transition(
            InvoiceStatus::Partial,
            InvoiceStatus::Voided
        ));
        assert!(!DocumentWorkflow::is_valid_transition(
            InvoiceStatus::Voided,
            InvoiceStatus::Pending
        ));
        assert!(!DocumentWorkflow::is_valid_transition(
            InvoiceStatus::Paid,
            InvoiceStatus::Exchanged
        ));
    }
}
