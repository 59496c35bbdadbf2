//! Document statuses.
//!
//! Each status serializes as the snake_case string the backend sends.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

macro_rules! document_status {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every status, in lifecycle order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the wire representation.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Parses the wire representation, ignoring case.
            pub fn parse(s: &str) -> Option<Self> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

document_status! {
    /// Supplier invoice status.
    ///
    /// - Pending → Partial | Paid (pay)
    /// - Pending | Partial → Exchanged (exchange for drafts)
    /// - Exchanged → Pending (revert exchange)
    /// - Exchanged → Paid (last draft paid)
    /// - Pending → Voided (void)
    InvoiceStatus {
        /// Issued, nothing paid.
        Pending => "pending",
        /// Some payments applied, balance remains.
        Partial => "partial",
        /// Fully paid.
        Paid => "paid",
        /// Balance replaced by a draft schedule.
        Exchanged => "exchanged",
        /// Voided (immutable).
        Voided => "voided",
    }
}

document_status! {
    /// Advance status.
    AdvanceStatus {
        /// Registered, not yet paid out.
        Pending => "pending",
        /// Paid out.
        Paid => "paid",
        /// Voided.
        Voided => "voided",
    }
}

document_status! {
    /// Expense status. Expenses are paid at registration.
    ExpenseStatus {
        /// Registered with its payments.
        Registered => "registered",
        /// Voided.
        Voided => "voided",
    }
}

document_status! {
    /// Purchase order status.
    OrderStatus {
        /// Editable.
        Open => "open",
        /// An invoice was generated from the order.
        Invoiced => "invoiced",
        /// Cancelled.
        Cancelled => "cancelled",
    }
}

document_status! {
    /// Draft (installment) status.
    DraftStatus {
        /// Nothing paid.
        Pending => "pending",
        /// Partially paid.
        Partial => "partial",
        /// Fully paid.
        Paid => "paid",
    }
}

impl InvoiceStatus {
    /// Whether the invoice header and lines may still be changed.
    ///
    /// Only pending invoices with no payment applied are editable.
    #[must_use]
    pub const fn is_editable(&self, has_payments: bool) -> bool {
        matches!(self, Self::Pending) && !has_payments
    }

    /// Whether payments can be registered against the invoice.
    #[must_use]
    pub const fn is_payable(&self) -> bool {
        matches!(self, Self::Pending | Self::Partial)
    }

    /// Whether the invoice is closed for every action.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Paid | Self::Voided)
    }
}

impl OrderStatus {
    /// Whether the order may still be changed.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// The parts of a draft the revert precheck looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftSnapshot {
    /// Current status.
    pub status: DraftStatus,
    /// Amount already paid on the draft.
    pub paid: Decimal,
}

impl DraftSnapshot {
    /// Whether any money has been applied to the draft.
    #[must_use]
    pub fn has_payments(&self) -> bool {
        self.paid > Decimal::ZERO || self.status != DraftStatus::Pending
    }
}
