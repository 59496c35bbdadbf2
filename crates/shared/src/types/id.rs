//! Record identifiers as returned by the back-office API.
//!
//! The API is not consistent about id types: the same record may come back
//! with a numeric id from one endpoint and a string id from another. `RecordId`
//! keeps whatever the API sent and offers an explicit loose comparison instead
//! of coercing silently.

use std::convert::Infallible;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A record id that is either a number or a string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric id (`5`).
    Number(i64),
    /// String id (`"5"`, `"PEN"`).
    Text(String),
}

impl RecordId {
    /// Compares two ids by identity OR by their string rendering.
    ///
    /// `Number(5)` matches `Text("5")`; `Number(5)` does not match `Text("05")`.
    #[must_use]
    pub fn loosely_eq(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (Self::Number(a), Self::Text(b)) | (Self::Text(b), Self::Number(a)) => {
                a.to_string() == *b
            }
            _ => false,
        }
    }

    /// Returns the numeric value when the id is a number or a numeric string.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::str::FromStr for RecordId {
    type Err = Infallible;

    /// Numeric strings become `Number`, anything else stays `Text`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_string()), Self::Number))
    }
}

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub RecordId);

        impl $name {
            /// Returns the untyped record id.
            #[must_use]
            pub const fn as_record(&self) -> &RecordId {
                &self.0
            }

            /// Returns the inner record id.
            #[must_use]
            pub fn into_inner(self) -> RecordId {
                self.0
            }

            /// Loose comparison, see [`RecordId::loosely_eq`].
            #[must_use]
            pub fn loosely_eq(&self, other: &Self) -> bool {
                self.0.loosely_eq(&other.0)
            }
        }

        impl From<RecordId> for $name {
            fn from(value: RecordId) -> Self {
                Self(value)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(RecordId::Number(value))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(RecordId::from(value))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

typed_id!(ProviderId, "Identifier of a provider (suppliers and employees).");
typed_id!(CurrencyId, "Identifier of a currency record.");
typed_id!(CategoryId, "Identifier of an expense category.");
typed_id!(AccountId, "Identifier of a cash or bank account.");
typed_id!(BusinessLineId, "Identifier of a business line.");
typed_id!(CostCenterId, "Identifier of a cost center.");
typed_id!(ArticleId, "Identifier of an inventory item.");
typed_id!(AdvanceId, "Identifier of an employee advance.");
typed_id!(InvoiceId, "Identifier of a supplier invoice.");
typed_id!(DraftId, "Identifier of an installment draft (letra).");
typed_id!(ExpenseId, "Identifier of an expense.");
typed_id!(PurchaseOrderId, "Identifier of a purchase order.");
