//! Document line types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesorero_shared::types::{ArticleId, BusinessLineId, CategoryId, CostCenterId};

/// Whether entered amounts already contain the sales tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    /// Amounts are gross; the net base is back-calculated.
    #[default]
    TaxIncluded,
    /// Amounts are net; tax is added on top.
    TaxExcluded,
}

impl PriceBasis {
    /// Maps the "amounts include tax" checkbox.
    #[must_use]
    pub const fn from_includes_tax(includes_tax: bool) -> Self {
        if includes_tax {
            Self::TaxIncluded
        } else {
            Self::TaxExcluded
        }
    }

    /// Returns true for [`PriceBasis::TaxIncluded`].
    #[must_use]
    pub const fn includes_tax(self) -> bool {
        matches!(self, Self::TaxIncluded)
    }
}

/// A line the total calculator can price.
pub trait TaxableLine {
    /// The entered amount (gross or net depending on the basis).
    fn line_amount(&self) -> Decimal;

    /// Whether the tax applies to this line.
    fn tax_applies(&self) -> bool;
}

/// Category line of an invoice or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Expense category.
    pub category_id: Option<CategoryId>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Business line the amount is charged to.
    pub business_line_id: Option<BusinessLineId>,
    /// Cost center the amount is charged to.
    pub cost_center_id: Option<CostCenterId>,
    /// Entered amount, never negative.
    pub amount: Decimal,
    /// Whether the tax applies.
    #[serde(default = "default_tax_applies")]
    pub tax_applies: bool,
}

fn default_tax_applies() -> bool {
    true
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            category_id: None,
            description: String::new(),
            business_line_id: None,
            cost_center_id: None,
            amount: Decimal::ZERO,
            tax_applies: true,
        }
    }
}

impl LineItem {
    /// Creates a taxed line for a category.
    #[must_use]
    pub fn new(category_id: CategoryId, amount: Decimal) -> Self {
        Self {
            category_id: Some(category_id),
            amount,
            ..Self::default()
        }
    }

    /// Sets the tax flag.
    #[must_use]
    pub const fn with_tax(mut self, tax_applies: bool) -> Self {
        self.tax_applies = tax_applies;
        self
    }
}

impl TaxableLine for LineItem {
    fn line_amount(&self) -> Decimal {
        self.amount
    }

    fn tax_applies(&self) -> bool {
        self.tax_applies
    }
}

/// Article line of a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleLine {
    /// Inventory item.
    pub article_id: Option<ArticleId>,
    /// Ordered quantity.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Whether the tax applies.
    #[serde(default = "default_tax_applies")]
    pub tax_applies: bool,
}

impl Default for ArticleLine {
    fn default() -> Self {
        Self {
            article_id: None,
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            tax_applies: true,
        }
    }
}

impl ArticleLine {
    /// Creates a taxed article line.
    #[must_use]
    pub fn new(article_id: ArticleId, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            article_id: Some(article_id),
            quantity,
            unit_price,
            tax_applies: true,
        }
    }

    /// Derived line amount, `quantity * unit_price`.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

impl TaxableLine for ArticleLine {
    fn line_amount(&self) -> Decimal {
        self.amount()
    }

    fn tax_applies(&self) -> bool {
        self.tax_applies
    }
}
