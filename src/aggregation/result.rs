//! Aggregate Result
//!
//! Summed totals over a set of product records, partitioned on the sold flag.

use serde::{Deserialize, Serialize};

use crate::domain::{Money, ProductRecord};

/// Totals for a set of records.
///
/// # Invariants
/// - `total_quantity_in_stock + total_quantity_sold == total_quantity`
/// - `total_sale_value_in_stock + total_sale_value_sold == total_sale_value`
/// - `total_profit_value` is the sum of stored profits, not `sale - purchase`
///
/// Quantities and money saturate at their type bounds instead of overflowing,
/// so the partition invariants hold exactly only below those bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_quantity: u64,
    pub total_purchase_value: Money,
    pub total_sale_value: Money,
    pub total_profit_value: Money,
    pub total_quantity_sold: u64,
    pub total_sale_value_sold: Money,
    pub total_quantity_in_stock: u64,
    pub total_sale_value_in_stock: Money,
}

impl AggregateResult {
    /// All-zero totals
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Fold one record into the totals.
    pub fn apply(mut self, record: &ProductRecord) -> Self {
        self.total_quantity = self.total_quantity.saturating_add(record.quantity);
        self.total_purchase_value = self.total_purchase_value.saturating_add(record.purchase_value);
        self.total_sale_value = self.total_sale_value.saturating_add(record.sale_value);
        self.total_profit_value = self.total_profit_value.saturating_add(record.profit_value);

        if record.sold {
            self.total_quantity_sold = self.total_quantity_sold.saturating_add(record.quantity);
            self.total_sale_value_sold = self.total_sale_value_sold.saturating_add(record.sale_value);
        } else {
            self.total_quantity_in_stock = self.total_quantity_in_stock.saturating_add(record.quantity);
            self.total_sale_value_in_stock = self.total_sale_value_in_stock.saturating_add(record.sale_value);
        }

        self
    }
}

impl<'a> FromIterator<&'a ProductRecord> for AggregateResult {
    fn from_iter<I: IntoIterator<Item = &'a ProductRecord>>(iter: I) -> Self {
        iter.into_iter().fold(Self::zero(), Self::apply)
    }
}

impl<'a> Extend<&'a ProductRecord> for AggregateResult {
    fn extend<I: IntoIterator<Item = &'a ProductRecord>>(&mut self, iter: I) {
        *self = iter.into_iter().fold(*self, Self::apply);
    }
}
