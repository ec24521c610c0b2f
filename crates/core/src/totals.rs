//! Income/expense aggregation over a set of transactions.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::{Error, Result};
use crate::transactions::Transaction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
}

impl Totals {
    /// Sums income amounts and everything else as expenses.
    ///
    /// Fails instead of overflowing when a sum leaves the decimal range.
    pub fn from_transactions<'a, I>(transactions: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .try_fold(Totals::default(), |mut totals, transaction| -> Result<Self> {
                let sum = if transaction.is_income() {
                    &mut totals.total_income
                } else {
                    &mut totals.total_expenses
                };
                *sum = sum.checked_add(transaction.amount).ok_or_else(|| {
                    Error::Unexpected(format!(
                        "Totals overflow at transaction {}",
                        transaction.id
                    ))
                })?;
                Ok(totals)
            })
    }

    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expenses
    }

    pub fn has_activity(&self) -> bool {
        self.total_income > Decimal::ZERO || self.total_expenses > Decimal::ZERO
    }
}
