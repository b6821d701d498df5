//! Spend evaluation.
//!
//! The total spent over a range is a plain sum of transaction amounts whose
//! date falls inside the range (bounds included). Refunds are negative and
//! reduce the total. The total is then compared against a budget amount:
//! only a total strictly greater than the budget is [`BudgetStatus::Exceeded`].

use serde::{Deserialize, Serialize};

use crate::{BudgetPeriod, DateRange, EngineError, MoneyCents, ResultEngine, Transaction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Exceeded,
}

impl BudgetStatus {
    pub fn classify(total_spent: MoneyCents, budget: MoneyCents) -> Self {
        if total_spent > budget {
            Self::Exceeded
        } else {
            Self::OnTrack
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendReport {
    /// Range the transactions were summed over.
    pub range: DateRange,
    pub total_spent: MoneyCents,
    pub budget: MoneyCents,
    pub status: BudgetStatus,
}

/// Sum of the amounts of `transactions` dated within `range`.
///
/// Partial sums are kept in `i128`, so only a final total outside the `i64`
/// range is an error and the result does not depend on iteration order.
pub fn total_spent<'a, I>(transactions: I, range: &DateRange) -> ResultEngine<MoneyCents>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let total: i128 = transactions
        .into_iter()
        .filter(|tx| range.contains(tx.date))
        .map(|tx| i128::from(tx.amount.cents()))
        .sum();
    i64::try_from(total)
        .map(MoneyCents::new)
        .map_err(|_| EngineError::InvalidAmount("total spent overflows".to_string()))
}

/// Evaluate `transactions` over `range` against `budget`.
pub fn evaluate<'a, I>(transactions: I, range: DateRange, budget: MoneyCents) -> ResultEngine<SpendReport>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let total_spent = total_spent(transactions, &range)?;
    Ok(SpendReport {
        range,
        total_spent,
        budget,
        status: BudgetStatus::classify(total_spent, budget),
    })
}

impl BudgetPeriod {
    /// Evaluate `transactions` over this period's own range.
    pub fn evaluate<'a, I>(&self, transactions: I) -> ResultEngine<SpendReport>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        evaluate(transactions, self.range, self.amount)
    }
}
