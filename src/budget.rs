//! Budget arithmetic for a trip.
//!
//! Everything here is pure: the same input always yields the same summary.
//! Callers recompute on every selection change instead of caching.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of the progress bar.
pub const MAX_PERCENT: f64 = 100.0;

/// The selections a trip cost is derived from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    pub flight_price: f64,
    pub nightly_rate: f64,
    pub nights: u32,
    #[serde(default)]
    pub activity_prices: Vec<f64>,
    pub budget: f64,
}

/// Derived cost fields, in the order they are computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_cost: f64,
    pub is_over_budget: bool,
    /// Negative when over budget.
    pub savings: f64,
    /// Share of the budget consumed, capped at [`MAX_PERCENT`].
    pub progress_percent: f64,
}

impl BudgetInput {
    pub fn total_cost(&self) -> f64 {
        let activities: f64 = self.activity_prices.iter().sum();
        self.flight_price + self.nightly_rate * f64::from(self.nights) + activities
    }

    pub fn summarize(&self) -> BudgetSummary {
        let total_cost = self.total_cost();
        BudgetSummary {
            total_cost,
            is_over_budget: total_cost > self.budget,
            savings: self.budget - total_cost,
            progress_percent: progress_percent(total_cost, self.budget),
        }
    }
}

/// Percent of `budget` that `total_cost` consumes.
///
/// A budget of zero (or below) cannot be divided by: nothing spent reads as 0%,
/// anything spent reads as a full bar.
pub fn progress_percent(total_cost: f64, budget: f64) -> f64 {
    if budget > 0.0 {
        (total_cost / budget * 100.0).min(MAX_PERCENT)
    } else if total_cost > 0.0 {
        MAX_PERCENT
    } else {
        0.0
    }
}

impl BudgetSummary {
    /// Percent as shown on the progress label.
    pub fn rounded_percent(&self) -> u32 {
        self.progress_percent.round() as u32
    }

    /// Amount over budget, if any.
    pub fn overage(&self) -> Option<f64> {
        self.is_over_budget.then(|| self.savings.abs())
    }
}

impl fmt::Display for BudgetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.overage() {
            Some(over) => write!(f, "€{} over budget", over.round()),
            None => write!(f, "Saving €{}", self.savings.round()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(budget: f64) -> BudgetInput {
        BudgetInput {
            flight_price: 85.0,
            nightly_rate: 35.0,
            nights: 3,
            activity_prices: vec![15.0, 0.0, 26.0],
            budget,
        }
    }

    #[test]
    fn computes_totals_within_budget() {
        let summary = input(300.0).summarize();

        assert_eq!(summary.total_cost, 231.0);
        assert!(!summary.is_over_budget);
        assert_eq!(summary.savings, 69.0);
        assert_eq!(summary.rounded_percent(), 77);
        assert_eq!(summary.overage(), None);
        assert_eq!(summary.to_string(), "Saving €69");
    }

    #[test]
    fn flags_over_budget_and_caps_percent() {
        let summary = input(150.0).summarize();

        assert!(summary.is_over_budget);
        assert_eq!(summary.savings, -81.0);
        assert_eq!(summary.progress_percent, 100.0);
        assert_eq!(summary.overage(), Some(81.0));
        assert_eq!(summary.to_string(), "€81 over budget");
    }

    #[test]
    fn exact_budget_is_not_over() {
        let summary = input(231.0).summarize();
        assert!(!summary.is_over_budget);
        assert_eq!(summary.savings, 0.0);
        assert_eq!(summary.progress_percent, 100.0);
    }

    #[test]
    fn zero_budget_with_nothing_spent_is_zero_percent() {
        let summary = BudgetInput {
            flight_price: 0.0,
            nightly_rate: 0.0,
            nights: 1,
            activity_prices: vec![],
            budget: 0.0,
        }
        .summarize();

        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.progress_percent, 0.0);
        assert!(!summary.is_over_budget);
    }

    #[test]
    fn zero_budget_with_spending_is_full_bar() {
        let summary = input(0.0).summarize();
        assert_eq!(summary.progress_percent, 100.0);
        assert!(summary.is_over_budget);
        assert!(summary.progress_percent.is_finite());
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(input(300.0).summarize(), input(300.0).summarize());
    }
}
