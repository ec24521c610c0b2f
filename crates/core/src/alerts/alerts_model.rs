//! Budget alert models.

use rust_decimal::Decimal;

use crate::constants::{
    APP_NAME, BUDGET_ALERT_UTILIZATION_THRESHOLD, CURRENCY_LABEL, NOTIFICATION_TYPE_BUDGET_ALERT,
};
use crate::notifications::PushMessage;
use crate::totals::Totals;
use crate::utils::{format_plain, format_whole, percentage_of};

/// Month-to-date position of a user against their budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyPosition {
    pub totals: Totals,
    pub monthly_budget: Decimal,
}

impl MonthlyPosition {
    pub fn new(totals: Totals, monthly_budget: Decimal) -> Self {
        Self {
            totals,
            monthly_budget,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.totals.balance()
    }

    /// Share of the budget consumed, `(budget - balance) / budget * 100`.
    ///
    /// `None` when the budget is zero or the figures leave the decimal range.
    pub fn budget_utilization(&self) -> Option<Decimal> {
        let used = self.monthly_budget.checked_sub(self.balance())?;
        percentage_of(used, self.monthly_budget)
    }

    /// Decides which alert, if any, this position calls for.
    pub fn alert(&self) -> Option<BudgetAlert> {
        let balance = self.balance();
        if balance < Decimal::ZERO {
            return Some(BudgetAlert::Overrun { balance });
        }
        match self.budget_utilization() {
            Some(utilization)
                if utilization > Decimal::from(BUDGET_ALERT_UTILIZATION_THRESHOLD) =>
            {
                Some(BudgetAlert::HighUtilization { utilization })
            }
            _ => None,
        }
    }
}

/// Reason a budget alert fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetAlert {
    /// Month-to-date balance went negative.
    Overrun { balance: Decimal },
    /// More than the threshold share of the budget is used.
    HighUtilization { utilization: Decimal },
}

impl BudgetAlert {
    pub fn title() -> String {
        format!("{} - Alerte Budget", APP_NAME)
    }

    pub fn body(&self) -> String {
        match self {
            BudgetAlert::Overrun { balance } => format!(
                "Budget dépassé! Solde négatif de {} {}",
                format_whole(balance.abs()),
                CURRENCY_LABEL
            ),
            BudgetAlert::HighUtilization { utilization } => {
                format!("Attention! {}% du budget utilisé", format_whole(*utilization))
            }
        }
    }

    /// Builds the push message for `token`.
    pub fn to_message(&self, token: &str, position: &MonthlyPosition) -> PushMessage {
        PushMessage::new(token, Self::title(), self.body())
            .with_data("type", NOTIFICATION_TYPE_BUDGET_ALERT)
            .with_data("balance", format_plain(position.balance()))
            .with_data("budget", format_plain(position.monthly_budget))
    }
}

/// What a single evaluation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    NotExpense,
    UserNotFound,
    NoDeviceToken,
    WithinBudget,
    /// Carries the provider message id.
    Dispatched(String),
    /// Carries the logged error text.
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn position(income: Decimal, expenses: Decimal, budget: Decimal) -> MonthlyPosition {
        MonthlyPosition::new(
            Totals {
                total_income: income,
                total_expenses: expenses,
            },
            budget,
        )
    }

    #[test]
    fn exactly_eighty_percent_does_not_alert() {
        let p = position(dec!(10000), dec!(9000), dec!(5000));
        assert_eq!(p.budget_utilization(), Some(dec!(80)));
        assert_eq!(p.alert(), None);
    }

    #[test]
    fn ninety_percent_alerts_with_rounded_share() {
        let alert = position(dec!(10000), dec!(9500), dec!(5000)).alert().unwrap();
        assert_eq!(alert.body(), "Attention! 90% du budget utilisé");
    }

    #[test]
    fn negative_balance_alerts_with_overrun_amount() {
        let alert = position(dec!(1000), dec!(1500), dec!(100000)).alert().unwrap();
        assert_eq!(alert, BudgetAlert::Overrun { balance: dec!(-500) });
        assert_eq!(alert.body(), "Budget dépassé! Solde négatif de 500 FCFA");
    }

    #[test]
    fn zero_budget_never_alerts_on_utilization() {
        let p = position(dec!(1000), dec!(200), Decimal::ZERO);
        assert_eq!(p.budget_utilization(), None);
        assert_eq!(p.alert(), None);

        let overrun = position(Decimal::ZERO, dec!(200), Decimal::ZERO);
        assert!(matches!(overrun.alert(), Some(BudgetAlert::Overrun { .. })));
    }

    #[test]
    fn message_carries_alert_data() {
        let p = position(dec!(1000), dec!(1500.50), dec!(5000.00));
        let message = p.alert().unwrap().to_message("device-1", &p);
        assert_eq!(message.token, "device-1");
        assert_eq!(message.notification.title, "GèrTonArgent - Alerte Budget");
        assert_eq!(message.data["type"], "budget_alert");
        assert_eq!(message.data["balance"], "-500.5");
        assert_eq!(message.data["budget"], "5000");
    }
}
