use log::debug;
use rust_decimal::Decimal;

use super::advice_model::{AdviceRequest, AdviceResponse, SpendingCategory};
use crate::callable::CallContext;
use crate::errors::{Error, Result};
use crate::utils::{format_whole, percentage_of};

const HIGH_BALANCE_SHARE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const HIGH_BUDGET_SHARE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
const ENTERTAINMENT_BALANCE_SHARE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
const FOOD_AMOUNT_LIMIT: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);
const TRANSPORT_AMOUNT_LIMIT: Decimal = Decimal::from_parts(3000, 0, 0, false, 0);

/// Rule-based spending advice for a proposed expense.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdviceGenerator;

impl AdviceGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Builds the advice text, empty when no rule applies. Fails with
    /// `Unauthenticated` before any rule runs when the call carries no identity.
    pub fn generate(&self, ctx: &CallContext, request: AdviceRequest) -> Result<AdviceResponse> {
        let uid = ctx.require_uid()?;
        debug!("Generating advice for user {}", uid);
        Ok(AdviceResponse {
            advice: compose_advice(&request)?,
        })
    }
}

fn compose_advice(request: &AdviceRequest) -> Result<String> {
    let expense = request.expense_amount;
    // Shares with a zero denominator are undefined and satisfy no threshold.
    let balance_share = percentage_of(expense, request.current_balance);
    let budget_share = percentage_of(expense, request.monthly_budget);
    let exceeds = |share: Option<Decimal>, limit: Decimal| share.is_some_and(|s| s > limit);

    let mut advice = String::new();

    if let Some(share) = balance_share.filter(|s| *s > HIGH_BALANCE_SHARE) {
        advice.push_str(&format!(
            "⚠️ Cette dépense représente {}% de votre solde actuel. ",
            format_whole(share)
        ));
        advice.push_str("C'est une dépense importante qui pourrait impacter vos finances. ");
    }

    if let Some(share) = budget_share.filter(|s| *s > HIGH_BUDGET_SHARE) {
        advice.push_str(&format!(
            "📊 Cette dépense représente {}% de votre budget mensuel. ",
            format_whole(share)
        ));
    }

    let category_tip = match request.category {
        Some(SpendingCategory::Food) if expense > FOOD_AMOUNT_LIMIT => Some(
            "🍽️ Pour la nourriture, considérez si vous pouvez réduire ce montant en cuisinant à la maison. ",
        ),
        Some(SpendingCategory::Entertainment)
            if exceeds(balance_share, ENTERTAINMENT_BALANCE_SHARE) =>
        {
            Some("🎬 Cette dépense de loisirs est importante. Assurez-vous qu'elle en vaut vraiment la peine. ")
        }
        Some(SpendingCategory::Shopping) => {
            Some("🛍️ Avant d'acheter, demandez-vous si cet article est vraiment nécessaire. ")
        }
        Some(SpendingCategory::Transport) if expense > TRANSPORT_AMOUNT_LIMIT => {
            Some("🚗 Considérez les alternatives moins chères comme le transport en commun. ")
        }
        _ => None,
    };
    if let Some(tip) = category_tip {
        advice.push_str(tip);
    }

    let remaining = request
        .current_balance
        .checked_sub(expense)
        .ok_or_else(out_of_range)?;
    let floor = request
        .monthly_budget
        .checked_div(Decimal::TEN)
        .ok_or_else(out_of_range)?;
    if remaining < floor {
        advice.push_str(
            "🚨 ATTENTION: Après cette dépense, il vous restera très peu pour le reste du mois. ",
        );
        advice.push_str("Considérez reporter cette dépense si possible.");
    }

    Ok(advice)
}

fn out_of_range() -> Error {
    Error::Unexpected("Advice amounts out of range".to_string())
}
