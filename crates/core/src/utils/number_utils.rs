use rust_decimal::{Decimal, RoundingStrategy};

/// `part / whole * 100`, or `None` when `whole` is zero or the result overflows.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}

/// Formats a value rounded to a whole number, half away from zero.
pub fn format_whole(value: Decimal) -> String {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// Formats a value without trailing zeros (`1500.00` becomes `1500`).
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}
