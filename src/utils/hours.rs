use rust_decimal::{Decimal, RoundingStrategy};

/// Hours are stored with exactly two decimal places.
pub const HOURS_SCALE: u32 = 2;

/// Rounds half-up (away from zero on ties) to two places and pins the scale,
/// so `56` comes back as `56.00`.
pub fn round_hours(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(HOURS_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(HOURS_SCALE);
    rounded
}

pub fn zero_hours() -> Decimal {
    Decimal::new(0, HOURS_SCALE)
}
