use rust_decimal::Decimal;

use crate::types::errors::ScheduleError;

/// Number of price-range brackets in the commission schedule.
pub const TIER_COUNT: usize = 3;

/// A commission bracket, determined by unit price.
///
/// The three ranges are contiguous, non-overlapping, and exhaustive over
/// non-negative prices: [0, 10) at 6%, [10, 100) at 3%, [100, inf) at 1.5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    UnderTen,
    UnderHundred,
    HundredPlus
}

impl Tier {
    pub const ALL: [Tier; TIER_COUNT] = [Tier::UnderTen, Tier::UnderHundred, Tier::HundredPlus];

    /// Classifies a unit price into its bracket.
    ///
    /// # Errors
    /// Returns `ScheduleError::NegativeUnitPrice` for prices below zero; the
    /// schedule is undefined there.
    pub fn classify(unit_price: Decimal) -> Result<Tier, ScheduleError> {
        if unit_price < Decimal::ZERO {
            return Err(ScheduleError::NegativeUnitPrice { unit_price });
        }

        if unit_price < Decimal::TEN {
            Ok(Tier::UnderTen)
        } else if unit_price < Decimal::ONE_HUNDRED {
            Ok(Tier::UnderHundred)
        } else {
            Ok(Tier::HundredPlus)
        }
    }

    /// Position of this bracket in per-tier accumulator arrays.
    pub fn index(self) -> usize {
        match self {
            Tier::UnderTen => 0,
            Tier::UnderHundred => 1,
            Tier::HundredPlus => 2
        }
    }

    /// Commission rate applied to this bracket's net sales.
    pub fn rate(self) -> Decimal {
        match self {
            Tier::UnderTen => Decimal::new(6, 2),
            Tier::UnderHundred => Decimal::new(3, 2),
            Tier::HundredPlus => Decimal::new(15, 3)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::UnderTen => "6% Bracket",
            Tier::UnderHundred => "3% Bracket",
            Tier::HundredPlus => "1.5% Bracket"
        }
    }
}

/// Flat rate for manually deducted out-of-department sales.
pub fn out_of_dept_rate() -> Decimal {
    Decimal::new(1, 2)
}

/// Flat rate for extended service plans, which bypass the brackets.
pub fn service_plan_rate() -> Decimal {
    Decimal::new(1, 1)
}
