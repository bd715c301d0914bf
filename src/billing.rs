use std::fmt;

use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use strum_macros::{Display, EnumString};

#[derive(
    Display,
    EnumString,
    Debug,
    Default,
    PartialEq,
    Clone,
    Copy,
)]
#[strum(ascii_case_insensitive)]
pub enum Currency {
    #[strum(serialize = "CAD", to_string = "CA$")]
    Cad,
    #[default]
    #[strum(serialize = "USD", to_string = "$")]
    Usd,
    #[strum(serialize = "EUR", to_string = "€")]
    Eur,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Money(Currency, Decimal);

impl Money {
    /// Amounts are kept to the cent; `None` if the amount is negative or
    /// too large to print with digit grouping.
    pub fn new(currency: Currency, amount: Decimal) -> Option<Self> {
        let amount = amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        if amount.is_sign_negative() || amount.trunc().to_u64().is_none() {
            return None;
        }
        Some(Self(currency, amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let whole = self.1.trunc();
        let cents = ((self.1 - whole) * Decimal::ONE_HUNDRED)
            .to_u32()
            .unwrap_or_default();
        let whole = whole.to_u64().unwrap_or_default();
        write!(
            f,
            "{}{}.{:02}",
            self.0,
            whole.to_formatted_string(&Locale::en),
            cents
        )
    }
}
