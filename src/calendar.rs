use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};

/// The calendar month an invoice is issued for.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct BillingMonth {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl BillingMonth {
    /// Month containing `date`, `None` only at the edge of chrono's range.
    pub fn containing(date: NaiveDate) -> Option<Self> {
        let first = date.with_day(1)?;
        let last = first
            .checked_add_months(Months::new(1))?
            .checked_sub_days(Days::new(1))?;
        Some(Self { first, last })
    }

    pub fn days(&self) -> u32 {
        self.last.day()
    }

    /// Full month name, e.g. "March".
    pub fn name(&self) -> String {
        self.first.format("%B").to_string()
    }

    /// `YYYYMM`, the suffix of every invoice number issued this month.
    pub fn year_month(&self) -> String {
        self.first.format("%Y%m").to_string()
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.first.format("%B %-d, %Y"),
            self.last.format("%B %-d, %Y")
        )
    }
}
