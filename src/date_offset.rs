//! Preparation-date auto-fill.
//!
//! Orders are assembled two days before pickup: editing the pickup date
//! fills the preparation date with pickup − 2 days. Clearing (or an
//! unparsable value) clears the output.

use chrono::{Days, NaiveDate};
use web_sys::HtmlInputElement;

use crate::dom;

const PREPARATION_OFFSET_DAYS: u64 = 2;
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn init() {
    let Some(retrait) = dom::by_id_typed::<HtmlInputElement>("date-retrait") else {
        return;
    };
    let Some(preparation) = dom::by_id_typed::<HtmlInputElement>("date-preparation") else {
        return;
    };

    let retrait2 = retrait.clone();
    dom::listen(&retrait, "change", move |_| {
        match preparation_date(&retrait2.value()) {
            Some(date) => preparation.set_value(&date),
            None => preparation.set_value(""),
        }
    });
}

/// Pickup date − 2 days, ISO formatted. `None` for empty or invalid input.
pub fn preparation_date(retrait: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(retrait.trim(), DATE_FORMAT).ok()?;
    let prepared = date.checked_sub_days(Days::new(PREPARATION_OFFSET_DAYS))?;
    Some(prepared.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_days_before_pickup() {
        assert_eq!(preparation_date("2024-03-10").as_deref(), Some("2024-03-08"));
    }

    #[test]
    fn crosses_month_boundaries() {
        assert_eq!(preparation_date("2024-03-01").as_deref(), Some("2024-02-28"));
        assert_eq!(preparation_date("2023-01-01").as_deref(), Some("2022-12-30"));
    }

    #[test]
    fn cleared_or_invalid_input_clears_output() {
        assert_eq!(preparation_date(""), None);
        assert_eq!(preparation_date("demain"), None);
        assert_eq!(preparation_date("2024-13-40"), None);
    }
}
