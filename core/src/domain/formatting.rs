//! Display formatting for bills, matching the product's French UI.

use chrono::{Datelike, NaiveDate};
use shared::BillStatus;

/// Format a `YYYY-MM-DD` date in the product's short French form,
/// e.g. `"2004-04-04"` -> `"4 Avr. 04"`.
///
/// An unparseable date falls back to the raw string so a corrupted record
/// still renders something.
pub fn format_date_for_display(date_str: &str) -> String {
    match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        Ok(date) => format!(
            "{} {} {:02}",
            date.day(),
            short_french_month(date.month()),
            date.year() % 100
        ),
        Err(_) => date_str.to_string(),
    }
}

/// Abbreviated French month name with trailing dot
fn short_french_month(month: u32) -> &'static str {
    match month {
        1 => "Jan.",
        2 => "Fév.",
        3 => "Mar.",
        4 => "Avr.",
        5 => "Mai.",
        6 => "Jui.",
        7 => "Jui.",
        8 => "Aoû.",
        9 => "Sep.",
        10 => "Oct.",
        11 => "Nov.",
        12 => "Déc.",
        _ => "Jan.",
    }
}

/// French label for a bill status
pub fn format_status(status: BillStatus) -> String {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
    .to_string()
}

/// Amount as rendered in the bills table, e.g. `400 €`
pub fn format_amount(amount: f64) -> String {
    format!("{} €", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_for_display() {
        assert_eq!(format_date_for_display("2004-04-04"), "4 Avr. 04");
        assert_eq!(format_date_for_display("2023-01-01"), "1 Jan. 23");
        assert_eq!(format_date_for_display("2010-06-15"), "15 Jui. 10");
        assert_eq!(format_date_for_display("2021-12-31"), "31 Déc. 21");
    }

    #[test]
    fn test_format_date_falls_back_to_raw_string() {
        assert_eq!(format_date_for_display("not-a-date"), "not-a-date");
        assert_eq!(format_date_for_display("2023-13-40"), "2023-13-40");
        assert_eq!(format_date_for_display(""), "");
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(BillStatus::Pending), "En attente");
        assert_eq!(format_status(BillStatus::Accepted), "Accepté");
        assert_eq!(format_status(BillStatus::Refused), "Refusé");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(400.0), "400 €");
        assert_eq!(format_amount(348.5), "348.5 €");
    }
}
