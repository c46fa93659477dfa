use chrono::NaiveDate;

use crate::ledger::range::DateRange;

/// Insert thousands separators into a run of ASCII digits
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an amount with two decimal places and thousands separators
pub fn format_amount(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let negative = whole.starts_with('-');
    let digits = whole.trim_start_matches('-');
    let grouped = group_digits(digits);

    if negative && (grouped != "0" || frac != "00") {
        format!("-{}.{}", grouped, frac)
    } else {
        format!("{}.{}", grouped, frac)
    }
}

pub fn format_money(currency_symbol: &str, value: f64) -> String {
    let formatted = format_amount(value);
    match formatted.strip_prefix('-') {
        Some(positive) => format!("-{}{}", currency_symbol, positive),
        None => format!("{}{}", currency_symbol, formatted),
    }
}

/// Plain number for quantities: no trailing ".0", at most two decimals
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Lower bound label of a report period
pub fn period_start(range: &DateRange) -> String {
    range.from.map_or_else(|| "start".to_string(), format_date)
}

/// Upper bound label of a report period; an open bound ends today
pub fn period_end(range: &DateRange, today: NaiveDate) -> String {
    format_date(range.to.unwrap_or(today))
}

/// `{client}_from-{from|start}_to-{to|today}.pdf`
pub fn report_filename(client_name: &str, range: &DateRange, today: NaiveDate) -> String {
    let client: String = client_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect();
    format!(
        "{}_from-{}_to-{}.pdf",
        client,
        period_start(range),
        period_end(range, today)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(1_000_000.0), "1,000,000.00");
        assert_eq!(format_amount(-2500.0), "-2,500.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn test_format_amount_beyond_i64() {
        assert_eq!(format_amount(1e19), "10,000,000,000,000,000,000.00");
        assert_eq!(format_amount(-2e19), "-20,000,000,000,000,000,000.00");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("0"), "0");
        assert_eq!(group_digits("999"), "999");
        assert_eq!(group_digits("1000"), "1,000");
        assert_eq!(group_digits("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_money_puts_sign_before_symbol() {
        assert_eq!(format_money("₹", 300.0), "₹300.00");
        assert_eq!(format_money("$", -45.5), "-$45.50");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.126), "1.13");
    }

    #[test]
    fn test_report_filename() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let open = DateRange::unbounded();
        assert_eq!(
            report_filename("Sharma", &open, today),
            "Sharma_from-start_to-2024-03-15.pdf"
        );

        let feb = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 1),
            NaiveDate::from_ymd_opt(2024, 2, 28),
        );
        assert_eq!(
            report_filename("A/B Traders", &feb, today),
            "A_B Traders_from-2024-02-01_to-2024-02-28.pdf"
        );
    }
}
