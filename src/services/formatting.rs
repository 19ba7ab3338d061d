use chrono::{Locale, NaiveDate, NaiveTime, TimeZone, Utc};

pub const CURRENCY: &str = "FCFA";

/// Groups thousands with a plain space: `1500000` -> `1 500 000`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

pub fn format_price(amount: u64) -> String {
    format!("{} {CURRENCY}", format_amount(amount))
}

/// French long form, e.g. `lundi 15 septembre 2025`.
pub fn format_long_date(date: NaiveDate) -> String {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .format_localized("%A %-d %B %Y", Locale::fr_FR)
        .to_string()
}

pub fn format_capacity(capacity: u32) -> String {
    if capacity == 1 {
        "1 personne".to_string()
    } else {
        format!("{capacity} personnes")
    }
}
