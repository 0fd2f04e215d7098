use chrono::{DateTime, Utc};

fn format_with_commas(digits: &str) -> String {
    let s = digits.chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

pub fn format_currency(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        return format!("{}{}", symbol, amount);
    }
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, format_with_commas(whole), cents)
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%a %b %d %Y").to_string()
}

pub fn format_optional_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}
