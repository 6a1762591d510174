pub mod panels;
pub mod plot;

/// `$1,234,567` – currency with thousands separators, no decimals.
pub fn usd_whole(value: f64) -> String {
    let n = value.round() as i64;
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// `$3.87` – currency with two decimals (income is in tens of thousands).
pub fn usd_cents(value: f64) -> String {
    format!("${value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_dollar_formatting_groups_thousands() {
        assert_eq!(usd_whole(0.0), "$0");
        assert_eq!(usd_whole(999.0), "$999");
        assert_eq!(usd_whole(1_000.0), "$1,000");
        assert_eq!(usd_whole(452_600.0), "$452,600");
        assert_eq!(usd_whole(500_001.0), "$500,001");
        assert_eq!(usd_whole(1_234_567.4), "$1,234,567");
    }

    #[test]
    fn income_formatting_keeps_two_decimals() {
        assert_eq!(usd_cents(8.3252), "$8.33");
        assert_eq!(usd_cents(2.0), "$2.00");
    }
}
