// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Storefront Metrics Engine - Display Formatting

//! Number formatting shared by the model assemblers.

/// Round to one decimal place.
pub fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A [0, 1] rate as a percentage with one decimal (0.011995 -> 1.2).
pub fn percent(rate: f64) -> f64 {
    one_decimal(rate * 100.0)
}

/// `part / whole` as a one-decimal percentage; zero when `whole` is zero.
pub fn share_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        percent(part as f64 / whole as f64)
    }
}

/// Integer with thousands separators: 78331 -> "78,331".
pub fn grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount: 78331 -> "$78,331", -1200 -> "-$1,200".
pub fn currency(amount: i64) -> String {
    if amount < 0 {
        format!("-${}", grouped(amount.unsigned_abs()))
    } else {
        format!("${}", grouped(amount as u64))
    }
}

/// Short form for large counts: 950 -> "950", 78331 -> "78.3K", 1260000 -> "1.3M".
pub fn compact(value: u64) -> String {
    let v = value as f64;
    if value >= 1_000_000 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Relative change as a signed whole percentage: (100, 164) -> "+64%".
pub fn signed_change(from: f64, to: f64) -> String {
    if from == 0.0 {
        return "n/a".to_string();
    }
    let change = ((to - from) / from * 100.0).round();
    if change >= 0.0 {
        format!("+{change:.0}%")
    } else {
        format!("{change:.0}%")
    }
}
