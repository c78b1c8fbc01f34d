//! Display formatting helpers

/// Format a number with thousands separators and a fixed number of decimals.
pub fn format_amount(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format an optional amount, rendering absence as an em-dash placeholder.
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format_amount(v, decimals),
        None => "—".to_string(),
    }
}

/// Format an optional USD amount (`$1,234.56` or the placeholder).
pub fn format_usd(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}", format_amount(v, 2)),
        None => "—".to_string(),
    }
}
