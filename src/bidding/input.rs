//! Bid Input Module
//!
//! Parsing and formatting of the free-text bid amount field.

// == Parse ==
/// Parses a bid typed by the user, e.g. `"12,500"`.
///
/// Thousands separators are ignored. Anything other than ASCII digits
/// (signs, exponents, decimals) is rejected, as is empty input.
pub fn parse_bid_input(raw: &str) -> Option<f64> {
    let digits: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Digits only, so this never fails; long inputs lose precision instead
    digits.parse::<f64>().ok()
}

// == Format ==
/// Formats an amount with `,` thousands separators, dropping any fraction.
///
/// Non-finite and negative amounts render as `"0"`.
pub fn format_bid_amount(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 {
        return "0".to_string();
    }
    let whole = (amount.round() as u64).to_string();
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
