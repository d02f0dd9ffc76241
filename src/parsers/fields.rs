use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::UNKNOWN;

/// First run of digits, dots and slashes in a weight label like "1/8 oz -".
static WEIGHT_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\d/.]+").expect("Invalid weight token regex"));

/// Restricted grammar for the token itself: decimal number or integer fraction.
static WEIGHT_VALUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+)/(\d+)|(\d+(?:\.\d+)?))$").expect("Invalid weight value regex")
});

static THC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"THC:\s*([0-9.]+)%").expect("Invalid THC regex"));

static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("Invalid number regex"));

/// Parse a percentage string like "23.4%" into its numeric value.
pub fn parse_percentage(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let stripped = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    if stripped.is_empty() {
        return None;
    }
    stripped.parse::<f64>().ok()
}

/// Extract the numeric part of a weight label. Fractions are divided out
/// directly ("1/8 oz -" becomes 0.125); the token grammar is restricted so
/// arbitrary page text is never evaluated as arithmetic.
pub fn parse_weight(text: &str) -> Option<f64> {
    let token = WEIGHT_TOKEN_REGEX.find(text)?.as_str();
    let caps = WEIGHT_VALUE_REGEX.captures(token)?;
    if let (Some(num), Some(den)) = (caps.get(1), caps.get(2)) {
        let num: f64 = num.as_str().parse().ok()?;
        let den: f64 = den.as_str().parse().ok()?;
        if den == 0.0 {
            return None;
        }
        Some(num / den)
    } else {
        caps.get(3)?.as_str().parse().ok()
    }
}

/// Parse a price string like "$45.00" into its decimal amount.
pub fn parse_price(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let stripped = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    if stripped.is_empty() {
        return None;
    }
    stripped.parse::<f64>().ok()
}

/// Split a composite detail string like "Indica-Hybrid • THC: 28.1%" into a
/// strain label and a THC percentage. Without the delimiter the strain is
/// unknown and no potency is reported.
pub fn parse_composite_detail(text: &str) -> (String, Option<f64>) {
    match text.split_once('•') {
        Some((strain, rest)) => {
            let potency = THC_REGEX
                .captures(rest)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok());
            (strain.trim().to_string(), potency)
        }
        None => (UNKNOWN.to_string(), None),
    }
}

/// Pull the numeric value out of a discrete potency field like "THC: 30.69%".
pub fn parse_potency_label(text: &str) -> Option<f64> {
    NUMBER_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
