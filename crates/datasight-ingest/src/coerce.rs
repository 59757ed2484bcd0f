//! Cell coercion to numbers and booleans.

/// Recognized boolean vocabularies, each as `(true_token, false_token)`.
pub const BOOLEAN_PAIRS: &[(&str, &str)] = &[
    ("true", "false"),
    ("yes", "no"),
    ("y", "n"),
    ("t", "f"),
    ("1", "0"),
    ("on", "off"),
];

const CURRENCY_PREFIXES: &[char] = &['$', '€', '£', '¥'];

/// Parse a cell as a finite number.
///
/// Accepts a leading currency symbol, thousands separators in groups of
/// three, a trailing percent sign and accounting-style parentheses for
/// negatives. `inf` and `nan` spellings are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let mut value = raw.trim();
    if value.is_empty() {
        return None;
    }
    let mut negative = false;
    if let Some(inner) = value.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        negative = true;
        value = inner.trim();
    }
    if let Some(rest) = value.strip_prefix('-') {
        negative = !negative;
        value = rest.trim_start();
    } else if let Some(rest) = value.strip_prefix('+') {
        value = rest.trim_start();
    }
    value = value.trim_start_matches(CURRENCY_PREFIXES).trim_start();
    value = value.strip_suffix('%').map_or(value, str::trim_end);
    if !value.bytes().any(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let cleaned = strip_thousands(value)?;
    let parsed: f64 = cleaned.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    Some(if negative { -parsed } else { parsed })
}

fn strip_thousands(value: &str) -> Option<String> {
    if !value.contains(',') {
        return Some(value.to_string());
    }
    let (integer, fraction) = match value.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (value, None),
    };
    let mut groups = integer.split(',');
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 || !head.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let mut cleaned = head.to_string();
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        cleaned.push_str(group);
    }
    if let Some(fraction) = fraction {
        cleaned.push('.');
        cleaned.push_str(fraction);
    }
    Some(cleaned)
}

/// Lower-cased, trimmed token used for vocabulary checks.
pub fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Index of the boolean pair containing `token` and the side it is on.
pub fn boolean_token(token: &str) -> Option<(usize, bool)> {
    let normalized = normalize_token(token);
    BOOLEAN_PAIRS
        .iter()
        .enumerate()
        .find_map(|(idx, (yes, no))| {
            if normalized == *yes {
                Some((idx, true))
            } else if normalized == *no {
                Some((idx, false))
            } else {
                None
            }
        })
}

/// Parse a cell as a boolean using any recognized vocabulary.
pub fn parse_bool(raw: &str) -> Option<bool> {
    boolean_token(raw).map(|(_, value)| value)
}
