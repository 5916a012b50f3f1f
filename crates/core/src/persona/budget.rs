//! Loose budget parsing for user-entered amounts.

use serde_json::Value;

const CURRENCY_SYMBOLS: [char; 5] = ['₺', '₤', '$', '€', '£'];
const RANGE_DASHES: [char; 3] = ['-', '–', '—'];

/// Parsed budget bounds. Either side may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BudgetRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Converts a JSON number or a formatted string (`"1.500 TL"`, `"₺250"`,
/// `"99,90"`) into a number. Ranges such as `"100-200"` are not single numbers
/// and yield `None`.
pub fn to_number_loose(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|n| n.is_finite()),
        Value::String(raw) => parse_amount(raw),
        _ => None,
    }
}

/// Parses an amount string. Empty input yields `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let stripped = strip_currency(raw);
    if stripped.is_empty() {
        return None;
    }
    if split_range(&stripped).is_some() {
        return None;
    }

    let mut cleaned = stripped
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, ',' | '.' | '-'))
        .collect::<String>();

    if cleaned.contains(',') && cleaned.contains('.') {
        cleaned = cleaned.replace(',', "");
    } else if cleaned.contains(',') {
        cleaned = cleaned.replace(',', ".");
    }

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses `"100-200"` style ranges (hyphen, en dash or em dash).
pub fn parse_range(raw: &str) -> Option<BudgetRange> {
    let stripped = strip_currency(raw);
    let (low, high) = split_range(&stripped)?;
    let min = parse_amount(low)?;
    let max = parse_amount(high)?;
    Some(BudgetRange { min: Some(min), max: Some(max) })
}

/// Reads the bounds out of a nested budget object (`min`/`lower`/`start`,
/// `max`/`upper`/`end`) or a range string.
pub fn parse_budget_value(value: &Value) -> BudgetRange {
    match value {
        Value::Object(map) => {
            let pick = |keys: &[&str]| {
                keys.iter()
                    .find_map(|key| map.get(*key).filter(|v| !v.is_null()))
                    .and_then(to_number_loose)
            };
            BudgetRange {
                min: pick(&["min", "lower", "start"]),
                max: pick(&["max", "upper", "end"]),
            }
        }
        Value::String(raw) => parse_range(raw).unwrap_or_default(),
        _ => BudgetRange::default(),
    }
}

fn strip_currency(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    for code in ["TRY", "TL"] {
        text = remove_case_insensitive(&text, code);
    }
    text.chars().filter(|ch| !CURRENCY_SYMBOLS.contains(ch) && !ch.is_whitespace()).collect()
}

fn remove_case_insensitive(text: &str, needle: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        let matches = rest
            .get(..needle.len())
            .map(|head| head.eq_ignore_ascii_case(needle))
            .unwrap_or(false);
        if matches {
            rest = &rest[needle.len()..];
            continue;
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            output.push(ch);
        }
        rest = chars.as_str();
    }
    output
}

// A leading minus sign is a sign, not a separator.
fn split_range(text: &str) -> Option<(&str, &str)> {
    let (index, dash) = text.char_indices().skip(1).find(|(_, ch)| RANGE_DASHES.contains(ch))?;
    let low = &text[..index];
    let high = &text[index + dash.len_utf8()..];
    let numeric = |part: &str| {
        !part.is_empty()
            && part.chars().all(|ch| ch.is_ascii_digit() || matches!(ch, ',' | '.' | '-'))
    };
    (numeric(low) && numeric(high)).then_some((low, high))
}
