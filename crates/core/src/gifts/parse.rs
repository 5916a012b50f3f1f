//! Reads list items out of free-form completion text.

use std::collections::HashSet;

use super::types::ParsedSuggestion;
use crate::errors::ParseAmbiguity;

const SEPARATORS: &[&str] = &[" - ", " – ", " — ", ": "];
const BULLETS: &[char] = &['-', '*', '•'];
const MAX_ORDINAL_DIGITS: usize = 3;

/// Picks up to `limit` items written as `1. Title - Reason`, `1) ...` or
/// bulleted lines. Anything else, such as an intro sentence, is skipped.
/// Titles repeated case-insensitively are dropped.
pub fn parse_suggestions(
    text: &str,
    limit: usize,
) -> Result<Vec<ParsedSuggestion>, ParseAmbiguity> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    let mut seen = HashSet::new();
    let mut non_empty_lines = 0;

    for raw in text.lines() {
        let line = strip_strong_markup(raw);
        let line = line.trim().trim_start_matches('#').trim();
        if line.is_empty() {
            continue;
        }
        non_empty_lines += 1;

        let Some(body) = list_item_body(line) else {
            continue;
        };
        let Some(item) = split_item(&body.replace('*', "")) else {
            continue;
        };
        if seen.insert(item.title.to_lowercase()) {
            items.push(item);
            if items.len() >= limit {
                break;
            }
        }
    }

    if items.is_empty() {
        return Err(ParseAmbiguity { non_empty_lines });
    }
    Ok(items)
}

fn strip_strong_markup(line: &str) -> String {
    line.replace("**", "").replace("__", "").replace('`', "")
}

fn list_item_body(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix(BULLETS) {
        return has_text(rest.trim());
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || digits > MAX_ORDINAL_DIGITS {
        return None;
    }
    let rest = &line[digits..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    // "1.5 kg" is a quantity, not an ordinal
    if rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    has_text(rest.trim())
}

fn has_text(rest: &str) -> Option<&str> {
    rest.chars().any(char::is_alphanumeric).then_some(rest)
}

fn split_item(body: &str) -> Option<ParsedSuggestion> {
    let split = SEPARATORS
        .iter()
        .filter_map(|separator| body.find(separator).map(|at| (at, separator.len())))
        .min_by_key(|(at, _)| *at);

    let (title, reason) = match split {
        Some((at, len)) => (&body[..at], Some(&body[at + len..])),
        None => (body, None),
    };

    let title = clean(title);
    if title.is_empty() {
        return None;
    }
    let reason = reason.map(clean).filter(|reason| !reason.is_empty());
    Some(ParsedSuggestion { title, reason })
}

fn clean(text: &str) -> String {
    text.trim().trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”')).trim().to_string()
}
