//! Wire-format persona records.
//!
//! Stored and transported personas arrive with mixed key spellings
//! (`birth_date` / `birthDate`, `budgetMin` / `min_budget` / `price_min`, ...),
//! text fields that are sometimes a string and sometimes a list, and budgets
//! typed in by hand. Everything is resolved here so the engine only ever sees a
//! [`PersonaProfile`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use super::budget::{parse_budget_value, to_number_loose, BudgetRange};
use super::{LifeEvent, PersonaProfile};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid persona id format: `{0}`")]
    InvalidId(String),
    #[error("persona record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonaRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    #[serde(alias = "birthDate", alias = "birthdate")]
    pub birth_date: Option<String>,
    pub interests: Option<TextField>,
    #[serde(alias = "personalityTraits", alias = "traits")]
    pub personality_traits: Option<TextField>,
    pub notes: Option<TextField>,
    pub description: Option<TextField>,
    #[serde(alias = "behavioralInsights")]
    pub behavioral_insights: Option<TextField>,
    pub goals: Option<TextField>,
    pub challenges: Option<TextField>,
    #[serde(
        alias = "budgetMin",
        alias = "min_budget",
        alias = "minBudget",
        alias = "price_min",
        alias = "minPrice"
    )]
    pub budget_min: Option<Value>,
    #[serde(
        alias = "budgetMax",
        alias = "max_budget",
        alias = "maxBudget",
        alias = "price_max",
        alias = "maxPrice"
    )]
    pub budget_max: Option<Value>,
    #[serde(alias = "priceRange", alias = "range")]
    pub budget: Option<Value>,
    pub events: Option<Vec<EventRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    #[serde(alias = "name")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "occurredAt", alias = "event_date", alias = "eventDate", alias = "date")]
    pub occurred_at: Option<String>,
    #[serde(rename = "type", alias = "event_type", alias = "eventType")]
    pub event_type: Option<String>,
}

/// A text field stored either as one string or as a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Text(String),
    Lines(Vec<Option<String>>),
}

impl TextField {
    fn into_lines(self) -> Vec<String> {
        match self {
            Self::Text(text) => vec![text],
            Self::Lines(lines) => lines.into_iter().flatten().collect(),
        }
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
    }

    /// Comma-separated strings are split into list entries.
    fn into_list(self) -> Vec<String> {
        match self {
            Self::Text(text) => text
                .split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect(),
            lines @ Self::Lines(_) => lines.into_lines(),
        }
    }

    fn into_text(self) -> Option<String> {
        let lines = self.into_lines();
        (!lines.is_empty()).then(|| lines.join("\n"))
    }
}

impl PersonaRecord {
    pub fn from_json_str(raw: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn into_profile(self) -> Result<PersonaProfile, RecordError> {
        let id = match self.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(raw) => {
                Some(Uuid::parse_str(raw).map_err(|_| RecordError::InvalidId(raw.to_string()))?)
            }
            None => None,
        };

        let budget = self.resolve_budget();
        let birth_date = self.birth_date.as_deref().and_then(parse_birth_date);

        Ok(PersonaProfile {
            id,
            name: self.name.map(|name| name.trim().to_string()),
            role: self.role.map(|role| role.trim().to_string()).filter(|role| !role.is_empty()),
            birth_date,
            interests: self.interests.map(TextField::into_list).unwrap_or_default(),
            personality_traits: self
                .personality_traits
                .map(TextField::into_list)
                .unwrap_or_default(),
            notes: self.notes.and_then(TextField::into_text),
            description: self.description.and_then(TextField::into_text),
            behavioral_insights: self.behavioral_insights.and_then(TextField::into_text),
            goals: self.goals.and_then(TextField::into_text),
            challenges: self.challenges.and_then(TextField::into_text),
            budget_min: budget.min,
            budget_max: budget.max,
            events: self
                .events
                .unwrap_or_default()
                .into_iter()
                .filter_map(EventRecord::into_event)
                .collect(),
        })
    }

    fn resolve_budget(&self) -> BudgetRange {
        let direct = BudgetRange {
            min: self.budget_min.as_ref().and_then(to_number_loose),
            max: self.budget_max.as_ref().and_then(to_number_loose),
        };
        if direct.min.is_some() || direct.max.is_some() {
            return direct;
        }
        self.budget.as_ref().map(parse_budget_value).unwrap_or_default()
    }
}

impl EventRecord {
    fn into_event(self) -> Option<LifeEvent> {
        let title =
            self.title.map(|title| title.trim().to_string()).filter(|title| !title.is_empty())?;
        Some(LifeEvent {
            title,
            description: self.description.filter(|text| !text.trim().is_empty()),
            occurred_at: self.occurred_at.as_deref().and_then(parse_timestamp),
            event_type: self.event_type,
        })
    }
}

/// Parses an object or an array of objects.
pub fn parse_records(raw: &str) -> Result<Vec<PersonaRecord>, RecordError> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(RecordError::from))
            .collect(),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp. Anything else degrades to
/// `None`.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            trimmed.get(..10).and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        });

    if parsed.is_none() {
        warn!(
            event_name = "persona.record.birth_date_unparseable",
            raw_value = trimmed,
            "ignoring unparseable birth date"
        );
    }
    parsed
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").ok().map(|dt| dt.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{parse_birth_date, parse_records, PersonaRecord, RecordError};

    #[test]
    fn camel_and_snake_case_spellings_resolve_to_one_shape() {
        let camel = PersonaRecord::from_json_str(
            r#"{
                "name": "Zeynep",
                "birthDate": "1990-05-17",
                "personalityTraits": ["Meraklı"],
                "behavioralInsights": "Hafta sonları kamp yapar",
                "budgetMin": "250 TL",
                "maxBudget": 1000
            }"#,
        )
        .and_then(PersonaRecord::into_profile)
        .expect("camelCase record");

        let snake = PersonaRecord::from_json_str(
            r#"{
                "name": "Zeynep",
                "birth_date": "1990-05-17T00:00:00Z",
                "personality_traits": ["Meraklı"],
                "behavioral_insights": ["Hafta sonları kamp yapar"],
                "budget": { "min": 250, "max": "1,000.00" }
            }"#,
        )
        .and_then(PersonaRecord::into_profile)
        .expect("snake_case record");

        assert_eq!(camel.birth_date, NaiveDate::from_ymd_opt(1990, 5, 17));
        assert_eq!(camel.birth_date, snake.birth_date);
        assert_eq!(camel.personality_traits, snake.personality_traits);
        assert_eq!(camel.behavioral_insights, snake.behavioral_insights);
        assert_eq!(camel.budget_min, Some(250.0));
        assert_eq!(camel.budget_max, Some(1000.0));
        assert_eq!(snake.budget_min, Some(250.0));
        assert_eq!(snake.budget_max, Some(1000.0));
    }

    #[test]
    fn null_lists_become_empty_and_strings_split() {
        let profile = PersonaRecord::from_json_str(
            r#"{ "name": "Can", "interests": "kitap, kahve ,", "personalityTraits": null }"#,
        )
        .and_then(PersonaRecord::into_profile)
        .expect("record");

        assert_eq!(profile.interests, vec!["kitap".to_string(), "kahve".to_string()]);
        assert!(profile.personality_traits.is_empty());
        assert!(profile.events.is_empty());
    }

    #[test]
    fn invalid_id_is_rejected() {
        let error = PersonaRecord::from_json_str(r#"{ "id": "not-a-uuid", "name": "Ece" }"#)
            .and_then(PersonaRecord::into_profile)
            .expect_err("invalid id");
        assert!(matches!(error, RecordError::InvalidId(ref id) if id == "not-a-uuid"));
    }

    #[test]
    fn unparseable_birth_date_degrades_to_none() {
        assert_eq!(parse_birth_date("31/12/1999"), None);
        assert_eq!(parse_birth_date(""), None);
        assert_eq!(parse_birth_date("2001-02-03"), NaiveDate::from_ymd_opt(2001, 2, 3));
    }

    #[test]
    fn events_keep_titled_entries_only() {
        let profile = PersonaRecord::from_json_str(
            r#"{
                "name": "Deniz",
                "events": [
                    { "title": "Mezuniyet", "occurredAt": "2024-06-01", "type": "milestone" },
                    { "title": "  ", "date": "2024-07-01" }
                ]
            }"#,
        )
        .and_then(PersonaRecord::into_profile)
        .expect("record");

        assert_eq!(profile.events.len(), 1);
        assert_eq!(profile.events[0].event_type.as_deref(), Some("milestone"));
        assert!(profile.events[0].occurred_at.is_some());
    }

    #[test]
    fn arrays_and_single_objects_both_parse() {
        assert_eq!(parse_records(r#"[{"name":"A"},{"name":"B"}]"#).map(|r| r.len()).ok(), Some(2));
        assert_eq!(parse_records(r#"{"role":"Komşu"}"#).map(|r| r.len()).ok(), Some(1));
    }
}
