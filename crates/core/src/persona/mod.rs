//! Persona profile model
//!
//! The canonical in-memory shape the gift engine consumes. Wire formats are
//! normalized into this shape by [`record::PersonaRecord`] before the engine
//! ever sees them.

pub mod budget;
pub mod record;
pub mod stats;
pub mod traits;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder subject used when a persona has neither a name nor a role.
pub const GENERIC_SUBJECT: &str = "Kişi";

/// A person gifts are recommended for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub interests: Vec<String>,
    pub personality_traits: Vec<String>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub behavioral_insights: Option<String>,
    pub goals: Option<String>,
    pub challenges: Option<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub events: Vec<LifeEvent>,
}

/// A dated life event attached to a persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub title: String,
    pub description: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub event_type: Option<String>,
}

impl PersonaProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.personality_traits = traits.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_goals(mut self, goals: impl Into<String>) -> Self {
        self.goals = Some(goals.into());
        self
    }

    pub fn with_budget(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.budget_min = min;
        self.budget_max = max;
        self
    }

    pub fn with_event(mut self, event: LifeEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Name, else role. `None` when both are blank.
    pub fn subject_name(&self) -> Option<&str> {
        non_blank(self.name.as_deref()).or_else(|| non_blank(self.role.as_deref()))
    }

    /// Subject name with the generic placeholder as last resort.
    pub fn display_name(&self) -> &str {
        self.subject_name().unwrap_or(GENERIC_SUBJECT)
    }

    /// Notes, description, insights, goals and challenges joined into one text.
    pub fn free_text(&self) -> String {
        [
            self.notes.as_deref(),
            self.description.as_deref(),
            self.behavioral_insights.as_deref(),
            self.goals.as_deref(),
            self.challenges.as_deref(),
        ]
        .into_iter()
        .filter_map(non_blank)
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Up to `limit` events, most recent first. Undated events sort last.
    pub fn recent_events(&self, limit: usize) -> Vec<&LifeEvent> {
        let mut events = self.events.iter().collect::<Vec<_>>();
        events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        events.truncate(limit);
        events
    }
}

impl LifeEvent {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), description: None, occurred_at: None, event_type: None }
    }

    pub fn occurred_at(mut self, at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(at);
        self
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
