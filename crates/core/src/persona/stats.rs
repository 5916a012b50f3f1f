//! Aggregate statistics over a user's personas.

use serde::Serialize;

use super::PersonaProfile;
use crate::gifts::taxonomy::GIFT_CATEGORIES;

const POPULAR_INTEREST_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaStats {
    pub total_personas: usize,
    pub total_interests: usize,
    pub total_notes: usize,
    pub average_interests_per_persona: f64,
    pub average_notes_per_persona: f64,
    pub popular_interests: Vec<InterestCount>,
    pub available_categories: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestCount {
    pub interest: String,
    pub count: usize,
}

impl PersonaStats {
    pub fn compute(personas: &[PersonaProfile]) -> Self {
        let total_personas = personas.len();
        let total_interests = personas.iter().map(|persona| persona.interests.len()).sum();
        let total_notes = personas.iter().map(note_count).sum();

        // Insertion order is kept so that ties rank by first appearance.
        let mut counts: Vec<InterestCount> = Vec::new();
        for interest in personas.iter().flat_map(|persona| persona.interests.iter()) {
            match counts.iter_mut().find(|entry| entry.interest == *interest) {
                Some(entry) => entry.count += 1,
                None => counts.push(InterestCount { interest: interest.clone(), count: 1 }),
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(POPULAR_INTEREST_LIMIT);

        Self {
            total_personas,
            total_interests,
            total_notes,
            average_interests_per_persona: average(total_interests, total_personas),
            average_notes_per_persona: average(total_notes, total_personas),
            popular_interests: counts,
            available_categories: GIFT_CATEGORIES.len(),
        }
    }
}

fn note_count(persona: &PersonaProfile) -> usize {
    persona
        .notes
        .as_deref()
        .map(|notes| notes.lines().filter(|line| !line.trim().is_empty()).count())
        .unwrap_or(0)
}

fn average(total: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (total as f64 / count as f64 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::PersonaStats;
    use crate::persona::PersonaProfile;

    #[test]
    fn empty_input_has_zero_averages() {
        let stats = PersonaStats::compute(&[]);
        assert_eq!(stats.total_personas, 0);
        assert_eq!(stats.average_interests_per_persona, 0.0);
        assert!(stats.popular_interests.is_empty());
        assert_eq!(stats.available_categories, 10);
    }

    #[test]
    fn popular_interests_rank_by_count_then_first_seen() {
        let personas = vec![
            PersonaProfile::new("A").with_interests(["yoga", "kahve"]).with_notes("not 1\nnot 2"),
            PersonaProfile::new("B").with_interests(["kahve", "müzik"]),
            PersonaProfile::new("C").with_interests(["müzik", "kahve", "seyahat"]),
        ];

        let stats = PersonaStats::compute(&personas);
        assert_eq!(stats.total_interests, 7);
        assert_eq!(stats.total_notes, 2);
        assert_eq!(stats.average_interests_per_persona, 2.33);
        assert_eq!(stats.average_notes_per_persona, 0.67);

        let ranked = stats
            .popular_interests
            .iter()
            .map(|entry| (entry.interest.as_str(), entry.count))
            .collect::<Vec<_>>();
        assert_eq!(ranked, vec![("kahve", 3), ("müzik", 2), ("yoga", 1), ("seyahat", 1)]);
    }
}
