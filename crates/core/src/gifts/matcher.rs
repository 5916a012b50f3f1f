//! Keyword matching of persona fields against the taxonomy.
//!
//! Matching is deliberately permissive: a keyword hits a field when either
//! normalized string contains the other, so "kitap okuma" hits `kitap` and a
//! short interest like "yog" hits `yoga`. Hits are tagged [`MatchKind::Exact`]
//! or [`MatchKind::Substring`] so callers can tell them apart.

use std::collections::HashSet;

use super::taxonomy::{FranchiseEntry, TaxonomyEntry};
use super::types::{Candidate, CandidateSource, MatchKind};
use crate::persona::PersonaProfile;

/// A normalized persona field ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchField {
    pub text: String,
    pub origin: FieldOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOrigin {
    /// One interest entry, original spelling kept for reasoning text
    Interest(String),
    /// Notes, description, insights, goals and challenges concatenated
    FreeText,
}

/// A franchise the persona mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedFranchise {
    pub franchise: String,
    pub keyword: String,
}

/// Lowercase and trim. Turkish dotted capital I folds to a plain `i`.
pub fn normalize(text: &str) -> String {
    text.trim().replace('İ', "i").to_lowercase()
}

/// Interest entries one by one, then the free-text fields as a single field.
/// Blank fields are dropped.
pub fn persona_fields(persona: &PersonaProfile) -> Vec<MatchField> {
    let mut fields = persona
        .interests
        .iter()
        .map(|interest| MatchField {
            text: normalize(interest),
            origin: FieldOrigin::Interest(interest.trim().to_string()),
        })
        .filter(|field| !field.text.is_empty())
        .collect::<Vec<_>>();

    let free_text = normalize(&persona.free_text());
    if !free_text.is_empty() {
        fields.push(MatchField { text: free_text, origin: FieldOrigin::FreeText });
    }
    fields
}

/// Bidirectional containment test on already-normalized strings.
pub fn match_kind(field: &str, keyword: &str) -> Option<MatchKind> {
    if field.is_empty() || keyword.is_empty() {
        return None;
    }
    if field == keyword {
        Some(MatchKind::Exact)
    } else if field.contains(keyword) || keyword.contains(field) {
        Some(MatchKind::Substring)
    } else {
        None
    }
}

/// Union of the gifts under every keyword that hits any field, first
/// occurrence wins.
pub fn match_candidates(fields: &[MatchField], entries: &[TaxonomyEntry]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut seen = HashSet::new();

    for field in fields {
        for entry in entries {
            let keyword = normalize(&entry.keyword);
            let Some(kind) = match_kind(&field.text, &keyword) else {
                continue;
            };
            let source = match &field.origin {
                FieldOrigin::Interest(interest) => CandidateSource::Interest {
                    interest: interest.clone(),
                    keyword: keyword.clone(),
                    kind,
                },
                FieldOrigin::FreeText => {
                    CandidateSource::FreeText { keyword: keyword.clone(), kind }
                }
            };
            for gift in &entry.gifts {
                let candidate = Candidate::new(gift.clone(), source.clone());
                push_unique(&mut candidates, &mut seen, candidate);
            }
        }
    }

    candidates
}

/// Franchises hit by any field, in order of first hit, one entry per franchise.
pub fn recognize_franchises(
    fields: &[MatchField],
    entries: &[FranchiseEntry],
) -> Vec<RecognizedFranchise> {
    let mut recognized: Vec<RecognizedFranchise> = Vec::new();
    for field in fields {
        for entry in entries {
            let keyword = normalize(&entry.keyword);
            if match_kind(&field.text, &keyword).is_none() {
                continue;
            }
            if recognized.iter().all(|known| known.franchise != entry.franchise) {
                let franchise = entry.franchise.clone();
                recognized.push(RecognizedFranchise { franchise, keyword });
            }
        }
    }
    recognized
}

/// Franchise gifts, interleaved so every recognized franchise gets a slot
/// before any franchise gets a second one.
pub fn match_franchises(fields: &[MatchField], entries: &[FranchiseEntry]) -> Vec<Candidate> {
    let recognized = recognize_franchises(fields, entries);

    let per_franchise = recognized
        .iter()
        .map(|known| {
            let mut gifts: Vec<&String> = Vec::new();
            for entry in entries.iter().filter(|entry| entry.franchise == known.franchise) {
                for gift in &entry.gifts {
                    if !gifts.contains(&gift) {
                        gifts.push(gift);
                    }
                }
            }
            (known, gifts)
        })
        .collect::<Vec<_>>();

    let mut candidates = Vec::new();
    let mut seen = HashSet::new();
    let rounds = per_franchise.iter().map(|(_, gifts)| gifts.len()).max().unwrap_or(0);
    for round in 0..rounds {
        for (known, gifts) in &per_franchise {
            if let Some(gift) = gifts.get(round) {
                let source = CandidateSource::Franchise {
                    franchise: known.franchise.clone(),
                    keyword: known.keyword.clone(),
                };
                push_unique(&mut candidates, &mut seen, Candidate::new((*gift).clone(), source));
            }
        }
    }
    candidates
}

/// Appends unless a candidate with the same normalized title is present.
pub(crate) fn push_unique(
    candidates: &mut Vec<Candidate>,
    seen: &mut HashSet<String>,
    candidate: Candidate,
) -> bool {
    if seen.insert(normalize(&candidate.title)) {
        candidates.push(candidate);
        true
    } else {
        false
    }
}
