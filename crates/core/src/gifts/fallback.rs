//! Padding and final selection of candidates.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::matcher::{normalize, push_unique};
use super::types::{Candidate, CandidateSource};

/// Lists used to top up a short candidate list.
#[derive(Debug, Clone, Copy)]
pub struct PaddingSources<'a> {
    /// Defaults for the persona's age bucket
    pub age_defaults: &'a [String],
    pub generic: &'a [String],
    /// Titles that must not be appended, e.g. ones already chosen upstream
    pub reserved: &'a [String],
}

/// Appends shuffled age-bucket defaults, then shuffled generic gifts, until
/// `min_count` candidates are present or both lists run dry.
pub fn fill_to_minimum<R>(
    candidates: &mut Vec<Candidate>,
    sources: PaddingSources<'_>,
    min_count: usize,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    let mut seen = candidates
        .iter()
        .map(|candidate| normalize(&candidate.title))
        .chain(sources.reserved.iter().map(|title| normalize(title)))
        .collect::<HashSet<_>>();

    let lists = [
        (sources.age_defaults, CandidateSource::AgeDefault),
        (sources.generic, CandidateSource::Generic),
    ];
    for (list, source) in lists {
        if candidates.len() >= min_count {
            return;
        }
        let mut shuffled = list.iter().collect::<Vec<_>>();
        shuffled.shuffle(rng);
        for title in shuffled {
            if candidates.len() >= min_count {
                return;
            }
            push_unique(candidates, &mut seen, Candidate::new(title.clone(), source.clone()));
        }
    }
}

/// Keeps franchise candidates at the front in their original order, shuffles
/// the rest and cuts the list to `target`.
pub fn select<R>(candidates: Vec<Candidate>, target: usize, rng: &mut R) -> Vec<Candidate>
where
    R: Rng + ?Sized,
{
    let (mut selected, mut rest): (Vec<_>, Vec<_>) =
        candidates.into_iter().partition(Candidate::is_franchise);
    rest.shuffle(rng);
    selected.extend(rest);
    selected.truncate(target);
    selected
}
