//! Result container for accumulating and deduplicating candidates

use super::types::*;
use std::collections::HashSet;

/// Accumulates the candidates of one search run
///
/// Candidates are keyed by profile link. The first sighting of a link is
/// kept and later sightings are dropped, so insertion order is the output
/// order.
#[derive(Debug, Clone, Default)]
pub struct ResultContainer {
    candidates: Vec<Candidate>,
    seen_links: HashSet<String>,
    failures: Vec<MonthFailure>,
    timings: Vec<MonthTiming>,
    duplicates: usize,
}

impl ResultContainer {
    /// Create a new empty result container
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate unless its link was already seen
    ///
    /// Returns `true` when the candidate was kept.
    pub fn add_candidate(&mut self, candidate: Candidate) -> bool {
        if self.seen_links.insert(candidate.link.clone()) {
            self.candidates.push(candidate);
            true
        } else {
            self.duplicates += 1;
            false
        }
    }

    /// Add multiple candidates
    pub fn extend_candidates(&mut self, candidates: impl IntoIterator<Item = Candidate>) {
        for candidate in candidates {
            self.add_candidate(candidate);
        }
    }

    /// Record a month whose provider call failed
    pub fn add_failure(&mut self, failure: MonthFailure) {
        self.failures.push(failure);
    }

    /// Record provider timing for a month
    pub fn add_timing(&mut self, timing: MonthTiming) {
        self.timings.push(timing);
    }

    /// Number of candidates dropped as duplicates
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }

    /// Split the container into its candidates, failures and timings
    pub fn into_parts(self) -> (Vec<Candidate>, Vec<MonthFailure>, Vec<MonthTiming>) {
        (self.candidates, self.failures, self.timings)
    }
}

/// Stable deduplication by profile link, first occurrence retained
pub fn deduplicate(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut container = ResultContainer::new();
    container.extend_candidates(candidates);
    container.candidates
}
