//! Classification of verification-query results.
//!
//! This is a manual acceptance check: outcomes are printed for a human, but
//! the classification itself is pure so it can be tested directly.

use std::fmt;

use kbseed_vector_index::QueryMatch;

/// What the top match of a single verification query showed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The expected article was the top result.
    Match,

    /// A different record ranked first.
    Mismatch { actual: String },

    /// The query returned no matches at all.
    NoResults,
}

/// Classify a result list against the expected record id.
pub fn classify(matches: &[QueryMatch], expected_id: &str) -> Outcome {
    match matches.first() {
        None => Outcome::NoResults,
        Some(top) if top.id == expected_id => Outcome::Match,
        Some(top) => Outcome::Mismatch {
            actual: top.id.clone(),
        },
    }
}

/// Per-query report shown to the operator.
#[derive(Debug, Clone)]
pub struct QueryReport {
    /// The query text.
    pub query: String,

    /// Title stored with the top match, when present.
    pub top_title: Option<String>,

    /// Score of the top match.
    pub top_score: Option<f32>,

    /// Classified outcome.
    pub outcome: Outcome,
}

impl QueryReport {
    /// Build a report from the raw matches of one query.
    pub fn new(query: impl Into<String>, matches: &[QueryMatch], expected_id: &str) -> Self {
        let top = matches.first();
        Self {
            query: query.into(),
            top_title: top
                .and_then(|m| m.metadata.as_ref())
                .map(|m| m.title.clone()),
            top_score: top.map(|m| m.score),
            outcome: classify(matches, expected_id),
        }
    }
}

impl fmt::Display for QueryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Query: '{}'", self.query)?;
        match (&self.top_title, self.top_score) {
            (Some(title), Some(score)) => {
                writeln!(f, "  Top result: {title}")?;
                writeln!(f, "  Score: {score:.4}")?;
            }
            (None, Some(score)) => writeln!(f, "  Top result score: {score:.4}")?,
            _ => {}
        }
        match &self.outcome {
            Outcome::Match => write!(f, "  ok: expected article retrieved"),
            Outcome::Mismatch { actual } => {
                write!(f, "  warning: different record retrieved: {actual}")
            }
            Outcome::NoResults => write!(f, "  FAILED: no results"),
        }
    }
}

/// Outcome counts across all verification queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub matched: usize,
    pub mismatched: usize,
    pub empty: usize,
}

impl Summary {
    /// Tally the outcomes of a report list.
    pub fn of(reports: &[QueryReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match report.outcome {
                Outcome::Match => summary.matched += 1,
                Outcome::Mismatch { .. } => summary.mismatched += 1,
                Outcome::NoResults => summary.empty += 1,
            }
        }
        summary
    }

    /// Whether every query ranked the expected article first.
    pub fn all_matched(&self) -> bool {
        self.mismatched == 0 && self.empty == 0
    }
}
