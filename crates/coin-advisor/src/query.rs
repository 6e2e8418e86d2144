//! Query Normalizer
//!
//! Turns a free-text question into a set of stems so morphological variants
//! ("sustainable", "sustainability") collapse to one signal ("sustain").

use std::collections::BTreeSet;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

/// Normalized stems from one user utterance
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySignals {
    stems: BTreeSet<String>,
}

impl QuerySignals {
    /// Exact stem membership
    pub fn contains(&self, stem: &str) -> bool {
        self.stems.contains(stem)
    }

    /// Whether any of the stems is present
    pub fn contains_any(&self, stems: &[&str]) -> bool {
        stems.iter().any(|stem| self.contains(stem))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stems.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }
}

/// Lower-case, split on word boundaries and stem every token
pub fn normalize(query: &str) -> QuerySignals {
    let stemmer = Stemmer::create(Algorithm::English);
    let stems = tokenize(query)
        .map(|token| stemmer.stem(&token).into_owned())
        .collect();
    QuerySignals { stems }
}

/// Runs of alphanumeric characters, lower-cased
fn tokenize(query: &str) -> impl Iterator<Item = String> + '_ {
    query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}
