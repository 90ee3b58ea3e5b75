//! Flat typed records extracted from a GEDCOM file
//!
//! Serde renames are camelCase so the exported JSON matches the transform
//! and dataset file formats consumed by other tooling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Strip the cross-reference decoration from a pointer: `@I123@` with kind
/// `'I'` yields `123`. Tolerant of partially decorated input — whatever
/// pieces are present are removed. Empty pointers yield `None`.
pub fn strip_xref(pointer: &str, kind: char) -> Option<String> {
    let trimmed = pointer.trim();
    if trimmed.is_empty() {
        return None;
    }
    let s = trimmed.strip_prefix('@').unwrap_or(trimmed);
    let s = s.strip_prefix(kind).unwrap_or(s);
    let s = s.strip_suffix('@').unwrap_or(s);
    Some(s.to_string())
}

/// Inverse of [`strip_xref`]: `decorate_xref('I', "123")` yields `@I123@`.
pub fn decorate_xref(kind: char, id: &str) -> String {
    format!("@{kind}{id}@")
}

/// A person record
///
/// Never mutated after normalization: the transformation overlay holds all
/// pending edits, and export produces fresh merged copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Individual {
    /// Normalized id, cross-reference decoration stripped (`@I123@` → `123`)
    pub id: String,
    /// Display name with the `/surname/` delimiters removed; `no name` when
    /// the source has none
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    /// Ids of families where this individual is a spouse, in source order
    #[serde(default)]
    pub head_of_families: Vec<String>,
}

/// A family record linking individuals by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: String,
    /// Husband/wife individual ids, in source order
    #[serde(default)]
    pub parents: Vec<String>,
    /// Child individual ids, in source order
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage: Option<NaiveDate>,
}

/// The root dataset produced by one successful parse
///
/// Replaced wholesale when a new file loads; there is no incremental merge of
/// two source files.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    individuals: Vec<Individual>,
    families: Vec<Family>,

    /// Index from individual id to position in `individuals`.
    ///
    /// A derived index, never mutated independently: it is rebuilt in a
    /// single pass whenever a dataset is constructed, and duplicate ids
    /// (which well-formed input does not produce) resolve to the last record
    /// seen. Positions are stored instead of record clones so the Vec stays
    /// the single owner of the data.
    id_index: HashMap<String, usize>,
}

impl Dataset {
    pub fn new(individuals: Vec<Individual>, families: Vec<Family>) -> Self {
        let id_index = individuals
            .iter()
            .enumerate()
            .map(|(position, individual)| (individual.id.clone(), position))
            .collect();
        Self {
            individuals,
            families,
            id_index,
        }
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// Look up an individual by normalized id
    pub fn find_individual(&self, id: &str) -> Option<&Individual> {
        self.id_index
            .get(id)
            .and_then(|position| self.individuals.get(*position))
    }

    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }
}
