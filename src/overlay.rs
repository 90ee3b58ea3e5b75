//! Staged transformation overlay
//!
//! Pending edits against the loaded dataset, kept entirely separate from the
//! normalized records. Nothing here mutates an `Individual`: deletions and
//! field updates are staged per individual id and only materialized on
//! export. The overlay deliberately does not check that an id exists in the
//! current dataset — after loading a different source file, or importing a
//! transformation file built against another dataset, dangling entries are a
//! valid state that the display layer renders as unresolvable.

use crate::gedcom::Individual;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// A partial individual: the payload of a staged field update.
///
/// `None` means "field untouched"; only `Some` fields override the original
/// on merge and on export. Dates round-trip as ISO `YYYY-MM-DD` strings in
/// the transformation file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndividualPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_of_families: Option<Vec<String>>,
}

impl IndividualPatch {
    /// Shallow key-wise merge: fields set in `incoming` override this patch,
    /// fields absent in `incoming` are retained.
    pub fn merge(&mut self, incoming: IndividualPatch) {
        if incoming.name.is_some() {
            self.name = incoming.name;
        }
        if incoming.sex.is_some() {
            self.sex = incoming.sex;
        }
        if incoming.birth.is_some() {
            self.birth = incoming.birth;
        }
        if incoming.death.is_some() {
            self.death = incoming.death;
        }
        if incoming.head_of_families.is_some() {
            self.head_of_families = incoming.head_of_families;
        }
    }

    /// Produce the merged individual: patch fields win, everything else is
    /// carried over unchanged. The original is not touched.
    pub fn apply_to(&self, individual: &Individual) -> Individual {
        Individual {
            id: individual.id.clone(),
            name: self.name.clone().unwrap_or_else(|| individual.name.clone()),
            sex: self.sex.clone().or_else(|| individual.sex.clone()),
            birth: self.birth.or(individual.birth),
            death: self.death.or(individual.death),
            head_of_families: self
                .head_of_families
                .clone()
                .unwrap_or_else(|| individual.head_of_families.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == IndividualPatch::default()
    }
}

/// A staged, non-destructive edit for one individual
///
/// The `hint` is a display label (e.g. `John Doe, 1900-01-01`) captured when
/// the edit was staged, so the entry stays describable even if the
/// underlying individual later becomes unresolvable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transformation {
    Delete { hint: String },
    Update { data: IndividualPatch, hint: String },
}

impl Transformation {
    pub fn hint(&self) -> &str {
        match self {
            Transformation::Delete { hint } => hint,
            Transformation::Update { hint, .. } => hint,
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Transformation::Delete { .. })
    }
}

/// The `.gedTransform` file shape, for both import and export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformDocument {
    pub individuals: BTreeMap<String, Transformation>,
}

/// The set of staged transformations, keyed by individual id
///
/// Owned by the interactive layer; these methods are the only mutation
/// surface. Keys are kept sorted so listings and serialized documents come
/// out in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformationSet {
    entries: BTreeMap<String, Transformation>,
}

impl TransformationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a transformation, replacing any pending one for the same id.
    ///
    /// An `Update` over an existing `Update` merges the new partial fields
    /// over the old ones and refreshes the hint. Every other combination
    /// replaces outright: the last transformation type wins, so an `Update`
    /// staged after a `Delete` discards the delete.
    pub fn set(&mut self, id: impl Into<String>, transformation: Transformation) {
        let id = id.into();
        let staged = match (self.entries.remove(&id), transformation) {
            (
                Some(Transformation::Update {
                    data: mut existing, ..
                }),
                Transformation::Update {
                    data: incoming,
                    hint,
                },
            ) => {
                existing.merge(incoming);
                Transformation::Update {
                    data: existing,
                    hint,
                }
            }
            (_, incoming) => incoming,
        };
        self.entries.insert(id, staged);
    }

    /// Discard the pending transformation for an id
    pub fn remove(&mut self, id: &str) -> Option<Transformation> {
        self.entries.remove(id)
    }

    /// Discard every pending transformation
    pub fn reset_all(&mut self) {
        self.entries.clear();
    }

    /// Bulk replace: every entry in `entries` overwrites any pending one for
    /// the same id. The import path calls `reset_all` first, so an imported
    /// file fully replaces the staged set rather than merging into it.
    pub fn set_all(&mut self, entries: BTreeMap<String, Transformation>) {
        self.entries.extend(entries);
    }

    pub fn get(&self, id: &str) -> Option<&Transformation> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Transformation)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids with a pending `Delete`
    pub fn delete_ids(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter(|(_, t)| t.is_delete())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Snapshot the set as a serializable transformation document
    pub fn to_document(&self) -> TransformDocument {
        TransformDocument {
            individuals: self.entries.clone(),
        }
    }
}

/// The fixed set of fields a staged update may touch.
///
/// Field keys arriving from the outside (CLI arguments, imported tooling) are
/// dispatched through this enum rather than assigned by string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Name,
    Sex,
    Birth,
    Death,
    HeadOfFamilies,
}

impl FromStr for EditableField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(EditableField::Name),
            "sex" => Ok(EditableField::Sex),
            "birth" => Ok(EditableField::Birth),
            "death" => Ok(EditableField::Death),
            "headOfFamilies" | "head_of_families" => Ok(EditableField::HeadOfFamilies),
            _ => Err(format!(
                "Invalid field '{}'. Valid fields: name, sex, birth, death, headOfFamilies",
                s
            )),
        }
    }
}

impl EditableField {
    /// Set this field on a patch from its textual value. Date fields require
    /// ISO `YYYY-MM-DD` input; `headOfFamilies` takes a comma-separated list
    /// of family ids.
    pub fn apply(&self, value: &str, patch: &mut IndividualPatch) -> Result<()> {
        match self {
            EditableField::Name => patch.name = Some(value.to_string()),
            EditableField::Sex => patch.sex = Some(value.to_string()),
            EditableField::Birth => patch.birth = Some(parse_iso_date(value)?),
            EditableField::Death => patch.death = Some(parse_iso_date(value)?),
            EditableField::HeadOfFamilies => {
                patch.head_of_families = Some(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
        }
        Ok(())
    }
}

fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => bail!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '1930-03-12')",
            value
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(patch: IndividualPatch, hint: &str) -> Transformation {
        Transformation::Update {
            data: patch,
            hint: hint.to_string(),
        }
    }

    #[test]
    fn test_update_over_update_merges_fields() {
        let mut set = TransformationSet::new();
        set.set(
            "1",
            update(
                IndividualPatch {
                    name: Some("A".to_string()),
                    ..Default::default()
                },
                "first",
            ),
        );
        set.set(
            "1",
            update(
                IndividualPatch {
                    sex: Some("M".to_string()),
                    ..Default::default()
                },
                "second",
            ),
        );

        let Some(Transformation::Update { data, hint }) = set.get("1") else {
            panic!("expected pending update");
        };
        assert_eq!(data.name.as_deref(), Some("A"));
        assert_eq!(data.sex.as_deref(), Some("M"));
        assert_eq!(hint, "second");
    }

    #[test]
    fn test_last_transformation_type_wins() {
        let mut set = TransformationSet::new();
        set.set(
            "1",
            Transformation::Delete {
                hint: "gone".to_string(),
            },
        );
        set.set(
            "1",
            update(
                IndividualPatch {
                    name: Some("back".to_string()),
                    ..Default::default()
                },
                "edited",
            ),
        );
        assert!(!set.get("1").unwrap().is_delete());

        set.set(
            "1",
            Transformation::Delete {
                hint: "gone again".to_string(),
            },
        );
        assert!(set.get("1").unwrap().is_delete());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_editable_field_dispatch() {
        let mut patch = IndividualPatch::default();
        "name"
            .parse::<EditableField>()
            .unwrap()
            .apply("Jane Doe", &mut patch)
            .unwrap();
        "birth"
            .parse::<EditableField>()
            .unwrap()
            .apply("1930-03-12", &mut patch)
            .unwrap();
        "headOfFamilies"
            .parse::<EditableField>()
            .unwrap()
            .apply("1, 2", &mut patch)
            .unwrap();

        assert_eq!(patch.name.as_deref(), Some("Jane Doe"));
        assert_eq!(patch.birth, NaiveDate::from_ymd_opt(1930, 3, 12));
        assert_eq!(
            patch.head_of_families,
            Some(vec!["1".to_string(), "2".to_string()])
        );

        assert!("favoriteColor".parse::<EditableField>().is_err());
        let result = EditableField::Birth.apply("next tuesday", &mut patch);
        assert!(result.is_err());
    }
}
