//! Export materializer
//!
//! Computes what leaves the system on export: the transformation document
//! itself (so it can be re-imported later) and the merged dataset with
//! deletions removed and updates applied. Pure computation — neither the
//! live dataset nor the overlay is mutated.

use crate::gedcom::{Dataset, Family, Individual};
use crate::overlay::{TransformDocument, Transformation, TransformationSet};
use serde::{Deserialize, Serialize};

/// The dataset that results from applying the overlay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedDataset {
    pub individuals: Vec<Individual>,
    pub families: Vec<Family>,
}

/// Both export documents, produced together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    /// The overlay serialized as-is, dangling entries included
    pub transform_document: TransformDocument,
    /// The dataset after deletions and updates
    pub merged: MergedDataset,
}

/// Apply the overlay to the dataset.
///
/// Individuals with a pending `Delete` are dropped, pending `Update` patches
/// are shallow-merged over the originals, and deleted ids are pruned from
/// every family's parent and child lists. Families themselves are never
/// deleted; their id and marriage date stay untouched. Overlay entries whose
/// id resolves to nothing have no effect on the merged side but still appear
/// in the transformation document.
pub fn materialize(dataset: &Dataset, overlay: &TransformationSet) -> ExportBundle {
    let deleted = overlay.delete_ids();

    let individuals = dataset
        .individuals()
        .iter()
        .filter(|individual| !deleted.contains(individual.id.as_str()))
        .map(|individual| match overlay.get(&individual.id) {
            Some(Transformation::Update { data, .. }) => data.apply_to(individual),
            _ => individual.clone(),
        })
        .collect();

    let families = dataset
        .families()
        .iter()
        .map(|family| Family {
            id: family.id.clone(),
            parents: family
                .parents
                .iter()
                .filter(|id| !deleted.contains(id.as_str()))
                .cloned()
                .collect(),
            children: family
                .children
                .iter()
                .filter(|id| !deleted.contains(id.as_str()))
                .cloned()
                .collect(),
            marriage: family.marriage,
        })
        .collect();

    ExportBundle {
        transform_document: overlay.to_document(),
        merged: MergedDataset {
            individuals,
            families,
        },
    }
}
