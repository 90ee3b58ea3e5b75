//! GEDCOM Transform Library
//!
//! Load a GEDCOM genealogy file into a flat, typed, query-ready dataset,
//! stage non-destructive edits (field updates, deletions) against
//! individuals, and export both the staged edit-set and the resulting merged
//! dataset.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **Interactive Layer**: [`GedcomWorkspace`] — owns the loaded dataset and
//!   the staged transformations, and is the only mutation surface
//! - **Domain Layer**: `gedcom`, `overlay`, and `export` modules — parsing,
//!   normalization, staged edits, and materialization
//! - **Worker Layer**: `loader` module — parsing runs behind a
//!   message-passing boundary so it never blocks interactive work
//!
//! # Example
//!
//! ```no_run
//! use gedcom_transform::GedcomWorkspace;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let workspace = GedcomWorkspace::new();
//!     let bytes = std::fs::read("family.ged")?;
//!     workspace.load_gedcom(bytes).await?;
//!     workspace.stage_delete("12")?;
//!     let bundle = workspace.export();
//!     println!("{} individuals survive", bundle.merged.individuals.len());
//!     Ok(())
//! }
//! ```

mod error;
pub mod export;
pub mod formatting;
pub mod gedcom;
mod loader;
pub mod overlay;
mod storage;

use anyhow::{Result, anyhow, bail};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

// Re-export commonly used types
pub use error::GedcomError;
pub use export::{ExportBundle, MergedDataset, materialize};
pub use gedcom::{Dataset, Family, GedcomNode, Individual};
pub use loader::Loader;
pub use overlay::{
    EditableField, IndividualPatch, TransformDocument, Transformation, TransformationSet,
};
pub use storage::Storage;

/// Summary of one completed file load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub individuals: usize,
    pub families: usize,
    /// False when a newer load finished first and this result was discarded
    pub installed: bool,
}

/// One staged transformation resolved against the current dataset, for
/// display. `individual` is `None` when the id no longer resolves — a valid
/// state after loading a different file or importing a foreign edit-set.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationEntry {
    pub id: String,
    pub transformation: Transformation,
    pub individual: Option<Individual>,
}

struct DataSlot {
    dataset: Option<Dataset>,
    generation: u64,
}

/// The interactive layer: one loaded dataset plus the staged edits against it
///
/// Loading a new source file replaces the dataset wholesale; the overlay is
/// deliberately left untouched by loads so staged edits survive a reload
/// (entries that no longer resolve are displayed as unresolvable, never
/// dropped silently). All overlay mutations go through the methods here.
pub struct GedcomWorkspace {
    data: Mutex<DataSlot>,
    overlay: Mutex<TransformationSet>,
    loader: Loader,
    load_counter: AtomicU64,
}

impl GedcomWorkspace {
    /// Create a workspace and start its load worker. Must be called from
    /// within a tokio runtime.
    pub fn new() -> Self {
        Self {
            data: Mutex::new(DataSlot {
                dataset: None,
                generation: 0,
            }),
            overlay: Mutex::new(TransformationSet::new()),
            loader: Loader::spawn(),
            load_counter: AtomicU64::new(0),
        }
    }

    /// Load a GEDCOM source file, replacing the current dataset on success.
    ///
    /// Each load is stamped with a monotonic generation when it is submitted;
    /// a result older than the newest installed one is discarded, so when
    /// several files are dropped together the last submission wins no matter
    /// which parse finishes first. A failed load changes nothing.
    pub async fn load_gedcom(&self, bytes: Vec<u8>) -> Result<LoadSummary> {
        let generation = self.load_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let dataset = self.loader.load_data(bytes).await?;

        let summary = LoadSummary {
            individuals: dataset.individual_count(),
            families: dataset.family_count(),
            installed: true,
        };

        let mut slot = self.data.lock().unwrap();
        if slot.generation > generation {
            warn!(
                generation,
                installed = slot.generation,
                "discarding stale load result"
            );
            return Ok(LoadSummary {
                installed: false,
                ..summary
            });
        }
        slot.dataset = Some(dataset);
        slot.generation = generation;
        Ok(summary)
    }

    /// True once a dataset has been installed
    pub fn dataset_loaded(&self) -> bool {
        self.data.lock().unwrap().dataset.is_some()
    }

    /// Snapshot of the current individuals, in source order
    pub fn individuals(&self) -> Vec<Individual> {
        self.data
            .lock()
            .unwrap()
            .dataset
            .as_ref()
            .map(|dataset| dataset.individuals().to_vec())
            .unwrap_or_default()
    }

    /// Stage a deletion for an individual in the current dataset.
    ///
    /// The display hint is captured now, from the live record, so the entry
    /// stays describable even if the individual later becomes unresolvable.
    pub fn stage_delete(&self, id: &str) -> Result<()> {
        let hint = {
            let slot = self.data.lock().unwrap();
            let individual = slot
                .dataset
                .as_ref()
                .and_then(|dataset| dataset.find_individual(id));
            match individual {
                Some(individual) => display_hint(individual),
                None => bail!("No person with id '{}' in the current dataset", id),
            }
        };

        self.overlay
            .lock()
            .unwrap()
            .set(id, Transformation::Delete { hint });
        Ok(())
    }

    /// Stage a single-field edit for an individual in the current dataset.
    ///
    /// `field` must name one of the editable fields (name, sex, birth,
    /// death, headOfFamilies); the new value merges into any pending update
    /// for the same id.
    pub fn stage_field_edit(&self, id: &str, field: &str, value: &str) -> Result<()> {
        let field: EditableField = field.parse().map_err(|message: String| anyhow!(message))?;

        let hint = {
            let slot = self.data.lock().unwrap();
            let individual = slot
                .dataset
                .as_ref()
                .and_then(|dataset| dataset.find_individual(id));
            match individual {
                Some(individual) => display_hint(individual),
                None => bail!("No person with id '{}' in the current dataset", id),
            }
        };

        let mut patch = IndividualPatch::default();
        field.apply(value, &mut patch)?;

        self.overlay
            .lock()
            .unwrap()
            .set(id, Transformation::Update { data: patch, hint });
        Ok(())
    }

    /// Discard the staged transformation for one id
    pub fn remove_transformation(&self, id: &str) -> Option<Transformation> {
        self.overlay.lock().unwrap().remove(id)
    }

    /// Discard every staged transformation
    pub fn reset_transformations(&self) {
        self.overlay.lock().unwrap().reset_all();
    }

    /// Replace the staged set with an imported transformation document.
    /// Import is reset-then-set-all, not a merge with existing entries.
    pub fn import_transformations(&self, document: TransformDocument) {
        let mut overlay = self.overlay.lock().unwrap();
        overlay.reset_all();
        overlay.set_all(document.individuals);
    }

    /// Staged transformations resolved against the current dataset, in
    /// stable id order. Entries with ids the dataset does not know are
    /// returned with `individual: None` rather than skipped.
    pub fn transformation_entries(&self) -> Vec<TransformationEntry> {
        let slot = self.data.lock().unwrap();
        let overlay = self.overlay.lock().unwrap();
        overlay
            .iter()
            .map(|(id, transformation)| TransformationEntry {
                id: id.clone(),
                transformation: transformation.clone(),
                individual: slot
                    .dataset
                    .as_ref()
                    .and_then(|dataset| dataset.find_individual(id))
                    .cloned(),
            })
            .collect()
    }

    /// Compute both export documents. Synchronous and side-effect-free: the
    /// live dataset and overlay are left untouched. Works before any load —
    /// the merged dataset is then empty, but the transformation document is
    /// still complete.
    pub fn export(&self) -> ExportBundle {
        let slot = self.data.lock().unwrap();
        let overlay = self.overlay.lock().unwrap();
        let empty = Dataset::default();
        materialize(slot.dataset.as_ref().unwrap_or(&empty), &overlay)
    }
}

impl Default for GedcomWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

fn display_hint(individual: &Individual) -> String {
    match individual.birth {
        Some(birth) => format!("{}, {}", individual.name, birth),
        None => format!("{}, –", individual.name),
    }
}
