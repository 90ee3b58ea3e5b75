//! Storage integration tests: real files through the load and export paths

mod common;

use gedcom_transform::export::MergedDataset;
use gedcom_transform::overlay::TransformDocument;
use gedcom_transform::{GedcomWorkspace, Storage};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};

#[test]
fn test_read_source_missing_file_is_an_error() {
    assert!(Storage::read_source("/no/such/file.ged").is_err());
}

#[test]
fn test_load_transforms_rejects_invalid_json() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"not json at all").unwrap();
    assert!(Storage::load_transforms(file.path()).is_err());
}

#[tokio::test]
async fn test_export_files_round_trip() {
    let workspace = GedcomWorkspace::new();

    let mut source = NamedTempFile::new().unwrap();
    source.write_all(common::SAMPLE_GEDCOM.as_bytes()).unwrap();
    let bytes = Storage::read_source(source.path()).unwrap();
    workspace.load_gedcom(bytes).await.unwrap();

    workspace.stage_delete("3").unwrap();
    workspace.stage_field_edit("2", "name", "Jane Doe").unwrap();

    let out_dir = tempdir().unwrap();
    let bundle = workspace.export();
    let (transform_path, data_path) = Storage::new(out_dir.path()).save_exports(&bundle).unwrap();

    assert!(
        transform_path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("transformations-")
    );
    assert_eq!(
        transform_path.extension().and_then(|e| e.to_str()),
        Some("gedTransform")
    );
    assert_eq!(data_path.extension().and_then(|e| e.to_str()), Some("json"));

    // the transformation file re-imports into a fresh workspace
    let document = Storage::load_transforms(&transform_path).unwrap();
    assert_eq!(document.individuals.len(), 2);
    let replica = GedcomWorkspace::new();
    replica.import_transformations(document);
    assert_eq!(replica.transformation_entries().len(), 2);

    // the merged dataset parses back with the deletion applied
    let merged: MergedDataset =
        serde_json::from_str(&fs::read_to_string(&data_path).unwrap()).unwrap();
    assert_eq!(merged.individuals.len(), 2);
    assert!(merged.individuals.iter().all(|i| i.id != "3"));
    assert_eq!(merged.families[0].children, Vec::<String>::new());
    assert_eq!(
        merged
            .individuals
            .iter()
            .find(|i| i.id == "2")
            .unwrap()
            .name,
        "Jane Doe"
    );
}

#[test]
fn test_imported_document_matches_exported_shape() {
    let json = r#"{"individuals":{"1":{"type":"delete","hint":"John Doe, 1900-01-01"}}}"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let document: TransformDocument = Storage::load_transforms(file.path()).unwrap();
    assert!(document.individuals["1"].is_delete());
}
