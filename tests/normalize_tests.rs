//! Normalizer integration tests: node forest to typed dataset

mod common;

use chrono::NaiveDate;
use gedcom_transform::gedcom::{normalize, parse};

#[test]
fn test_individual_extraction_end_to_end() {
    let dataset = common::sample_dataset();
    assert_eq!(dataset.individual_count(), 3);

    let john = dataset.find_individual("1").unwrap();
    assert_eq!(john.name, "John Doe");
    assert_eq!(john.sex.as_deref(), Some("M"));
    assert_eq!(john.birth, NaiveDate::from_ymd_opt(1900, 1, 1));
    assert_eq!(john.death, NaiveDate::from_ymd_opt(1980, 3, 12));
    assert_eq!(john.head_of_families, vec!["1".to_string()]);
}

#[test]
fn test_family_extraction() {
    let dataset = common::sample_dataset();
    assert_eq!(dataset.family_count(), 1);

    let family = &dataset.families()[0];
    assert_eq!(family.id, "1");
    assert_eq!(family.parents, vec!["1".to_string(), "2".to_string()]);
    assert_eq!(family.children, vec!["3".to_string()]);
    // year-only marriage dates fall back to January 1
    assert_eq!(family.marriage, NaiveDate::from_ymd_opt(1925, 1, 1));
}

#[test]
fn test_parent_order_follows_the_source() {
    let dataset = normalize(&parse(
        "0 @F1@ FAM\n1 WIFE @I2@\n1 HUSB @I1@",
    ));
    assert_eq!(
        dataset.families()[0].parents,
        vec!["2".to_string(), "1".to_string()]
    );
}

#[test]
fn test_missing_name_defaults() {
    let dataset = normalize(&parse("0 @I1@ INDI\n1 SEX F\n0 @I2@ INDI\n1 NAME //"));
    assert_eq!(dataset.find_individual("1").unwrap().name, "no name");
    // a name that is empty once the surname slashes are stripped
    assert_eq!(dataset.find_individual("2").unwrap().name, "no name");
}

#[test]
fn test_absent_and_unparseable_dates_are_none() {
    let text = "\
0 @I1@ INDI
1 NAME A
1 BIRT
2 DATE ABT 1900
0 @I2@ INDI
1 NAME B
1 BIRT
0 @I3@ INDI
1 NAME C
";
    let dataset = normalize(&parse(text));
    assert_eq!(dataset.find_individual("1").unwrap().birth, None);
    assert_eq!(dataset.find_individual("2").unwrap().birth, None);
    assert_eq!(dataset.find_individual("3").unwrap().birth, None);
}

#[test]
fn test_multiple_fams_preserve_order() {
    let dataset = normalize(&parse(
        "0 @I1@ INDI\n1 NAME A\n1 FAMS @F2@\n1 FAMS @F1@",
    ));
    assert_eq!(
        dataset.find_individual("1").unwrap().head_of_families,
        vec!["2".to_string(), "1".to_string()]
    );
}

#[test]
fn test_records_without_pointer_are_skipped() {
    let dataset = normalize(&parse("0 INDI\n1 NAME Ghost\n0 @I1@ INDI\n1 NAME Real\n0 FAM"));
    assert_eq!(dataset.individual_count(), 1);
    assert_eq!(dataset.family_count(), 0);
    assert_eq!(dataset.find_individual("1").unwrap().name, "Real");
}

#[test]
fn test_non_record_roots_are_ignored() {
    let dataset = normalize(&parse("0 HEAD\n1 SOUR x\n0 @S1@ SUBM\n0 TRLR"));
    assert_eq!(dataset.individual_count(), 0);
    assert_eq!(dataset.family_count(), 0);
}
