//! Common test utilities for integration tests

#![allow(dead_code)]

use gedcom_transform::gedcom::{self, Dataset, Individual};

/// A small but representative GEDCOM source: two spouses, one child, one
/// family, plus header/trailer records the normalizer must ignore.
pub const SAMPLE_GEDCOM: &str = "\
0 HEAD
1 SOUR test-suite
0 @I1@ INDI
1 NAME John /Doe/
1 SEX M
1 BIRT
2 DATE 1 JAN 1900
1 DEAT
2 DATE 12 MAR 1980
1 FAMS @F1@
0 @I2@ INDI
1 NAME Jane /Roe/
1 SEX F
1 FAMS @F1@
0 @I3@ INDI
1 NAME Junior /Doe/
1 FAMC @F1@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
1 MARR
2 DATE 1925
0 TRLR
";

/// Parse and normalize the sample source
pub fn sample_dataset() -> Dataset {
    gedcom::normalize(&gedcom::parse(SAMPLE_GEDCOM))
}

/// Minimal individual for overlay/export tests
pub fn make_individual(id: &str, name: &str) -> Individual {
    Individual {
        id: id.to_string(),
        name: name.to_string(),
        birth: None,
        death: None,
        sex: None,
        head_of_families: Vec::new(),
    }
}
