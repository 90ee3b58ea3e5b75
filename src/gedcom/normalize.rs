//! Record normalizer: generic node forest → typed dataset
//!
//! Walks the parser output and extracts the two record kinds this tool
//! interprets, `INDI` and `FAM`. Everything else (`HEAD`, `SUBM`, `TRLR`,
//! unknown vendor tags) is ignored. A root node missing required structure is
//! skipped, never fatal to the whole call.

use super::dates::{parse_event_date, parse_loose_date};
use super::node::GedcomNode;
use super::records::{Dataset, Family, Individual, strip_xref};
use tracing::warn;

/// Extract the flat dataset from a parsed node forest. Pure function of its
/// input: no state is touched and the forest is not consumed.
pub fn normalize(forest: &[GedcomNode]) -> Dataset {
    let individuals: Vec<Individual> = forest
        .iter()
        .filter(|node| node.tag == "INDI")
        .filter_map(normalize_individual)
        .collect();

    let families: Vec<Family> = forest
        .iter()
        .filter(|node| node.tag == "FAM")
        .filter_map(normalize_family)
        .collect();

    Dataset::new(individuals, families)
}

fn normalize_individual(node: &GedcomNode) -> Option<Individual> {
    let Some(id) = strip_xref(&node.pointer, 'I') else {
        warn!("skipping INDI record without a cross-reference id");
        return None;
    };

    let name = match node.child_data("NAME") {
        Some(raw) => {
            // Slashes delimit the surname in GEDCOM names: `John /Doe/`
            let stripped = raw.replace('/', "");
            if stripped.trim().is_empty() {
                "no name".to_string()
            } else {
                stripped
            }
        }
        None => "no name".to_string(),
    };

    let birth = node.nested_data("BIRT", "DATE").and_then(parse_event_date);
    let death = node.nested_data("DEAT", "DATE").and_then(parse_event_date);

    let sex = node
        .child_data("SEX")
        .filter(|raw| !raw.trim().is_empty())
        .map(str::to_string);

    let head_of_families = node
        .children("FAMS")
        .filter_map(|fams| strip_xref(&fams.data, 'F'))
        .collect();

    Some(Individual {
        id,
        name,
        birth,
        death,
        sex,
        head_of_families,
    })
}

fn normalize_family(node: &GedcomNode) -> Option<Family> {
    let Some(id) = strip_xref(&node.pointer, 'F') else {
        warn!("skipping FAM record without a cross-reference id");
        return None;
    };

    let children = node
        .children("CHIL")
        .filter_map(|child| strip_xref(&child.data, 'I'))
        .collect();

    // Husband and wife in whatever order the source declares them
    let parents = node
        .tree
        .iter()
        .filter(|n| n.tag == "HUSB" || n.tag == "WIFE")
        .filter_map(|parent| strip_xref(&parent.data, 'I'))
        .collect();

    let marriage = node.nested_data("MARR", "DATE").and_then(parse_loose_date);

    Some(Family {
        id,
        parents,
        children,
        marriage,
    })
}
