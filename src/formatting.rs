//! Formatting helpers for the CLI listing
//!
//! This module contains the display logic for individuals and staged
//! transformations, plus the keyword filter and paging applied to the
//! listing.

use crate::TransformationEntry;
use crate::gedcom::Individual;
use crate::overlay::Transformation;
use chrono::NaiveDate;

/// Apply keyword filtering (case-insensitive search in id and name)
pub fn apply_keyword_filter(individuals: &mut Vec<Individual>, keyword: &str) {
    let keyword_lower = keyword.to_lowercase();
    individuals.retain(|individual| {
        individual.id.to_lowercase().contains(&keyword_lower)
            || individual.name.to_lowercase().contains(&keyword_lower)
    });
}

/// Slice out one page of the listing. Pages are 1-based; a page past the end
/// is empty, a zero page size yields nothing.
pub fn page_slice(individuals: &[Individual], page: usize, page_size: usize) -> &[Individual] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= individuals.len() {
        return &[];
    }
    let end = (start + page_size).min(individuals.len());
    &individuals[start..end]
}

fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.to_string(),
        None => "–".to_string(),
    }
}

/// Format individuals into a display string
pub fn format_individuals(individuals: &[Individual], total: usize) -> String {
    if individuals.is_empty() {
        return "No individuals found".to_string();
    }

    let mut result = format!(
        "Showing {} of {} individual(s):\n\n",
        individuals.len(),
        total
    );
    for individual in individuals {
        result.push_str(&format!(
            "- [{}] {} (sex: {}, birth: {}, death: {})\n",
            individual.id,
            individual.name,
            individual.sex.as_deref().unwrap_or("–"),
            format_date(individual.birth),
            format_date(individual.death),
        ));
        if !individual.head_of_families.is_empty() {
            result.push_str(&format!(
                "  Head of families: {}\n",
                individual.head_of_families.join(", ")
            ));
        }
    }

    result
}

/// Format the staged transformation list, rendering entries whose id no
/// longer resolves in the current dataset as warnings instead of crashing.
pub fn format_transformations(entries: &[TransformationEntry]) -> String {
    if entries.is_empty() {
        return "No staged transformations".to_string();
    }

    let mut result = format!("Staged {} transformation(s):\n\n", entries.len());
    for entry in entries {
        match &entry.individual {
            None => {
                result.push_str(&format!(
                    "- warning: no person with id {} found\n  was: {}\n",
                    entry.id,
                    entry.transformation.hint()
                ));
            }
            Some(individual) => match &entry.transformation {
                Transformation::Delete { .. } => {
                    result.push_str(&format!(
                        "- [delete] {} (id {})\n",
                        individual.name, individual.id
                    ));
                }
                Transformation::Update { data, .. } => {
                    result.push_str(&format!(
                        "- [change] {} (id {})\n",
                        individual.name, individual.id
                    ));
                    if let Some(name) = &data.name {
                        result.push_str(&format!("  name: {} -> {}\n", individual.name, name));
                    }
                    if let Some(sex) = &data.sex {
                        result.push_str(&format!(
                            "  sex: {} -> {}\n",
                            individual.sex.as_deref().unwrap_or("–"),
                            sex
                        ));
                    }
                    if let Some(birth) = data.birth {
                        result.push_str(&format!(
                            "  birth: {} -> {}\n",
                            format_date(individual.birth),
                            birth
                        ));
                    }
                    if let Some(death) = data.death {
                        result.push_str(&format!(
                            "  death: {} -> {}\n",
                            format_date(individual.death),
                            death
                        ));
                    }
                    if let Some(families) = &data.head_of_families {
                        result.push_str(&format!(
                            "  head of families: {} -> {}\n",
                            individual.head_of_families.join(", "),
                            families.join(", ")
                        ));
                    }
                }
            },
        }
    }

    result
}
