// src/specs/kegg_pathways.rs
//! Extraction rules for a saved KEGG PATHWAY database page.
//!
//! Page layout relied on:
//! ```text
//! <h4>09100 Metabolism</h4>
//! <div class="list">
//!   <b>09101 Carbohydrate metabolism</b>
//!   <div class="list">
//!     <dl><dt>00010</dt><dd><a href="…">Glycolysis / Gluconeogenesis</a></dd> …</dl>
//!   </div>
//!   …
//! </div>
//! ```
//!
//! Two independent passes:
//! 1. **Categorized**: `h4` → next sibling `div.list` → each `b` inside it →
//!    the `b`'s next sibling `div.list` → every `dt`/`dd` pair of every `dl`.
//! 2. **Uncategorized**: every `b` in the whole document with the same
//!    `div.list` pattern, tagged with category `"N/A"`.
//!
//! The passes overlap, so a pathway listed under a heading shows up twice
//! (once categorized, once `"N/A"`). That is kept on purpose; use
//! [`dedup_records`] to collapse it explicitly.
//!
//! Skipped silently: terms shorter than 5 characters, definitions without a
//! link, labels without a following list.

use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::Path;

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use crate::config::consts::{LIST_CLASS, MIN_ID_CHARS, NA_CATEGORY};
use crate::core::html::{descendants_named, first_descendant_named, next_sibling_matching, text_trimmed};
use crate::core::sanitize::strip_number_prefix;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathwayRecord {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub-category")]
    pub sub_category: String,
    /// `">{term} <"`, term verbatim from the `dt`.
    #[serde(rename = "Pathway ID")]
    pub pathway_id: String,
    #[serde(rename = "Pathway Name")]
    pub pathway_name: String,
}

impl PathwayRecord {
    pub fn is_uncategorized(&self) -> bool {
        self.category == NA_CATEGORY
    }

    /// The `dt` term without the `>`/`<` wrapper.
    pub fn raw_id(&self) -> &str {
        self.pathway_id.trim().trim_start_matches('>').trim_end_matches('<').trim()
    }
}

pub fn format_pathway_id(term: &str) -> String {
    format!(">{term} <")
}

pub struct PathwayBundle {
    /// Number of leading records that came from the categorized pass.
    pub categorized: usize,
    pub records: Vec<PathwayRecord>,
}

impl PathwayBundle {
    pub fn headers() -> Vec<String> {
        strings!["Category", "Sub-category", "Pathway ID", "Pathway Name"]
    }
}

pub fn extract_file(path: &Path) -> Result<PathwayBundle, Box<dyn Error>> {
    let doc = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read KEGG page {}: {e}", path.display()))?;
    Ok(parse_doc(&doc))
}

pub fn parse_doc(doc: &str) -> PathwayBundle {
    let html = Html::parse_document(doc);

    let mut records = categorized_pass(&html);
    let categorized = records.len();
    records.extend(uncategorized_pass(&html));

    logf!(
        "KEGG page: {} records ({} categorized, {} N/A)",
        records.len(),
        categorized,
        records.len() - categorized
    );
    PathwayBundle { categorized, records }
}

/// Pass 1: headings → sub-category labels → definition lists.
pub fn categorized_pass(html: &Html) -> Vec<PathwayRecord> {
    let mut out = Vec::new();

    for heading in descendants_named(html.root_element(), "h4") {
        let category = strip_number_prefix(&text_trimmed(heading));

        let Some(list) = next_list(heading) else {
            logd!("No sub-category list after heading '{category}'");
            continue;
        };

        for label in descendants_named(list, "b") {
            let sub_category = strip_number_prefix(&text_trimmed(label));
            if let Some(sub_list) = next_list(label) {
                extract_pathways(sub_list, &category, &sub_category, &mut out);
            }
        }
    }
    out
}

/// Pass 2: any bold label followed by a list, category `"N/A"`.
pub fn uncategorized_pass(html: &Html) -> Vec<PathwayRecord> {
    let mut out = Vec::new();

    for label in descendants_named(html.root_element(), "b") {
        let sub_category = strip_number_prefix(&text_trimmed(label));
        if let Some(sub_list) = next_list(label) {
            extract_pathways(sub_list, NA_CATEGORY, &sub_category, &mut out);
        }
    }
    out
}

fn next_list(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    next_sibling_matching(el, "div", Some(LIST_CLASS))
}

fn extract_pathways(container: ElementRef<'_>, category: &str, sub_category: &str, out: &mut Vec<PathwayRecord>) {
    for dl in descendants_named(container, "dl") {
        for dt in descendants_named(dl, "dt") {
            let id = text_trimmed(dt);
            if id.chars().count() < MIN_ID_CHARS { continue; }

            let Some(dd) = next_sibling_matching(dt, "dd", None) else { continue };
            let Some(link) = first_descendant_named(dd, "a") else { continue };
            let name = text_trimmed(link);

            logd!("Extracted: Category={category}, Sub-category={sub_category}, Pathway Name={name}, ID={id}");
            out.push(PathwayRecord {
                category: s!(category),
                sub_category: s!(sub_category),
                pathway_id: format_pathway_id(&id),
                pathway_name: name,
            });
        }
    }
}

/* ---------------- Explicit dedup step ---------------- */

/// Collapse the overlap between the two passes.
/// - drops `"N/A"` records whose (sub-category, ID, name) also exists with a real category
/// - drops exact repeats
///
/// First occurrences keep their order.
pub fn dedup_records(records: &[PathwayRecord]) -> Vec<PathwayRecord> {
    fn key(r: &PathwayRecord) -> (&str, &str, &str) {
        (&r.sub_category, &r.pathway_id, &r.pathway_name)
    }

    let categorized: HashSet<(&str, &str, &str)> = records
        .iter()
        .filter(|r| !r.is_uncategorized())
        .map(key)
        .collect();

    let mut seen: HashSet<&PathwayRecord> = HashSet::new();
    let mut out = Vec::with_capacity(records.len());
    for r in records {
        if r.is_uncategorized() && categorized.contains(&key(r)) { continue; }
        if seen.insert(r) {
            out.push(r.clone());
        }
    }
    out
}
