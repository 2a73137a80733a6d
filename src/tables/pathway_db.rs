// src/tables/pathway_db.rs
//
// Pathway database used by the KEGG merge. Built from the extractor output
// (`kegg_pathways.csv`), which wraps IDs as `">00010 <"` and lists most
// pathways twice (categorized + "N/A").

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::consts::PATHWAY_ID_WIDTH;
use crate::core::sanitize::zfill;
use crate::specs::kegg_pathways::{dedup_records, PathwayRecord};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathwayDbEntry {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub-category")]
    pub sub_category: String,
    #[serde(rename = "Pathway ID")]
    pub pathway_id: String,
    #[serde(rename = "Pathway Name", default)]
    pub pathway_name: Option<String>,
}

impl PathwayDbEntry {
    pub fn headers() -> Vec<String> {
        strings!["Category", "Sub-category", "Pathway ID", "Pathway Name"]
    }
}

/// `">00010 <"`, `"map00010"`, `"ko00010"`, `"10"` → `"00010"`.
pub fn normalize_pathway_id(raw: &str) -> String {
    let t = raw.trim().trim_start_matches('>').trim_end_matches('<').trim();
    let digits = t.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    zfill(digits, PATHWAY_ID_WIDTH)
}

/// Dedup the extractor output, normalize IDs, keep the first entry per ID.
pub fn build_db(records: &[PathwayRecord]) -> Vec<PathwayDbEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for r in dedup_records(records) {
        let id = normalize_pathway_id(&r.pathway_id);
        if !seen.insert(id.clone()) {
            logd!("Pathway DB: dropping repeat of {id} ({})", r.pathway_name);
            continue;
        }
        out.push(PathwayDbEntry {
            category: r.category,
            sub_category: r.sub_category,
            pathway_id: id,
            pathway_name: Some(r.pathway_name),
        });
    }
    out
}
