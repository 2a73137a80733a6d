// src/tables/kegg.rs
//
// KEGG enrichment per sample:
//   raw `{sample}_kegg.csv`  ⨝  `kegg_pathways_db.csv`  →  `{sample}_kegg_merged.csv`
// then, after hand curation, `{sample}_kegg_selected.csv` → top-N bars.

use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::consts::{KO_PREFIX, PATHWAY_ID_WIDTH};
use crate::core::sanitize::zfill;
use crate::file::require_curated;
use crate::table::read_records;
use crate::tables::pathway_db::PathwayDbEntry;

/// One row of a sample's raw KEGG enrichment export. Other columns are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeggEnrichmentRow {
    #[serde(rename = "Pathway")]
    pub pathway: String,
    #[serde(rename = "Pathway ID")]
    pub pathway_id: String,
    #[serde(rename = "No. of Seqs")]
    pub seqs: u64,
}

/// Merged (and curated "selected") table row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergedPathwayRow {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub-category")]
    pub sub_category: String,
    #[serde(rename = "Pathway")]
    pub pathway: String,
    #[serde(rename = "Pathway ID")]
    pub pathway_id: String,
    #[serde(rename = "No. of Seqs")]
    pub seqs: u64,
}

impl MergedPathwayRow {
    pub fn headers() -> Vec<String> {
        strings!["Category", "Sub-category", "Pathway", "Pathway ID", "No. of Seqs"]
    }
}

/// `ko00010` → `00010`; `10` → `00010`. Every "ko" is removed, not only a prefix.
pub fn clean_enrichment_id(raw: &str) -> String {
    zfill(&raw.trim().replace(KO_PREFIX, ""), PATHWAY_ID_WIDTH)
}

/// Database IDs only get the zero padding (spreadsheets drop leading zeros).
pub fn clean_db_id(raw: &str) -> String {
    zfill(raw.trim(), PATHWAY_ID_WIDTH)
}

/// Inner join on the cleaned Pathway ID.
/// Row order: enrichment order, then database order for repeated IDs.
/// The result is sorted by `No. of Seqs`, descending; ties keep join order.
pub fn merge(enrichment: &[KeggEnrichmentRow], db: &[PathwayDbEntry]) -> Vec<MergedPathwayRow> {
    let mut by_id: HashMap<String, Vec<&PathwayDbEntry>> = HashMap::new();
    for entry in db {
        by_id.entry(clean_db_id(&entry.pathway_id)).or_default().push(entry);
    }

    let mut out = Vec::new();
    let mut unmatched = 0usize;
    for row in enrichment {
        let id = clean_enrichment_id(&row.pathway_id);
        let Some(entries) = by_id.get(&id) else {
            unmatched += 1;
            continue;
        };
        for entry in entries {
            out.push(MergedPathwayRow {
                category: entry.category.clone(),
                sub_category: entry.sub_category.clone(),
                pathway: row.pathway.clone(),
                pathway_id: id.clone(),
                seqs: row.seqs,
            });
        }
    }
    if unmatched > 0 {
        logf!("KEGG merge: {unmatched} enrichment rows had no database entry");
    }

    sort_by_seqs_desc(&mut out);
    out
}

pub fn sort_by_seqs_desc(rows: &mut [MergedPathwayRow]) {
    rows.sort_by(|a, b| b.seqs.cmp(&a.seqs));
}

/// Largest `n` by `No. of Seqs`; ties keep table order.
pub fn top_by_seqs(rows: &[MergedPathwayRow], n: usize) -> Vec<MergedPathwayRow> {
    let mut v = rows.to_vec();
    sort_by_seqs_desc(&mut v);
    v.truncate(n);
    v
}

/// Load the hand-curated table. A missing file is the one error that tells
/// the user to go and make it.
pub fn load_selected(path: &Path) -> Result<Vec<MergedPathwayRow>, Box<dyn Error>> {
    require_curated(path)?;
    read_records(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enr(name: &str, id: &str, seqs: u64) -> KeggEnrichmentRow {
        KeggEnrichmentRow { pathway: s!(name), pathway_id: s!(id), seqs }
    }

    fn db(cat: &str, sub: &str, id: &str) -> PathwayDbEntry {
        PathwayDbEntry { category: s!(cat), sub_category: s!(sub), pathway_id: s!(id), pathway_name: None }
    }

    #[test]
    fn enrichment_ids_lose_ko_and_get_padded() {
        assert_eq!(clean_enrichment_id("ko00010"), "00010");
        assert_eq!(clean_enrichment_id("ko3010"), "03010");
        assert_eq!(clean_enrichment_id(" 190 "), "00190");
        assert_eq!(clean_enrichment_id("koko1"), "00001");
        assert_eq!(clean_enrichment_id("map00010"), "map00010");
        assert_eq!(clean_db_id("10"), "00010");
    }

    #[test]
    fn merge_is_inner_and_sorted_by_seqs() {
        let enrichment = vec![
            enr("Glycolysis", "ko00010", 12),
            enr("Unknown", "ko99999", 50),
            enr("Ribosome", "ko03010", 40),
            enr("Citrate cycle", "ko00020", 12),
        ];
        let database = vec![
            db("Metabolism", "Carbohydrate metabolism", "10"),
            db("Metabolism", "Carbohydrate metabolism", "20"),
            db("Genetic Information Processing", "Translation", "03010"),
        ];
        let merged = merge(&enrichment, &database);
        let got: Vec<(&str, &str, u64)> = merged
            .iter()
            .map(|r| (r.pathway.as_str(), r.pathway_id.as_str(), r.seqs))
            .collect();
        assert_eq!(got, vec![
            ("Ribosome", "03010", 40),
            ("Glycolysis", "00010", 12),
            ("Citrate cycle", "00020", 12),
        ]);
        assert_eq!(merged[0].category, "Genetic Information Processing");
    }

    #[test]
    fn repeated_db_ids_fan_out_in_db_order() {
        let enrichment = vec![enr("Glycolysis", "ko00010", 3)];
        let database = vec![db("A", "x", "00010"), db("B", "y", "00010")];
        let merged = merge(&enrichment, &database);
        let cats: Vec<&str> = merged.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(cats, vec!["A", "B"]);
    }

    #[test]
    fn top_by_seqs_cuts_after_sorting() {
        let rows: Vec<MergedPathwayRow> = (0..5u64)
            .map(|i| MergedPathwayRow {
                category: s!("Metabolism"),
                sub_category: s!("x"),
                pathway: format!("p{i}"),
                pathway_id: format!("{i:05}"),
                seqs: i,
            })
            .collect();
        let top = top_by_seqs(&rows, 2);
        let names: Vec<&str> = top.iter().map(|r| r.pathway.as_str()).collect();
        assert_eq!(names, vec!["p4", "p3"]);
    }
}
