// src/tables/mod.rs
//! Typed tables behind each chart: load, filter, sort and join rows.
//! Nothing in here draws; see `plot` for that.

pub mod go_terms;
pub mod kegg;
pub mod pathway_db;
pub mod virus;
