// src/specs/mod.rs
//! # Page extractors
//!
//! Page-specific extraction rules. Each module focuses on one saved
//! page and encodes *where the data lives in the HTML* and *how to pull it
//! out tolerantly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of saved pages (no network; the pages are saved
//!   by hand from the browser).
//! - **Traversal rules** (which heading owns which list, which sibling is
//!   the container) expressed with `core::html` helpers.
//! - **Light shaping** into small record/bundle structs.
//!
//! ## What does **not** live here
//! - File output and delimiter choice (`table`, `runner`).
//! - Cleaning that a later step owns (ID normalization and dedup for the
//!   pathway database live in `tables::pathway_db`).
//!
//! ## Conventions
//! - Malformed fragments are skipped, never fatal.
//! - Output order is document order.
//! - Everything is testable **offline** against inline fixtures.
pub mod kegg_pathways;
