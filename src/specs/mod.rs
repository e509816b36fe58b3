// src/specs/mod.rs
//! # Page "specs"
//!
//! Each spec knows **where the facts live** in one remote page and how to pull
//! them out robustly. Specs are pure: they take an already-fetched document
//! and return typed data. Fetching, error collapse and presentation happen in
//! higher layers (`scrape`, the CLI).
//!
//! ## Conventions
//! - Locate content through **anchors**: a heading with a known `id`, then the
//!   first element of a given tag that follows it in document order
//!   (`core::html::find_after`).
//! - Every field is extracted **independently** into an `Option`. A missing
//!   anchor or neighbor costs that field only; sentinels are applied when the
//!   record is assembled, never earlier.
//! - Specs never fail. A page that has none of the anchors yields a record
//!   made entirely of sentinels.
//! - Testable **offline** against inline fixtures.
//!
//! ## Current specs
//! - `drug_page` – the drugs.com monograph (`/<slug>.html`): uses, warnings,
//!   before-taking.
pub mod drug_page;
