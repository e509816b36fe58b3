// src/specs/drug_page.rs
//! Spec for the drug monograph page.
//!
//! Anchors are `<h2>` headings with these ids:
//! - `uses`: its text is the title; the first `<p>` after it is the description.
//! - `warnings`: the first `<strong>` after it is the warning text.
//! - `before-taking`: its text is the section title; the first `<ul>` after it
//!   holds the checklist, one `<li>` per item.

use scraper::Html;
use serde::Serialize;

use crate::config::consts::{ANCHOR_BEFORE_TAKING, ANCHOR_USES, ANCHOR_WARNINGS, NOT_AVAILABLE};
use crate::core::html::{descendants_named, find_after, find_anchor, text_of};

const HEADING: &str = "h2";

/// Fields as found on the page; `None` means the anchor or its neighbor is missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub warning_text: Option<String>,
    pub before_taking_title: Option<String>,
    pub before_taking_list: Option<Vec<String>>,
}

/// Page facts with sentinels applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedDrugInfo {
    pub title: String,
    pub description: String,
    pub warning_text: String,
    pub before_taking_title: String,
    pub before_taking_list: Vec<String>,
}

impl From<PageFields> for ScrapedDrugInfo {
    fn from(f: PageFields) -> Self {
        let or_na = |v: Option<String>| v.unwrap_or_else(|| s!(NOT_AVAILABLE));
        Self {
            title: or_na(f.title),
            description: or_na(f.description),
            warning_text: or_na(f.warning_text),
            before_taking_title: or_na(f.before_taking_title),
            before_taking_list: f.before_taking_list.unwrap_or_default(),
        }
    }
}

pub fn parse(body: &str) -> PageFields {
    let doc = Html::parse_document(body);
    PageFields {
        title: title(&doc),
        description: description(&doc),
        warning_text: warning_text(&doc),
        before_taking_title: before_taking_title(&doc),
        before_taking_list: before_taking_list(&doc),
    }
}

pub fn extract(body: &str) -> ScrapedDrugInfo {
    let fields = parse(body);
    let missing = [
        ("title", fields.title.is_none()),
        ("description", fields.description.is_none()),
        ("warnings", fields.warning_text.is_none()),
        ("before-taking title", fields.before_taking_title.is_none()),
        ("before-taking list", fields.before_taking_list.is_none()),
    ];
    for (name, absent) in missing {
        if absent { logd!("drug page: {name} not found"); }
    }
    fields.into()
}

/* ---------- fields ---------- */

fn title(doc: &Html) -> Option<String> {
    find_anchor(doc, HEADING, ANCHOR_USES).and_then(text_of)
}

fn description(doc: &Html) -> Option<String> {
    find_after(doc, HEADING, ANCHOR_USES, "p").and_then(text_of)
}

fn warning_text(doc: &Html) -> Option<String> {
    find_after(doc, HEADING, ANCHOR_WARNINGS, "strong").and_then(text_of)
}

fn before_taking_title(doc: &Html) -> Option<String> {
    find_anchor(doc, HEADING, ANCHOR_BEFORE_TAKING).and_then(text_of)
}

fn before_taking_list(doc: &Html) -> Option<Vec<String>> {
    let ul = find_after(doc, HEADING, ANCHOR_BEFORE_TAKING, "ul")?;
    Some(
        descendants_named(ul, "li")
            .into_iter()
            .map(|li| text_of(li).unwrap_or_default())
            .collect(),
    )
}
