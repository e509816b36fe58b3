// src/scrape.rs
//
// Drug page lookup: build the URL, fetch once, hand the body to the page parser.
// Whole-request failures (timeout, transport, HTTP status, unreadable body)
// collapse into `ScrapeOutcome::Error`; missing sections never do.

use serde::Serialize;

use crate::config::options::ScrapeOptions;
use crate::core::{net, sanitize};
use crate::error::ExtractionError;
use crate::specs::drug_page::{self, ScrapedDrugInfo};

/// Either the page facts or a single error message. Serializes as the five
/// info fields, or as exactly `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScrapeOutcome {
    Info(ScrapedDrugInfo),
    Error { error: String },
}

impl ScrapeOutcome {
    pub fn info(&self) -> Option<&ScrapedDrugInfo> {
        match self { ScrapeOutcome::Info(i) => Some(i), ScrapeOutcome::Error { .. } => None }
    }
    pub fn error(&self) -> Option<&str> {
        match self { ScrapeOutcome::Info(_) => None, ScrapeOutcome::Error { error } => Some(error) }
    }
    pub fn is_error(&self) -> bool { self.error().is_some() }
}

impl From<Result<ScrapedDrugInfo, ExtractionError>> for ScrapeOutcome {
    fn from(r: Result<ScrapedDrugInfo, ExtractionError>) -> Self {
        match r {
            Ok(info) => ScrapeOutcome::Info(info),
            Err(e) => ScrapeOutcome::Error { error: e.to_string() },
        }
    }
}

/// URL for a drug name: normalized, lower-cased, not percent-encoded.
pub fn page_url(name: &str, opts: &ScrapeOptions) -> String {
    opts.page_url(&sanitize::slug(name))
}

/// Fetch and extract, keeping the failure kind.
pub fn try_scrape(name: &str, opts: &ScrapeOptions) -> Result<ScrapedDrugInfo, ExtractionError> {
    let url = page_url(name, opts);
    let body = net::http_get(&url, opts.timeout, opts.system_proxy)?;
    Ok(drug_page::extract(&body))
}

/// Fetch and extract; never fails outward.
pub fn scrape(name: &str, opts: &ScrapeOptions) -> ScrapeOutcome {
    let res = try_scrape(name, opts);
    if let Err(e) = &res {
        loge!("scrape {name:?}: {e}");
    }
    res.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_from_mixed_case_name() {
        let opts = ScrapeOptions::default();
        assert_eq!(page_url("  VALSARTAN ", &opts), "https://www.drugs.com/valsartan.html");
        assert_eq!(page_url("ortho evra", &opts), "https://www.drugs.com/ortho evra.html");
    }

    #[test]
    fn error_outcome_serializes_to_single_key() {
        let out: ScrapeOutcome = Err(ExtractionError::Status { url: s!("u"), status: 404 }).into();
        let json = serde_json::to_value(&out).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["error"], "HTTP 404 for u");
    }

    #[test]
    fn info_outcome_serializes_camel_case() {
        let out = ScrapeOutcome::Info(drug_page::extract(""));
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["warningText"], "Not Available");
        assert_eq!(json["beforeTakingList"], serde_json::json!([]));
        assert!(json.get("error").is_none());
    }
}
