// src/core/net.rs

// Single blocking HTTP GET with an explicit timeout. No retry.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::error::ExtractionError;

pub fn http_get(url: &str, timeout: Duration, system_proxy: bool) -> Result<String, ExtractionError> {
    let mut builder = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT);
    if !system_proxy {
        builder = builder.no_proxy();
    }
    let client = builder
        .build()
        .map_err(|e| ExtractionError::Transport { url: s!(url), message: e.to_string() })?;

    logd!("GET {url}");
    let resp = client
        .get(url)
        .send()
        .map_err(|e| classify(url, timeout, e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ExtractionError::Status { url: s!(url), status: status.as_u16() });
    }

    resp.text().map_err(|e| {
        if e.is_timeout() {
            classify(url, timeout, e)
        } else {
            ExtractionError::Body { url: s!(url), message: e.to_string() }
        }
    })
}

fn classify(url: &str, timeout: Duration, e: reqwest::Error) -> ExtractionError {
    if e.is_timeout() {
        ExtractionError::Timeout { url: s!(url), timeout }
    } else {
        ExtractionError::Transport { url: s!(url), message: e.to_string() }
    }
}
