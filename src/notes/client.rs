//! Pastebin API client
//!
//! Lists the authenticated user's pastes. The `api_user_key` is obtained out of
//! band (Pastebin's login endpoint is not called from here).

use super::models::Paste;
use super::traits::NotesService;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pastebin.com";

const NO_PASTES: &str = "No pastes found.";
const BAD_REQUEST_PREFIX: &str = "Bad API request";

#[derive(Clone)]
pub struct PastebinClient {
    client: reqwest::Client,
    base_url: String,
    dev_key: String,
    user_key: String,
}

/// The list endpoint returns bare sibling `<paste>` elements; they are wrapped
/// in a `<pastes>` root before deserializing.
#[derive(Debug, Deserialize)]
struct PasteList {
    #[serde(rename = "paste", default)]
    pastes: Vec<XmlPaste>,
}

#[derive(Debug, Deserialize)]
struct XmlPaste {
    #[serde(default)]
    paste_title: Option<String>,
    paste_date: i64,
    paste_url: String,
}

impl From<XmlPaste> for Paste {
    fn from(p: XmlPaste) -> Self {
        let title = p
            .paste_title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "Untitled".to_string());
        Paste::new(title, p.paste_date, p.paste_url)
    }
}

/// Parse the body of an `api_option=list` response.
pub fn parse_paste_list(body: &str) -> Result<Vec<Paste>> {
    let body = body.trim();
    if body.is_empty() || body == NO_PASTES {
        return Ok(vec![]);
    }
    if body.starts_with(BAD_REQUEST_PREFIX) {
        anyhow::bail!("Pastebin rejected the request: {}", body);
    }

    let wrapped = format!("<pastes>{}</pastes>", body);
    let list: PasteList =
        quick_xml::de::from_str(&wrapped).context("Failed to parse Pastebin paste list")?;

    let mut pastes: Vec<Paste> = list.pastes.into_iter().map(Paste::from).collect();
    pastes.sort_by(|a, b| b.timestamp_seconds.cmp(&a.timestamp_seconds));
    Ok(pastes)
}

impl PastebinClient {
    pub fn new(
        base_url: impl Into<String>,
        dev_key: impl Into<String>,
        user_key: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            dev_key: dev_key.into(),
            user_key: user_key.into(),
        })
    }
}

#[async_trait]
impl NotesService for PastebinClient {
    async fn latest_notes(&self, limit: usize) -> Result<Vec<Paste>> {
        let url = format!("{}/api/api_post.php", self.base_url);
        let limit = limit.clamp(1, 1000).to_string();
        let form = [
            ("api_dev_key", self.dev_key.as_str()),
            ("api_user_key", self.user_key.as_str()),
            ("api_option", "list"),
            ("api_results_limit", limit.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .with_context(|| format!("Failed to connect to Pastebin at {}", url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read Pastebin response")?;
        if !status.is_success() {
            anyhow::bail!("Pastebin returned {}: {}", status.as_u16(), body);
        }

        parse_paste_list(&body)
    }
}
