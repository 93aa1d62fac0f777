//! 公開CSVのリモート取得

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Url;

use crate::error::{IngestError, IngestResult};

const CACHE_BUST_PARAM: &str = "_ts";

pub struct RemoteSource {
    url: String,
    client: reqwest::Client,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// CSV本文を取得する。2xx以外はエラーとして扱う
    pub async fn fetch_csv(&self) -> IngestResult<String> {
        let url = cache_busted_url(&self.url, unix_millis())?;
        log::info!("fetching device CSV from {}", self.url);

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("device CSV request returned {status}");
            return Err(IngestError::HttpStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// リクエストごとにキャッシュ回避用のクエリを付ける
pub fn cache_busted_url(base: &str, stamp: u128) -> IngestResult<Url> {
    let mut url = Url::parse(base).map_err(|err| IngestError::InvalidUrl(format!("{base}: {err}")))?;
    url.query_pairs_mut()
        .append_pair(CACHE_BUST_PARAM, &stamp.to_string());
    Ok(url)
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
