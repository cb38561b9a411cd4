//! Remote snapshot sources.
//!
//! [`SnapshotSource`] is the seam between the store and the network.
//! [`HttpSnapshotSource`] issues a single GET of `<base><code>` per fetch;
//! there are no retries.

use std::future::Future;

use reqwest::Url;

use crate::domain::{IndividualSnapshot, LocationCode, decode_envelope};
use crate::error::StatsError;

/// Something that can produce the current snapshot for a location.
pub trait SnapshotSource: Send + Sync {
    /// Fetches the snapshot for `code`.
    ///
    /// # Errors
    ///
    /// Implementations return [`StatsError::Transport`] for network
    /// failures and decode errors for malformed payloads.
    fn fetch(
        &self,
        code: &LocationCode,
    ) -> impl Future<Output = Result<IndividualSnapshot, StatsError>> + Send;
}

/// HTTP source reading one JSON document per location code.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSnapshotSource {
    /// Creates a source for the given base URL.
    ///
    /// A trailing `/` is added to the base path if missing so the code is
    /// appended as a new path segment.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Config`] if `base_url` cannot be a base.
    pub fn new(mut base_url: Url) -> Result<Self, StatsError> {
        if base_url.cannot_be_a_base() {
            return Err(StatsError::Config(format!(
                "snapshot base url cannot be a base: {base_url}"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Returns the base URL snapshots are fetched from.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the URL of the snapshot for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidInput`] if the code is empty or is not
    /// a single path segment.
    pub fn url_for(&self, code: &LocationCode) -> Result<Url, StatsError> {
        let raw = code.as_str();
        if raw.is_empty() || raw.contains('/') || raw == "." || raw == ".." {
            return Err(StatsError::InvalidInput(format!(
                "location code is not a valid path segment: {code:?}"
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StatsError::Config(format!("invalid base url: {}", self.base_url)))?
            .pop_if_empty()
            .push(raw);
        Ok(url)
    }
}

impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self, code: &LocationCode) -> Result<IndividualSnapshot, StatsError> {
        let url = self.url_for(code)?;
        tracing::debug!(%code, %url, "fetching snapshot");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%code, %status, "snapshot fetch rejected");
            return Err(StatsError::Transport(format!(
                "GET {code} returned {status}"
            )));
        }

        let body = response.bytes().await?;
        let snapshot: IndividualSnapshot = decode_envelope(&body)?;
        tracing::info!(%code, time = %snapshot.time, "snapshot fetched");
        Ok(snapshot)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpSnapshotSource {
        let Ok(url) = Url::parse(base) else {
            panic!("valid url");
        };
        let Ok(src) = HttpSnapshotSource::new(url) else {
            panic!("valid source");
        };
        src
    }

    #[test]
    fn appends_code_as_path_segment() {
        let src = source("https://tirania.org/covid-data/");
        let Ok(url) = src.url_for(&LocationCode::from("CA-ON")) else {
            panic!("url_for failed");
        };
        assert_eq!(url.as_str(), "https://tirania.org/covid-data/CA-ON");
    }

    #[test]
    fn adds_missing_trailing_slash() {
        let src = source("https://tirania.org/covid-data");
        assert_eq!(src.base_url().path(), "/covid-data/");
        let Ok(url) = src.url_for(&LocationCode::from("FR")) else {
            panic!("url_for failed");
        };
        assert_eq!(url.as_str(), "https://tirania.org/covid-data/FR");
    }

    #[test]
    fn encodes_spaces_in_codes() {
        let src = source("https://tirania.org/covid-data/");
        let Ok(url) = src.url_for(&LocationCode::from("US Cook")) else {
            panic!("url_for failed");
        };
        assert_eq!(url.as_str(), "https://tirania.org/covid-data/US%20Cook");
    }

    #[test]
    fn rejects_codes_that_escape_the_base() {
        let src = source("https://tirania.org/covid-data/");
        assert!(src.url_for(&LocationCode::from("../secret")).is_err());
        assert!(src.url_for(&LocationCode::from("..")).is_err());
        assert!(src.url_for(&LocationCode::from("")).is_err());
    }

    #[test]
    fn rejects_non_base_urls() {
        let Ok(url) = Url::parse("mailto:someone@example.com") else {
            panic!("valid url");
        };
        assert!(matches!(
            HttpSnapshotSource::new(url),
            Err(StatsError::Config(_))
        ));
    }
}
