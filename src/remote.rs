//! Remote sync client for the spreadsheet endpoint
//!
//! One endpoint: GET returns every row, POST applies one operation.
//! Every call is a single attempt bounded by a timeout.

use crate::config::RemoteConfig;
use crate::error::{Result, VocabError};
use crate::models::{PendingOperation, WordEntry};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const SUCCESS: &str = "success";

/// Read-all and write-one against the remote datastore
pub trait SheetRemote: Send + Sync {
    /// Fetch every word row
    fn fetch_words(&self) -> impl Future<Output = Result<Vec<WordEntry>>> + Send;

    /// Deliver one operation; `Ok` only when the endpoint reports success
    fn send(
        &self,
        op: &PendingOperation,
        timeout: Duration,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// reqwest-backed client
pub struct HttpRemote {
    client: Client,
    endpoint: String,
    read_timeout: Duration,
}

#[derive(Deserialize)]
struct WriteResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
}

impl HttpRemote {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(VocabError::Config("remote.endpoint is empty".into()));
        }

        let client = Client::builder()
            .user_agent(concat!("vocab-deck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            read_timeout: config.read_timeout(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify(err: reqwest::Error, timeout: Duration) -> VocabError {
        if err.is_timeout() {
            VocabError::Timeout(timeout.as_secs())
        } else {
            VocabError::Http(err)
        }
    }
}

impl SheetRemote for HttpRemote {
    async fn fetch_words(&self) -> Result<Vec<WordEntry>> {
        let started = Instant::now();
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(self.read_timeout)
            .send()
            .await
            .map_err(|e| Self::classify(e, self.read_timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VocabError::RemoteStatus {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::classify(e, self.read_timeout))?;
        let words = parse_words_body(&body)?;
        debug!(
            "fetched {} words from {} in {:?}",
            words.len(),
            self.endpoint,
            started.elapsed()
        );
        Ok(words)
    }

    async fn send(&self, op: &PendingOperation, timeout: Duration) -> Result<()> {
        debug!("sending {} {:?}", op.action(), op.word());
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(timeout)
            .json(op)
            .send()
            .await
            .map_err(|e| Self::classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VocabError::RemoteStatus {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.text().await.map_err(|e| Self::classify(e, timeout))?;
        parse_write_body(&body)
    }
}

/// `{ result: "success", words: [...] }`; anything else is malformed
pub fn parse_words_body(body: &str) -> Result<Vec<WordEntry>> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| VocabError::MalformedResponse(e.to_string()))?;

    let ok = json.get("result").and_then(|r| r.as_str()) == Some(SUCCESS);
    let rows = match (ok, json.get("words").and_then(|w| w.as_array())) {
        (true, Some(rows)) => rows,
        _ => {
            return Err(VocabError::MalformedResponse(
                "Invalid data format from sheet".into(),
            ))
        }
    };

    let mut words = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        if !row.is_object() {
            warn!("Ignoring malformed sheet row {}: not an object", index);
            continue;
        }
        match serde_json::from_value::<WordEntry>(row.clone()) {
            Ok(entry) if entry.word.is_empty() => debug!("Skipping sheet row {}: no word", index),
            Ok(entry) => words.push(entry),
            Err(e) => warn!("Ignoring malformed sheet row {}: {}", index, e),
        }
    }
    Ok(words)
}

pub fn parse_write_body(body: &str) -> Result<()> {
    let response: WriteResponse = serde_json::from_str(body)
        .map_err(|e| VocabError::MalformedResponse(e.to_string()))?;

    match response.result {
        Some(serde_json::Value::String(ref r)) if r == SUCCESS => Ok(()),
        Some(other) => Err(VocabError::Rejected(match other {
            serde_json::Value::String(s) => s,
            v => v.to_string(),
        })),
        None => Err(VocabError::Rejected("missing".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_words_body_filters_rows() {
        let body = r#"{
            "result": "success",
            "words": [
                {"word": "Apple", "meaning": "fruit", "synonyms": "pome, fruit"},
                {"word": ""},
                "garbage",
                null,
                [1, 2],
                {"word": "Banana", "synonyms": ["plantain"]}
            ]
        }"#;
        let words = parse_words_body(body).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].synonyms, vec!["pome", "fruit"]);
        assert_eq!(words[1].word, "Banana");
    }

    #[test]
    fn test_parse_words_body_rejects_bad_shapes() {
        assert!(matches!(
            parse_words_body(r#"{"result":"error","words":[]}"#),
            Err(VocabError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_words_body(r#"{"result":"success"}"#),
            Err(VocabError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_words_body("<html>quota exceeded</html>"),
            Err(VocabError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_write_body() {
        assert!(parse_write_body(r#"{"result":"success"}"#).is_ok());
        assert!(matches!(
            parse_write_body(r#"{"result":"error","message":"locked"}"#),
            Err(VocabError::Rejected(r)) if r == "error"
        ));
        assert!(matches!(parse_write_body("{}"), Err(VocabError::Rejected(_))));
        assert!(matches!(
            parse_write_body("not json"),
            Err(VocabError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_empty_endpoint_is_config_error() {
        let config = RemoteConfig {
            endpoint: "  ".into(),
            ..RemoteConfig::default()
        };
        assert!(matches!(HttpRemote::new(&config), Err(VocabError::Config(_))));
    }
}
