use std::fmt;

use engine_logging::engine_debug;
use homework_core::{CycleError, HOMEWORKS_FIELD};
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::{ClientError, PollSettings, Secret};

/// Source of homework status payloads.
#[async_trait::async_trait]
pub trait HomeworkApi: Send + Sync {
    /// One request for statuses changed since `from_date`. No retries.
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError>;
}

#[derive(Clone)]
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: Url,
    authorization: Secret,
    request_timeout_secs: u64,
}

impl fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("authorization", &self.authorization)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish_non_exhaustive()
    }
}

impl PracticumClient {
    pub fn new(settings: PollSettings) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&settings.endpoint).map_err(|err| ClientError::InvalidUrl {
            url: settings.endpoint.clone(),
            message: err.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            authorization: Secret::new(format!("OAuth {}", settings.token.expose())),
            request_timeout_secs: settings.request_timeout.as_secs(),
        })
    }
}

#[async_trait::async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, CycleError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("from_date", &from_date.to_string());

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.authorization.expose())
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CycleError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;
        let payload: Value =
            serde_json::from_slice(&body).map_err(|err| CycleError::Decode(err.to_string()))?;
        engine_debug!(
            "Polled homework statuses from_date={} homeworks={} bytes={}",
            from_date,
            homework_count(&payload),
            body.len()
        );
        Ok(payload)
    }
}

impl PracticumClient {
    fn map_reqwest_error(&self, err: reqwest::Error) -> CycleError {
        if err.is_timeout() {
            return CycleError::Timeout(self.request_timeout_secs);
        }
        // Drop the url from the message: it carries the query and varies per cycle.
        CycleError::Transport(err.without_url().to_string())
    }
}

/// Records in the payload; 0 for a payload the validator will reject.
fn homework_count(payload: &Value) -> usize {
    payload
        .get(HOMEWORKS_FIELD)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
