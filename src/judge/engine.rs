//! Execution engine seam and the Judge0 HTTP client
//!
//! The grading core only needs one capability from the sandbox: submit a
//! program with stdin and wait for the outcome. [`ExecutionEngine`] is that
//! capability; [`Judge0Client`] implements it against Judge0's
//! `POST /submissions?wait=true` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::EngineConfig;
use crate::judge::languages::EngineLanguageId;

/// One program run requested from the engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRequest {
    pub source_code: String,
    pub language_id: EngineLanguageId,
    pub stdin: String,
    pub expected_output: String,
}

/// What the engine reported for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineReply {
    pub status_id: u32,
    pub status_description: String,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub message: Option<String>,
    pub time_ms: Option<f64>,
    pub memory_kb: Option<f64>,
}

/// Failures reaching or understanding the engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine request failed: {0}")]
    Transport(String),

    #[error("engine responded with HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed engine reply: {0}")]
    Malformed(String),

    #[error("engine did not answer within {0:?}")]
    Timeout(Duration),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EngineError::Malformed(err.to_string())
        } else {
            EngineError::Transport(err.to_string())
        }
    }
}

/// A sandbox that can run untrusted code synchronously
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    async fn submit(&self, request: &EngineRequest) -> Result<EngineReply, EngineError>;
}

/// Judge0 (CE or RapidAPI-hosted) client
#[derive(Debug, Clone)]
pub struct Judge0Client {
    http: reqwest::Client,
    submissions_url: String,
}

#[derive(Serialize)]
struct Judge0Submission {
    source_code: String,
    language_id: EngineLanguageId,
    stdin: String,
    expected_output: String,
}

#[derive(Deserialize)]
struct Judge0Result {
    stdout: Option<String>,
    stderr: Option<String>,
    compile_output: Option<String>,
    message: Option<String>,
    /// Seconds, usually as a string ("0.012")
    time: Option<serde_json::Value>,
    /// Kilobytes
    memory: Option<f64>,
    status: Option<Judge0Status>,
}

#[derive(Deserialize)]
struct Judge0Status {
    id: u32,
    #[serde(default)]
    description: String,
}

impl Judge0Client {
    /// Build a client from engine configuration
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(key) = &config.api_key {
            let key = HeaderValue::from_str(key)
                .map_err(|_| EngineError::Transport("JUDGE0_API_KEY is not a valid header".into()))?;
            match &config.api_host {
                Some(host) => {
                    let host = HeaderValue::from_str(host).map_err(|_| {
                        EngineError::Transport("JUDGE0_API_HOST is not a valid header".into())
                    })?;
                    headers.insert(HeaderName::from_static("x-rapidapi-key"), key);
                    headers.insert(HeaderName::from_static("x-rapidapi-host"), host);
                }
                None => {
                    headers.insert(HeaderName::from_static("x-auth-token"), key);
                }
            }
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            submissions_url: format!(
                "{}/submissions?base64_encoded=true&wait=true",
                config.base_url.trim_end_matches('/')
            ),
        })
    }
}

#[async_trait]
impl ExecutionEngine for Judge0Client {
    #[instrument(skip_all, fields(language_id = request.language_id.0))]
    async fn submit(&self, request: &EngineRequest) -> Result<EngineReply, EngineError> {
        let body = Judge0Submission {
            source_code: STANDARD.encode(&request.source_code),
            language_id: request.language_id,
            stdin: STANDARD.encode(&request.stdin),
            expected_output: STANDARD.encode(&request.expected_output),
        };

        let response = self.http.post(&self.submissions_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Judge0 rejected submission");
            return Err(EngineError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let result: Judge0Result = response.json().await?;
        let reply = decode_result(result)?;

        debug!(
            status_id = reply.status_id,
            time_ms = ?reply.time_ms,
            memory_kb = ?reply.memory_kb,
            "Judge0 run finished"
        );

        Ok(reply)
    }
}

fn decode_result(result: Judge0Result) -> Result<EngineReply, EngineError> {
    let status = result
        .status
        .ok_or_else(|| EngineError::Malformed("missing status".to_string()))?;

    Ok(EngineReply {
        status_id: status.id,
        status_description: status.description,
        stdout: decode_field(result.stdout)?,
        stderr: decode_field(result.stderr)?,
        compile_output: decode_field(result.compile_output)?,
        message: decode_field(result.message)?,
        time_ms: parse_seconds(result.time.as_ref()).map(|secs| secs * 1000.0),
        memory_kb: result.memory,
    })
}

/// Judge0 wraps base64 output at 60 columns
fn decode_field(field: Option<String>) -> Result<Option<String>, EngineError> {
    let Some(encoded) = field else {
        return Ok(None);
    };

    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| EngineError::Malformed(format!("invalid base64: {}", e)))?;

    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

fn parse_seconds(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap as AxumHeaders, routing::post, Json, Router};
    use serde_json::{json, Value};

    fn config(base_url: String) -> EngineConfig {
        EngineConfig {
            base_url,
            api_key: Some("secret-key".to_string()),
            api_host: None,
            timeout: Duration::from_secs(5),
            max_concurrency: 1,
        }
    }

    /// Fake Judge0 that squares the number on stdin and checks the auth header
    async fn spawn_fake_judge0() -> String {
        async fn submissions(headers: AxumHeaders, Json(body): Json<Value>) -> Json<Value> {
            if headers.get("x-auth-token").and_then(|v| v.to_str().ok()) != Some("secret-key") {
                return Json(json!({ "status": { "id": 13, "description": "Internal Error" } }));
            }
            let stdin = STANDARD.decode(body["stdin"].as_str().unwrap()).unwrap();
            let n: i64 = String::from_utf8(stdin).unwrap().trim().parse().unwrap();
            // Wrapped base64 like the real service produces
            let mut stdout = STANDARD.encode(format!("{}\n", n * n));
            stdout.insert(2, '\n');
            Json(json!({
                "stdout": stdout,
                "stderr": null,
                "compile_output": null,
                "message": null,
                "time": "0.015",
                "memory": 3120,
                "status": { "id": 3, "description": "Accepted" }
            }))
        }

        let app = Router::new().route("/submissions", post(submissions));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request(stdin: &str) -> EngineRequest {
        EngineRequest {
            source_code: "print(int(input())**2)".to_string(),
            language_id: EngineLanguageId(71),
            stdin: stdin.to_string(),
            expected_output: "49".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_round_trip_against_fake_engine() {
        let base_url = spawn_fake_judge0().await;
        let client = Judge0Client::new(&config(base_url)).unwrap();

        let reply = client.submit(&request("7")).await.unwrap();

        assert_eq!(reply.status_id, 3);
        assert_eq!(reply.stdout.as_deref(), Some("49\n"));
        assert_eq!(reply.time_ms, Some(15.0));
        assert_eq!(reply.memory_kb, Some(3120.0));
        assert!(reply.compile_output.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_engine_is_transport_error() {
        let client = Judge0Client::new(&config("http://127.0.0.1:1".to_string())).unwrap();
        let err = client.submit(&request("1")).await.unwrap_err();
        assert!(matches!(err, EngineError::Transport(_)));
    }

    #[test]
    fn test_missing_status_is_malformed() {
        let result: Judge0Result = serde_json::from_value(json!({ "stdout": null })).unwrap();
        assert!(matches!(decode_result(result), Err(EngineError::Malformed(_))));
    }

    #[test]
    fn test_parse_seconds_accepts_string_or_number() {
        assert_eq!(parse_seconds(Some(&json!("0.5"))), Some(0.5));
        assert_eq!(parse_seconds(Some(&json!(0.25))), Some(0.25));
        assert_eq!(parse_seconds(Some(&Value::Null)), None);
        assert_eq!(parse_seconds(None), None);
    }
}
