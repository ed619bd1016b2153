//! Gemini REST client.

use crate::error::{LlmError, Result, classify_status};
use crate::TextGenerator;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-001";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Sent as a header so the key never shows up in request URLs or errors
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Client for the `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiClient {
    /// Build a client whose every request is bounded by `timeout`
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the generate endpoint
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, instructions: &str, input: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: Some(instructions.to_string()),
                    },
                    Part {
                        text: Some(input.to_string()),
                    },
                ],
            }],
        };

        debug!(model = %self.model, "Calling generateContent");
        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = classify_status(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "Language model call failed");
            return Err(err);
        }

        let body = response.text().await?;
        extract_text(&body)
    }
}

/// Concatenate the text parts of the first candidate in a response body
fn extract_text(body: &str) -> Result<String> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        let reason = parsed
            .prompt_feedback
            .map(|feedback| feedback.to_string())
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(LlmError::InvalidResponse(reason));
    };

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "empty candidate".to_string());
        return Err(LlmError::InvalidResponse(reason));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_key() {
        let result = GeminiClient::new("  ", DEFAULT_API_URL, DEFAULT_MODEL, Duration::from_secs(1));
        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(
            "secret",
            "https://example.test/v1beta/",
            DEFAULT_MODEL,
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-1.5-flash-001:generateContent"
        );
        assert!(!format!("{:?}", client).contains("secret"));
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Day 1: "}, {"text": "Alfama"}], "role": "model"},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;

        assert_eq!(extract_text(body).unwrap(), "Day 1: Alfama");
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        match extract_text(body) {
            Err(LlmError::InvalidResponse(reason)) => assert!(reason.contains("SAFETY")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_extract_text_empty_candidate() {
        let body = r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#;
        match extract_text(body) {
            Err(LlmError::InvalidResponse(reason)) => assert_eq!(reason, "MAX_TOKENS"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    mod transport {
        use super::*;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::{TcpListener, TcpStream};

        const KEY: &str = "SECRET_KEY_123";

        /// Same client as `new` builds, minus any proxy picked up from the environment
        fn client_for(addr: std::net::SocketAddr, timeout: Duration) -> GeminiClient {
            let client =
                GeminiClient::new(KEY, format!("http://{}/v1beta", addr), DEFAULT_MODEL, timeout)
                    .unwrap();
            GeminiClient {
                http_client: HttpClient::builder().timeout(timeout).no_proxy().build().unwrap(),
                ..client
            }
        }

        /// Read one HTTP request (headers plus Content-Length body) as text
        async fn read_request(socket: &mut TcpStream) -> String {
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);

                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length {
                        return text;
                    }
                }
            }
            String::from_utf8_lossy(&raw).to_string()
        }

        #[tokio::test]
        async fn test_key_sent_as_header() {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let server = tokio::spawn(async move {
                let (mut socket, _) = listener.accept().await.unwrap();
                let request = read_request(&mut socket).await;
                let body = r#"{"candidates":[{"content":{"parts":[{"text":"Day 1"}]}}]}"#;
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                request
            });

            let client = client_for(addr, Duration::from_secs(5));
            let text = client.generate("instructions", "Location: Lisbon").await.unwrap();
            let request = server.await.unwrap();

            assert_eq!(text, "Day 1");
            let request_line = request.lines().next().unwrap();
            assert_eq!(
                request_line,
                "POST /v1beta/models/gemini-1.5-flash-001:generateContent HTTP/1.1"
            );
            assert!(request
                .to_lowercase()
                .contains(&format!("x-goog-api-key: {}", KEY.to_lowercase())));
            assert!(request.contains("Location: Lisbon"));
        }

        #[tokio::test]
        async fn test_silent_upstream_times_out() {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            // Accept connections and hold them open without answering
            let server = tokio::spawn(async move {
                let mut held = Vec::new();
                while let Ok((socket, _)) = listener.accept().await {
                    held.push(socket);
                }
            });

            let client = client_for(addr, Duration::from_millis(200));
            let err = client.generate("instructions", "input").await.unwrap_err();
            server.abort();

            assert!(matches!(err, LlmError::Timeout), "unexpected error: {:?}", err);
            assert!(!err.to_string().contains(KEY));
        }

        #[tokio::test]
        async fn test_refused_connection_hides_key() {
            // Reserve a port, then free it so nothing is listening there
            let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();

            let client = client_for(addr, Duration::from_secs(5));
            let err = client.generate("instructions", "input").await.unwrap_err();

            assert!(matches!(err, LlmError::Transport(_)), "unexpected error: {:?}", err);
            assert!(!err.to_string().contains(KEY));
            assert!(!format!("{:?}", err).contains(KEY));
        }
    }

    #[test]
    fn test_extract_text_malformed() {
        assert!(matches!(extract_text("not json"), Err(LlmError::InvalidResponse(_))));
    }
}
