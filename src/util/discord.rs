use std::time::Duration;

use bytes::Bytes;
use reqwest::{header, Client, StatusCode, Url};
use thiserror::Error;
use tracing::instrument;

use crate::configuration::Settings;

// 로그에 남길 응답 본문 최대 길이
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Discord 웹훅이 {status} 상태 코드를 반환했습니다")]
    Status { status: StatusCode, body: String },
    #[error("Discord 웹훅 응답 시간 초과")]
    Timeout,
    #[error("Discord 웹훅 요청 실패: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP 클라이언트 생성 실패: {0}")]
    Build(#[source] reqwest::Error),
}

impl DiscordError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DiscordError::Status { status, .. } => Some(*status),
            DiscordError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DiscordError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DiscordError::Timeout
        } else {
            DiscordError::Transport(err)
        }
    }
}

/// 설정된 Discord 웹훅으로 JSON 본문을 POST 하는 클라이언트.
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: Client,
    webhook_url: Url,
}

impl DiscordClient {
    pub fn new(webhook_url: Url, timeout: Duration) -> Result<Self, DiscordError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DiscordError::Build)?;

        Ok(Self { http, webhook_url })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, DiscordError> {
        Self::new(settings.discord_webhook_url.clone(), settings.delivery_timeout)
    }

    /// 직렬화된 본문을 그대로 보낸다. 2xx 이외의 응답은 에러.
    #[instrument(name = "discord_send", skip_all, fields(bytes = payload.len()))]
    pub async fn send(&self, payload: Bytes) -> Result<StatusCode, DiscordError> {
        let res = self
            .http
            .post(self.webhook_url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            return Ok(status);
        }

        let body = res
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect();

        Err(DiscordError::Status { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use serde_json::json;

    fn client_for(server: &Server, timeout: Duration) -> DiscordClient {
        let url = Url::parse(&server.url_str("/webhook")).unwrap();
        DiscordClient::new(url, timeout).unwrap()
    }

    #[tokio::test]
    async fn posts_exact_payload_as_json() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/webhook"),
                request::headers(contains(("content-type", "application/json"))),
                request::body(json_decoded(eq(json!({ "embeds": [] })))),
            ])
            .respond_with(status_code(204)),
        );

        let client = client_for(&server, Duration::from_secs(5));
        let status = client.send(Bytes::from_static(br#"{"embeds":[]}"#)).await.unwrap();

        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/webhook"))
                .respond_with(status_code(500).body("upstream exploded")),
        );

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.send(Bytes::from_static(b"{}")).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        match err {
            DiscordError::Status { body, .. } => assert_eq!(body, "upstream exploded"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn client_error_status_is_an_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/webhook"))
                .respond_with(status_code(404)),
        );

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.send(Bytes::from_static(b"{}")).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn slow_webhook_times_out() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/webhook"))
                .respond_with(delay_and_then(Duration::from_secs(2), status_code(200))),
        );

        let client = client_for(&server, Duration::from_millis(200));
        let err = client.send(Bytes::from_static(b"{}")).await.unwrap_err();

        assert!(matches!(err, DiscordError::Timeout), "{err:?}");
    }
}
