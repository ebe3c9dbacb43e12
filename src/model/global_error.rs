use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use std::fmt;
use crate::util::discord::DiscordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 400 BAD REQUEST
    InvalidRequest,
    InvalidPayload,

    // 500 SERVER ERRORS
    InternalError,

    // 502 / 504 UPSTREAM
    DeliveryFailed,
    DeliveryTimeout,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            // 인증 실패는 호출자에게 상세 정보를 주지 않는다
            ErrorCode::InvalidRequest => "invalid request",
            ErrorCode::InvalidPayload => "알림 본문을 해석할 수 없습니다",

            ErrorCode::InternalError => "내부 서버 오류가 발생했습니다",

            ErrorCode::DeliveryFailed => "Discord 웹훅 전송에 실패했습니다",
            ErrorCode::DeliveryTimeout => "Discord 웹훅 응답 시간이 초과되었습니다",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequest |
            ErrorCode::InvalidPayload => StatusCode::BAD_REQUEST,

            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            ErrorCode::DeliveryFailed => StatusCode::BAD_GATEWAY,
            ErrorCode::DeliveryTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ApiError(ErrorCode, Option<String>),
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        AppError::ApiError(code, None)
    }

    pub fn with_detail(code: ErrorCode, detail: String) -> Self {
        AppError::ApiError(code, Some(detail))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::ApiError(code, _) => *code,
        }
    }
}

impl From<DiscordError> for AppError {
    fn from(err: DiscordError) -> Self {
        match err {
            DiscordError::Timeout => AppError::new(ErrorCode::DeliveryTimeout),
            other => AppError::with_detail(ErrorCode::DeliveryFailed, other.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.code().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ApiError(ErrorCode::InvalidRequest, _) => {
                HttpResponse::build(ErrorCode::InvalidRequest.status_code())
                    .content_type(ContentType::plaintext())
                    .body(ErrorCode::InvalidRequest.message())
            }
            AppError::ApiError(code, detail) => {
                let response = ErrorResponse {
                    code: format!("{:?}", code),
                    message: code.message().to_string(),
                    detail: detail.clone(),
                };

                HttpResponse::build(code.status_code())
                    .json(response)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn invalid_request_is_plain_text() {
        let response = AppError::with_detail(ErrorCode::InvalidRequest, "token mismatch".into()).error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body.as_ref(), b"invalid request");
    }

    #[actix_web::test]
    async fn other_errors_are_json_with_detail() {
        let response = AppError::with_detail(ErrorCode::InvalidPayload, "expected value".into()).error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "InvalidPayload");
        assert_eq!(json["detail"], "expected value");
    }

    #[test]
    fn discord_errors_map_to_gateway_codes() {
        assert_eq!(AppError::from(DiscordError::Timeout).code(), ErrorCode::DeliveryTimeout);

        let err = AppError::from(DiscordError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        });
        assert_eq!(err.code(), ErrorCode::DeliveryFailed);
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
