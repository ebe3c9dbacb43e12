use actix_web::http::header::ContentType;
use actix_web::{post, web, HttpRequest, HttpResponse};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::IntoParams;
use crate::configuration::Settings;
use crate::model::discord::DiscordMessage;
use crate::model::global_error::{AppError, ErrorCode};
use crate::model::incident::{IncidentState, IncomingNotification};
use crate::util::discord::DiscordClient;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuthQuery {
    /// 사전에 공유된 인증 토큰
    pub auth_token: Option<String>,
}

#[utoipa::path(
    post,
    path = "/",
    summary = "모니터링 알림을 Discord로 전달",
    params(AuthQuery),
    request_body = IncomingNotification,
    responses(
        (status = 200, description = "Discord 전송 성공, 전송한 메시지를 그대로 반환", body = DiscordMessage),
        (status = 400, description = "잘못된 토큰 또는 해석할 수 없는 본문"),
        (status = 502, description = "Discord 웹훅이 실패 응답을 반환"),
        (status = 504, description = "Discord 웹훅 응답 시간 초과"),
    ),
    tag = "notification",
)]
#[post("/")]
pub async fn relay_notification(
    req: HttpRequest,
    body: web::Bytes,
    settings: web::Data<Settings>,
    discord: web::Data<DiscordClient>,
) -> Result<HttpResponse, AppError> {
    // 토큰 검증이 본문 해석보다 먼저
    authorize(&req, &settings)?;

    let notification = IncomingNotification::from_slice(&body)
        .map_err(|e| {
            warn!(error = %e, "알림 본문 해석 실패");
            AppError::with_detail(ErrorCode::InvalidPayload, e.to_string())
        })?;

    let incident = &notification.incident;
    if let IncidentState::Other(state) = &incident.state {
        warn!(incident_id = %incident.incident_id, state = %state, "알 수 없는 인시던트 상태, 해결됨으로 처리");
    }

    let message = DiscordMessage::from(&notification);
    let payload = Bytes::from(serde_json::to_vec(&message).map_err(|e| {
        error!(error = %e, "Discord 메시지 직렬화 실패");
        AppError::new(ErrorCode::InternalError)
    })?);

    match discord.send(payload.clone()).await {
        Ok(status) => {
            info!(
                incident_id = %incident.incident_id,
                state = incident.state.as_str(),
                started_at = ?incident.started_at_utc(),
                status = status.as_u16(),
                "Discord 전송 완료"
            );
        }
        Err(err) => {
            error!(
                payload = %String::from_utf8_lossy(&payload),
                status = ?err.status().map(|s| s.as_u16()),
                error = %err,
                "Discord 전송 실패"
            );
            return Err(err.into());
        }
    }

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(payload))
}

fn authorize(req: &HttpRequest, settings: &Settings) -> Result<(), AppError> {
    let token = web::Query::<AuthQuery>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.into_inner().auth_token);

    match token {
        Some(token) if token == settings.auth_token => Ok(()),
        _ => Err(AppError::new(ErrorCode::InvalidRequest)),
    }
}
