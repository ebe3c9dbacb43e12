use actix_web::http::header::ContentType;
use actix_web::{get, HttpResponse, Responder};

/// 로드밸런서/오케스트레이터용 상태 확인. Discord 웹훅은 호출하지 않는다.
#[utoipa::path(
    get,
    path = "/health-check",
    summary = "중계 서버 상태 확인",
    responses(
        (status = 200, description = "알림 중계 서버가 요청을 받을 수 있음", body = String)
    ),
    tag = "health",
)]
#[get("/health-check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("OK")
}
