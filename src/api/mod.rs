mod health;
mod notification;

use actix_web::web::ServiceConfig;
use utoipa::OpenApi;

pub use crate::api::health::health_check;
pub use crate::api::notification::relay_notification;

#[derive(OpenApi)]
#[openapi(
    paths(health::health_check, notification::relay_notification),
    tags(
        (name = "notification", description = "모니터링 알림 → Discord 웹훅 중계"),
    ),
)]
pub struct ApiDoc;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(health_check)
        .service(relay_notification);
}
