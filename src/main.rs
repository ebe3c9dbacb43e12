use actix_web::{App, HttpServer};
use actix_web::web::Data;
use dotenv::dotenv;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use incident_relay::api::{self, ApiDoc};
use incident_relay::configuration::Settings;
use incident_relay::telemetry::{get_subscriber, init_subscriber};
use incident_relay::util::discord::DiscordClient;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let subscriber = get_subscriber(
        "incident_relay".into(),
        "info".into(),
        std::io::stdout
    );
    init_subscriber(subscriber)?;

    info!("애플리케이션 시작 중...");

    // 설정이 잘못되면 리스너를 열기 전에 종료
    let settings = Settings::from_env()?;
    info!(settings = ?settings, "환경 변수 로드 완료");

    let discord = Data::new(DiscordClient::from_settings(&settings)?);
    let address = (settings.host.clone(), settings.port);
    let settings = Data::new(settings);
    let openapi = ApiDoc::openapi();

    info!("서버 시작 중: http://{}:{}", address.0, address.1);
    HttpServer::new(move || {
        App::new()
            .app_data(settings.clone())
            .app_data(discord.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(api::configure)
    })
        .bind(address)?
        .run()
        .await?;

    Ok(())
}
