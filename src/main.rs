use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use pagesmith::application::services::{AccountService, GenerationService, HistoryService};
use pagesmith::infrastructure::auth::{BcryptPasswordHasher, SessionKeys};
use pagesmith::infrastructure::llm::StreamingCompletionClient;
use pagesmith::infrastructure::observability::{TracingConfig, init_tracing};
use pagesmith::infrastructure::persistence::{
    PgMessageRepository, PgUserRepository, create_pool,
};
use pagesmith::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment)?;

    init_tracing(TracingConfig::new(
        &settings.logging.level,
        settings.logging.enable_json,
    ));
    tracing::info!(environment = %environment, "Starting pagesmith");

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;

    if settings.database.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let message_repository = Arc::new(PgMessageRepository::new(pool.clone()));
    let completion_client = Arc::new(StreamingCompletionClient::new(&settings.llm));
    let session_keys = Arc::new(SessionKeys::new(
        &settings.auth.token_secret,
        settings.auth.token_ttl_hours,
    ));

    let state = AppState {
        generation_service: Arc::new(GenerationService::new(
            completion_client,
            message_repository.clone(),
        )),
        account_service: Arc::new(AccountService::new(
            user_repository,
            Arc::new(BcryptPasswordHasher),
        )),
        history_service: Arc::new(HistoryService::new(message_repository)),
        session_keys,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
