use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quasar_oauth=info,tower_sessions=warn")),
        )
        .init();

    if let Err(err) = quasar_oauth::run().await {
        tracing::error!(code = err.code(), "fatal: {err}");
        std::process::exit(1);
    }
}
