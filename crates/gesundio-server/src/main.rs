use tracing_subscriber::EnvFilter;

use gesundio_server::config::ServerConfig;
use gesundio_server::state::AppState;
use gesundio_storage::backend::StorageBackend;
use gesundio_storage::store::S3Store;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        bucket = %config.bucket,
        document_url_ttl_secs = config.document_url_ttl.as_secs(),
        "starting gesundio server"
    );

    let s3 = gesundio_storage::client::build_client().await;
    let store = S3Store::new(s3, config.bucket);
    let state = AppState::new(StorageBackend::new(store, config.document_url_ttl));

    lambda_http::run(gesundio_server::router(state))
        .await
        .map_err(|e| eyre::eyre!(e))
}
