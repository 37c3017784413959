use anyhow::{Context, Result};
use clap::Parser;
use flower_admin::{
    adapters::{
        inbound::http::{create_router, AdminToken},
        outbound::storage::S3Config,
    },
    app::{AppBuilder, AppConfig, ImageSettings, RepositoryBackend, StorageBackend},
    domain::models::ReconcileOptions,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "flower-admin-server")]
#[command(about = "Admin API for product images and orphan cleanup", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Storage backend type (memory or s3)
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// Repository backend type (memory or database)
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "memory")]
    repository_backend: String,

    /// S3 endpoint URL for S3-compatible services
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 region
    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// Database URL for the product catalog (PostgreSQL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Base of public image URLs, e.g. the hosted project URL
    #[arg(long, env = "PUBLIC_BASE_URL")]
    public_base_url: String,

    /// Path between the base URL and the bucket in public URLs
    #[arg(long, env = "STORAGE_PUBLIC_PATH", default_value = "storage/v1/object/public")]
    public_path: String,

    /// Bucket holding product images
    #[arg(long, env = "IMAGE_BUCKET")]
    bucket: String,

    /// Folder inside the bucket holding product images
    #[arg(long, env = "IMAGE_FOLDER", default_value = "products")]
    folder: String,

    /// Bearer token required on every admin endpoint
    #[arg(long, env = "ADMIN_API_TOKEN", hide_env_values = true)]
    admin_token: String,

    /// Minimum age in minutes before an unreferenced image may be deleted
    #[arg(long, env = "GRACE_PERIOD_MINUTES", default_value = "15")]
    grace_period_minutes: i64,

    /// Maximum number of objects inspected per cleanup run
    #[arg(long, env = "CLEANUP_PAGE_SIZE", default_value = "1000")]
    page_size: usize,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "s3" => {
                let access_key = self
                    .s3_access_key
                    .clone()
                    .context("S3_ACCESS_KEY is required for S3 backend")?;
                let secret_key = self
                    .s3_secret_key
                    .clone()
                    .context("S3_SECRET_KEY is required for S3 backend")?;

                StorageBackend::S3(S3Config {
                    bucket: self.bucket.clone(),
                    region: self.s3_region.clone(),
                    access_key,
                    secret_key,
                    endpoint: self.s3_endpoint.clone(),
                })
            }
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "database" | "db" => {
                let connection_string = self
                    .database_url
                    .clone()
                    .context("DATABASE_URL is required for database backend")?;
                RepositoryBackend::Database { connection_string }
            }
            _ => anyhow::bail!("Unknown repository backend: {}", self.repository_backend),
        };

        anyhow::ensure!(
            self.grace_period_minutes >= 0,
            "GRACE_PERIOD_MINUTES must not be negative"
        );
        anyhow::ensure!(self.page_size > 0, "CLEANUP_PAGE_SIZE must be positive");

        let reconcile = ReconcileOptions::builder()
            .page_size(self.page_size)
            .grace_period(chrono::Duration::minutes(self.grace_period_minutes))
            .build();

        Ok(AppConfig {
            storage_backend,
            repository_backend,
            images: ImageSettings {
                public_base_url: self.public_base_url.clone(),
                public_path: self.public_path.clone(),
                bucket: self.bucket.clone(),
                folder: self.folder.clone(),
            },
            reconcile,
        })
    }

    fn admin_token(&self) -> Result<AdminToken> {
        let token = self.admin_token.trim();
        anyhow::ensure!(!token.is_empty(), "ADMIN_API_TOKEN must not be empty");
        Ok(AdminToken::new(token))
    }

    fn init_logging(&self) -> Result<()> {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{level},tower_http={level}")));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    info!(
        storage_backend = %cli.storage_backend,
        repository_backend = %cli.repository_backend,
        bucket = %cli.bucket,
        folder = %cli.folder,
        "Starting flower admin server"
    );

    let config = cli.to_app_config()?;
    let admin_token = cli.admin_token()?;

    let app_services = AppBuilder::new(config)
        .build()
        .await
        .context("Failed to build application")?;

    let router = create_router(app_services.into_state(admin_token));

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
