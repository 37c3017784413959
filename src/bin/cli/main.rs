use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "flower-admin-cli")]
#[command(about = "CLI for the flower admin server", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "ADMIN_API_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Admin bearer token
    #[arg(long, env = "ADMIN_API_TOKEN", hide_env_values = true)]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Delete stored images no product references
    Cleanup,

    /// Show which images a cleanup would delete, without deleting
    Preview,

    /// Upload a product image
    Upload {
        /// Image file to upload
        file: PathBuf,
    },

    /// Delete an image by its public URL
    DeleteImage {
        /// Public URL of the image
        #[arg(long)]
        url: String,
    },

    /// Check that the server is up
    Health,
}

struct AdminClient {
    http: Client,
    base_url: String,
    token: String,
}

impl AdminClient {
    fn new(base_url: &str, token: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.context("Request to server failed")?;
        read_json(response).await
    }

    async fn cleanup(&self) -> Result<Value> {
        let request = self.http.post(self.endpoint("/admin/cleanup-images"));
        self.send(self.authorized(request)).await
    }

    async fn preview(&self) -> Result<Value> {
        let request = self.http.get(self.endpoint("/admin/cleanup-images/preview"));
        self.send(self.authorized(request)).await
    }

    async fn upload(&self, file: &Path) -> Result<Value> {
        let data = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .context("File path has no usable file name")?
            .to_string();

        let part = multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(content_type_for(file).essence_str())?;
        let form = multipart::Form::new().part("file", part);

        let request = self.http.post(self.endpoint("/admin/images")).multipart(form);
        self.send(self.authorized(request)).await
    }

    async fn delete_image(&self, url: &str) -> Result<Value> {
        let request = self
            .http
            .delete(self.endpoint("/admin/images"))
            .query(&[("url", url)]);
        self.send(self.authorized(request)).await
    }

    async fn health(&self) -> Result<Value> {
        self.send(self.http.get(self.endpoint("/health"))).await
    }
}

async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .with_context(|| format!("Server answered {} with a non-JSON body", status))?;

    if !status.is_success() {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message");
        anyhow::bail!("Server answered {}: {}", status, message);
    }

    Ok(body)
}

fn content_type_for(file: &Path) -> mime_guess::Mime {
    mime_guess::from_path(file).first_or_octet_stream()
}

/// One-line summary of a cleanup report, as the admin UI shows it
fn summarize_cleanup(report: &Value) -> String {
    let deleted = report.get("deleted").and_then(Value::as_u64).unwrap_or(0);
    let errors: Vec<&str> = report
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| errors.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    if errors.is_empty() {
        format!("Deleted {} orphaned image(s)", deleted)
    } else {
        format!(
            "Deleted {} orphaned image(s) with {} error(s): {}",
            deleted,
            errors.len(),
            errors.join("; ")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = AdminClient::new(&cli.url, &cli.token);

    match &cli.command {
        Commands::Cleanup => {
            let report = client.cleanup().await?;
            println!("{}", summarize_cleanup(&report));
        }
        Commands::Preview => {
            let plan = client.preview().await?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Commands::Upload { file } => {
            let uploaded = client.upload(file).await?;
            println!("{}", serde_json::to_string_pretty(&uploaded)?);
        }
        Commands::DeleteImage { url } => {
            let outcome = client.delete_image(url).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Health => {
            let health = client.health().await?;
            println!("{}", health);
        }
    }

    Ok(())
}
