use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod engine;
mod engines;
mod error;
mod preprocessing;
mod server;

#[derive(Parser, Debug)]
#[command(name = "ocr-relay-server")]
#[command(about = "Relays uploaded images to a remote OCR API and returns the extracted text")]
#[command(version)]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "OCR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "OCR_PORT", default_value = "5000")]
    pub port: u16,

    /// API key for the remote OCR service
    #[arg(long, env = "OCR_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Remote OCR endpoint
    #[arg(long, env = "OCR_URL", default_value = config::DEFAULT_OCR_URL)]
    pub ocr_url: String,

    /// Language code sent with every OCR request (e.g., "eng", "ger", "fre")
    #[arg(long, env = "OCR_LANGUAGE", default_value = "eng")]
    pub language: String,

    /// Uploads larger than this many bytes are downsized before forwarding
    #[arg(long, env = "OCR_RESIZE_THRESHOLD", default_value = "2000000")]
    pub resize_threshold: usize,

    /// Longest side in pixels of a downsized image
    #[arg(
        long,
        env = "OCR_MAX_SIDE",
        default_value = "1000",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_side: u32,

    /// Maximum upload size in bytes (default: 50MB)
    #[arg(long, env = "OCR_MAX_FILE_SIZE", default_value = "52428800")]
    pub max_file_size: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = config::Config::from(args);

    tracing::info!("Starting ocr-relay-server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Binding to {}:{}", config.host, config.port);
    tracing::info!("Forwarding uploads to {}", config.ocr_url);

    server::run(config).await
}
