//! 见心AI REST API server

use anyhow::Result;
use jianxin_server::{serve, ServeOptions, DEFAULT_ADDR};
use llm_bridge::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // A local .env stands in for deployment secrets
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env();
    let options = ServeOptions {
        addr: std::env::var("JIANXIN_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
        static_dir: std::env::var_os("JIANXIN_STATIC_DIR").map(Into::into),
    };

    serve(options, &settings).await
}
