//! jianxin CLI
//!
//! Command-line interface for 见心AI: diagnose a screenshot from the
//! terminal, or start the web UI server.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use diagnosis_core::{Mode, Screenshot, SUCCESS_NOTICE};
use jianxin_server::ServeOptions;
use llm_bridge::{GeminiGateway, InferenceGateway, Settings};
use std::path::{Path, PathBuf};

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nhost: ",
    env!("BUILT_HOST"),
    "\ncommit: ",
    env!("BUILT_GIT_COMMIT_HASH"),
    "\nbuilt: ",
    env!("BUILT_TIME_UTC"),
);

#[derive(Parser)]
#[command(name = "jianxin")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "见心AI: upload a screenshot, get a personality diagnosis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose one screenshot and print the Markdown report
    Diagnose {
        /// Screenshot file (jpg, jpeg, png or webp)
        #[arg(short, long)]
        image: PathBuf,

        /// Observation mode: roast / insight, or 锐评 / 洞悉
        #[arg(short, long, default_value = "roast", value_parser = parse_mode)]
        mode: Mode,
    },

    /// Serve the web UI
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Directory holding the built frontend (trunk dist/)
        #[arg(short, long)]
        static_dir: Option<PathBuf>,
    },
}

fn parse_mode(value: &str) -> Result<Mode, String> {
    Mode::from_label(value).map_err(|e| e.to_string())
}

/// Run one diagnosis; fails before touching the network when no key is set
async fn diagnose(settings: &Settings, image: &Path, mode: Mode) -> Result<String> {
    let credential = settings.require_credential()?;
    let screenshot = Screenshot::from_path(image)?;
    let gateway = GeminiGateway::new(settings.gemini.clone(), credential.clone())?;

    gateway
        .diagnose(&screenshot, mode)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // A local .env stands in for deployment secrets
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        rustc = built_info::RUSTC_VERSION,
        target = built_info::TARGET,
        "jianxin {}",
        built_info::PKG_VERSION
    );

    let cli = Cli::parse();
    let settings = Settings::from_env();

    match cli.command {
        Commands::Diagnose { image, mode } => {
            eprintln!("{} | {}", mode.label(), image.display());
            let report = diagnose(&settings, &image, mode).await?;
            println!("{}", report);
            eprintln!("{}", SUCCESS_NOTICE);
            Ok(())
        }
        Commands::Serve {
            host,
            port,
            static_dir,
        } => {
            let options = ServeOptions {
                addr: format!("{}:{}", host, port),
                static_dir,
            };
            jianxin_server::serve(options, &settings)
                .await
                .context("Server stopped")
        }
    }
}
