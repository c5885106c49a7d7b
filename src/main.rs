// Entrypoint for the CLI application.
// - Keeps `main` small: load config, build the prediction client and hand
//   it to the UI loop (or to a single one-shot interaction).
// - Returns `anyhow::Result` so configuration errors surface with context.

use anyhow::Context;
use clap::Parser;
use dogbreed_cli::{config, logging, ui, Config, ImageSource, PredictionClient};
use reqwest::blocking::Client;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "dogbreed", about = "Classify dog breeds with a Custom Vision model")]
struct Args {
    /// Classify a local jpg/jpeg/png file and exit
    #[arg(long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Classify an image fetched from a URL and exit
    #[arg(long)]
    url: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "DOGBREED_LOG", default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logging::init(&args.log_level);

    // KEY, ENDPOINT, PROJECT_ID and PUBLISHED_ITERATION_NAME, optionally from
    // a `.env` file. Variables already in the environment are kept.
    config::load_dotenv();
    let config = Config::from_env().context("Failed to load Custom Vision configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let classifier = PredictionClient::new(config).context("Failed to build prediction client")?;
    let http = Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let source = match (args.file, args.url) {
        (Some(path), _) => ImageSource::Upload(path),
        (None, Some(url)) => ImageSource::Url(url),
        (None, None) => {
            // Blocks until the user exits.
            ui::main_menu(&http, &classifier)?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    println!("{}", ui::TITLE);
    if ui::classify_and_show(&mut std::io::stdout(), &source, &http, &classifier)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
