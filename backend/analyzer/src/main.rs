use std::{fs, path::PathBuf, process::ExitCode};

use analyzer::{
    html::render_page,
    state::{Analyzer, DEFAULT_ENDPOINT},
    terminal::TerminalObserver,
    upload::Upload,
};
use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Photo to analyze
    image: PathBuf,

    /// Inference endpoint receiving the photo
    #[arg(long, env = "ANALYZER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Also write the result page to this file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Draw the bars at their final length right away
    #[arg(long)]
    no_animate: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let upload = Upload::from_path(&args.image)?;
    let observer = TerminalObserver::new(!args.no_animate);
    let mut analyzer = Analyzer::new(Client::new(), args.endpoint, observer);

    analyzer.select_file(upload);
    let outcome = analyzer.submit().await;
    analyzer.observer_mut().settle().await;

    if let Some(path) = args.html {
        fs::write(&path, render_page(analyzer.state(), analyzer.endpoint()))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}
