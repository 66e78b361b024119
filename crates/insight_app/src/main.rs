mod actions;
mod cli;
mod config;
mod logging;
mod render;
mod shell;

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use insight_core::{validate_article_url, SessionCache, DEFAULT_TOPIC};
use insight_engine::Pipeline;
use insight_logging::{insight_error, insight_info};

use crate::cli::{Action, Cli};
use crate::config::AppConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            insight_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    let settings = config.to_engine_settings();
    insight_info!(
        "Model {} at {}, topic fetcher {:?}, url fetcher {:?}",
        settings.model.model,
        settings.model.host,
        settings.topic_strategy,
        settings.url_strategy
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        let pipeline = Pipeline::from_settings(&settings)?;
        let mut cache = SessionCache::new();
        let mut out = io::stdout().lock();

        match cli.command {
            Action::Topic { query } => {
                let query = if query.is_empty() {
                    DEFAULT_TOPIC.to_string()
                } else {
                    query.join(" ")
                };
                actions::topic(&pipeline, &mut cache, &query, &mut out).await
            }
            Action::Url { url } => {
                let url = validate_article_url(&url)?;
                actions::url(&pipeline, &mut cache, &url, &mut out).await
            }
            Action::Pdf { path, preview_only } => {
                let (name, bytes) = actions::read_pdf(&path)?;
                actions::pdf(&pipeline, &name, &bytes, preview_only, &mut out).await
            }
            Action::Shell => {
                let input = io::stdin().lock();
                shell::run_shell(&pipeline, input, &mut out).await?;
                Ok(true)
            }
        }
    })
}
