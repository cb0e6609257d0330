mod config;
mod fetcher;
mod models;
mod render;
mod session;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::Cli;
use crate::fetcher::{FileChainSource, HttpChainSource};
use crate::models::TreeModel;
use crate::render::TreeRenderer;
use crate::session::{reject_query, run_query, ChainView, QueryError, ViewState};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let view = ChainView::new();
    let query = cli.query();

    let timer = Instant::now();
    let outcome = match &cli.input {
        Some(path) => {
            let source = FileChainSource::new(path);
            info!("Replaying saved response from [{}]", source.path().display());
            run_query(&source, &view, query.clone()).await
        }
        None => match HttpChainSource::new(&cli.base_url, cli.timeout()) {
            Ok(source) => {
                info!("Querying fraud chain API at [{}]", source.endpoint());
                run_query(&source, &view, query.clone()).await
            }
            Err(error) => reject_query(&view, query.clone(), QueryError::from(error))
        }
    };
    let duration = timer.elapsed();

    info!("Traced fraud chain in: {duration:?}");

    if let Err(error) = &outcome {
        debug!("Query [{query}] produced no chain: {error:?}");
    }

    //NOTE: What gets shown is driven by the published view, failure details were already logged when it was published
    let model = match view.current() {
        ViewState::Ready { query, model } => {
            info!("Rendering fraud chain for [{query}]");
            model
        }
        ViewState::NotFound { query, model } => {
            eprintln!("No fraud chain found for account {} on {}", query.account_number, query.transaction_date);
            model
        }
        ViewState::Failed { query, message } => {
            eprintln!("{message} [{query}]");
            exit(1);
        }
        ViewState::Loading { query } => {
            eprintln!("Query {query} did not complete");
            exit(1);
        }
        ViewState::Idle => {
            eprintln!("No query was run");
            exit(1);
        }
    };

    write_results_to_stdout(cli.renderer().as_ref(), &model)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The rendered chain owns stdout, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(renderer: &dyn TreeRenderer, model: &TreeModel) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    renderer.render(model, &mut output)?;

    output.flush()?;

    Ok(())
}
