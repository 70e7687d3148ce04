//! `imgfetch fetch [URLS]...` – run the fetch pipeline.

use anyhow::Result;
use imgfetch_core::config::FetchConfig;
use imgfetch_core::console::{Console, StdConsole};
use imgfetch_core::pipeline::{CurlFetcher, Pipeline, PipelineSettings, RunSummary};
use imgfetch_core::storage;
use imgfetch_core::url_model::parse_url_list;

const CLOSING_LINE: &str = "Connection strengthened. Community enriched.";

const URL_PROMPT: &str = "Please enter one or more image URLs (separated by commas): ";

pub fn run_fetch(cfg: &FetchConfig, args: &[String]) -> Result<()> {
    let mut console = StdConsole::stdio();
    console.say("imgfetch: collecting images from the web, each one only once.")?;
    console.say("")?;
    if let Some(summary) = fetch_with(&mut console, cfg, args)? {
        tracing::info!(
            successful = summary.successful(),
            total = summary.total(),
            output_dir = %cfg.output_dir.display(),
            "fetch finished"
        );
    }
    Ok(())
}

/// URLs from the command line, or from one prompted line when none were given.
pub(crate) fn collect_urls(console: &mut dyn Console, args: &[String]) -> Result<Vec<String>> {
    if args.is_empty() {
        let line = console.read_line(URL_PROMPT)?;
        return Ok(parse_url_list(&line));
    }
    Ok(args.iter().flat_map(|a| parse_url_list(a)).collect())
}

/// Returns `None` when there was nothing to fetch.
pub(crate) fn fetch_with(
    console: &mut dyn Console,
    cfg: &FetchConfig,
    args: &[String],
) -> Result<Option<RunSummary>> {
    let urls = collect_urls(console, args)?;
    if urls.is_empty() {
        console.say("No URLs provided. Exiting.")?;
        return Ok(None);
    }

    storage::ensure_dir(&cfg.output_dir)?;

    let summary = Pipeline::new(
        CurlFetcher::from_config(cfg),
        console,
        PipelineSettings::from_config(cfg),
    )
    .run(&urls);
    console.say("")?;
    console.say(CLOSING_LINE)?;
    Ok(Some(summary))
}
