use anyhow::{Context, Result};
use log::debug;
use std::io::Write;
use url::Url;

use crate::config::FetchConfig;
use crate::connection::{Connector, HttpConnector};
use crate::fetcher::{FetchOutcome, Fetcher};

pub async fn run(config: &FetchConfig) -> Result<()> {
    let connector = HttpConnector::new(config)?;
    let fetcher = Fetcher::new(connector);
    let stdout = std::io::stdout();
    run_with(&fetcher, &config.url, &mut stdout.lock()).await
}

/// Fetches `url` and writes the success line to `out`; a non-2xx status
/// becomes an `HttpStatusError`.
pub async fn run_with<C, W>(fetcher: &Fetcher<C>, url: &Url, out: &mut W) -> Result<()>
where
    C: Connector,
    W: Write,
{
    let outcome = fetcher.fetch(url).await?;
    if let FetchOutcome::Failure { message, .. } = &outcome {
        debug!("{}", message);
    }

    let size = outcome.into_result()?;
    writeln!(out, "Successfully downloaded url, size={} bytes", size)
        .context("Failed to write report")?;
    Ok(())
}
