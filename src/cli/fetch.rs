//! Fetch command: download one file and print it.

use crate::{
    config::{FetchConfig, NobgConfig},
    debug,
    fetch::{FAILURE_MESSAGE, fetch_text},
    logger,
};
use anyhow::{Context, Result};
use std::io::{self, Write};

/// Entry point for `nobg fetch`.
pub fn run(config: &NobgConfig) -> Result<()> {
    fetch_to(&config.fetch, &mut io::stdout().lock())
}

/// Write the body to `out`, or the failure message on a non-200 answer.
///
/// A non-200 answer is not an error. Invalid URLs and network failures are.
fn fetch_to<W: Write>(fetch: &FetchConfig, out: &mut W) -> Result<()> {
    debug!("fetch"; "GET {}", fetch.url);

    match fetch_text(fetch) {
        Ok(body) => {
            writeln!(out, "{body}")?;
            logger::success(&format!("fetched {}", fetch.url));
        }
        Err(err) if err.is_status() => {
            debug!("fetch"; "{}", err);
            writeln!(out, "{FAILURE_MESSAGE}")?;
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to fetch `{}`", fetch.url));
        }
    }
    out.flush()?;
    Ok(())
}
