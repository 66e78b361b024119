//! One user action each: run the pipeline, write the outcome to `out`.
//!
//! Pipeline failures are printed, not propagated; the returned flag tells the
//! caller whether the action succeeded. Only write errors escape as `Err`.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use insight_core::SessionCache;
use insight_engine::Pipeline;
use insight_logging::insight_warn;

use crate::render;

pub async fn topic(
    pipeline: &Pipeline,
    cache: &mut SessionCache,
    query: &str,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    writeln!(out, "Searching news for {query:?}...")?;
    match pipeline.analyze_topic(query, cache).await {
        Ok(Some(analysis)) => {
            write!(out, "{}", render::topic(&analysis))?;
            Ok(true)
        }
        Ok(None) => {
            writeln!(out, "{}", render::NO_ARTICLES)?;
            Ok(false)
        }
        Err(failure) => {
            writeln!(out, "{}", render::failure(&failure))?;
            Ok(false)
        }
    }
}

pub async fn url(
    pipeline: &Pipeline,
    cache: &mut SessionCache,
    url: &str,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    writeln!(out, "Fetching {url}...")?;
    match pipeline.analyze_url(url, cache).await {
        Ok(report) => {
            write!(out, "{}", render::report(&report))?;
            Ok(true)
        }
        Err(failure) => {
            writeln!(out, "{}", render::failure(&failure))?;
            Ok(false)
        }
    }
}

/// Reads a PDF from disk, returning its file name and bytes.
pub fn read_pdf(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let bytes = fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((name, bytes))
}

/// Shows a preview of the extracted text, then analyzes it unless `preview_only`.
pub async fn pdf(
    pipeline: &Pipeline,
    name: &str,
    bytes: &[u8],
    preview_only: bool,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let text = match pipeline.extract_pdf(name, bytes) {
        Ok(text) => text,
        Err(failure) => {
            insight_warn!("PDF {} rejected: {}", name, failure);
            writeln!(out, "{}", render::failure(&failure))?;
            return Ok(false);
        }
    };
    write!(out, "{}", render::pdf_preview(&text))?;
    if preview_only {
        return Ok(true);
    }

    match pipeline.analyze_extracted(name, &text).await {
        Ok(report) => {
            write!(out, "{}", render::report(&report))?;
            Ok(true)
        }
        Err(failure) => {
            writeln!(out, "{}", render::failure(&failure))?;
            Ok(false)
        }
    }
}
