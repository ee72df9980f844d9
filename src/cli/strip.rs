//! Strip command: remove background shapes from one SVG file.
//!
//! Stages and their status lines:
//!
//! ```text
//! parse      ✓ parsed logo.svg
//! score      [strip] found 2 background elements
//! remove     (skipped on --dry)
//! serialize  ✓ saved as logo_no_background.svg
//! ```
//!
//! Without an input path the settings are read interactively.

use crate::{
    cli::StripArgs,
    config::{NobgConfig, StripConfig},
    debug, log, logger,
    svg::{self, Criteria, Verdict},
    utils::plural_count,
};
use anyhow::{Context, Result, bail};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

/// Everything needed for one strip run.
#[derive(Debug, Clone, PartialEq)]
pub struct StripRequest {
    pub input: PathBuf,
    /// `None` on dry run.
    pub output: Option<PathBuf>,
    pub criteria: Criteria,
    pub tags: Vec<String>,
}

impl StripRequest {
    /// Build a request from already-merged settings.
    fn new(
        input: PathBuf,
        output: Option<PathBuf>,
        dry: bool,
        strip: &StripConfig,
    ) -> Result<Self> {
        let criteria = strip
            .criteria()
            .with_context(|| format!("invalid fill color `{}`", strip.fill))?;
        let output = (!dry).then(|| output.unwrap_or_else(|| strip.output_path(&input)));
        Ok(Self {
            input,
            output,
            criteria,
            tags: strip.tags.clone(),
        })
    }
}

/// Summary of one strip run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Elements that passed the scan.
    pub candidates: usize,
    /// Candidates skipped for malformed attributes.
    pub skipped: usize,
    /// Background elements found.
    pub backgrounds: usize,
    /// Elements detached (0 on dry run).
    pub removed: usize,
    /// Written file, `None` on dry run.
    pub output: Option<PathBuf>,
}

/// Entry point for `nobg strip`.
pub fn run(args: &StripArgs, config: &NobgConfig) -> Result<()> {
    let request = match &args.input {
        Some(input) => StripRequest::new(
            input.clone(),
            args.output.clone(),
            args.dry,
            &config.strip,
        )?,
        None => prompt_request(
            &mut io::stdin().lock(),
            &mut io::stdout(),
            &config.strip,
            args.dry,
        )?,
    };

    let report = strip(&request)?;
    if let Some(output) = &report.output {
        logger::success(&format!("saved as {}", output.display()));
    }
    debug!(
        "strip";
        "{} scanned, {} skipped, {} removed",
        plural_count(report.candidates, "candidate"),
        report.skipped,
        report.removed
    );
    Ok(())
}

/// Run every stage for `request`.
pub fn strip(request: &StripRequest) -> Result<Report> {
    let input = request.input.display();

    let mut doc = svg::parse_file(&request.input)
        .with_context(|| format!("Error parsing SVG file `{input}`"))?;
    logger::success(&format!("parsed {input}"));
    debug!("parse"; "{}", plural_count(doc.element_count(), "element"));

    let criteria = &request.criteria;
    debug!(
        "score";
        "fill {} within {}, area > {}",
        criteria.target,
        criteria.tolerance,
        criteria.size_threshold
    );
    let scored = svg::score_candidates(&doc, &request.tags, criteria);
    let mut report = Report {
        candidates: scored.len(),
        ..Report::default()
    };
    for candidate in &scored {
        if let Verdict::Skipped(reason) = &candidate.verdict {
            report.skipped += 1;
            debug!("score"; "<{}> skipped: {}", candidate.name, reason);
        }
    }
    let backgrounds: Vec<_> = scored
        .iter()
        .filter(|candidate| candidate.verdict.is_background())
        .collect();
    report.backgrounds = backgrounds.len();
    log!("strip"; "found {}", plural_count(report.backgrounds, "background element"));

    let Some(output) = &request.output else {
        for candidate in &backgrounds {
            log!("dry"; "would remove <{}>", candidate.name);
        }
        return Ok(report);
    };

    report.removed = svg::remove(&mut doc, backgrounds);

    svg::write_file(&doc, output)
        .with_context(|| format!("failed to save `{}`", output.display()))?;
    report.output = Some(output.clone());
    Ok(report)
}

// ============================================================================
// interactive prompts
// ============================================================================

/// Read a request from `reader`, showing prompts on `writer`.
///
/// Blank answers keep the configured values.
pub fn prompt_request<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    strip: &StripConfig,
    dry: bool,
) -> Result<StripRequest> {
    let input = ask(reader, writer, "Enter the path to the SVG file: ")?;
    if input.is_empty() {
        bail!("no SVG file given");
    }

    let mut strip = strip.clone();

    let threshold = ask(
        reader,
        writer,
        &format!(
            "Enter size threshold for background detection (default {}): ",
            strip.size_threshold
        ),
    )?;
    if !threshold.is_empty() {
        strip.size_threshold = threshold
            .parse()
            .with_context(|| format!("invalid size threshold `{threshold}`"))?;
    }

    let fill = ask(
        reader,
        writer,
        &format!(
            "Enter fill color for background detection (default {}): ",
            strip.fill
        ),
    )?;
    if !fill.is_empty() {
        strip.fill = fill;
    }

    let output = if dry {
        None
    } else {
        let output = ask(
            reader,
            writer,
            "Enter the output file path (leave blank for default name): ",
        )?;
        (!output.is_empty()).then(|| PathBuf::from(output))
    };

    StripRequest::new(PathBuf::from(input), output, dry, &strip)
}

/// Print `prompt` and read one trimmed line. End of input reads as blank.
fn ask<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, prompt: &str) -> Result<String> {
    write!(writer, "{prompt}")?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
