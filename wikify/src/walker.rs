//! The sequential TOC walk: load, transform and rewrite each topic in
//! order, emitting one sidebar line per converted topic.

use std::{
  fs,
  io::{BufWriter, Write},
};

use log::{info, warn};
use wikify_markup::{TopicOptions, TopicProcessor, read_toc};

use crate::{config::Config, error::WikifyError};

/// Topics between two progress log lines.
const PROGRESS_INTERVAL: usize = 500;

/// Indent unit for one sidebar nesting level.
const SIDEBAR_INDENT: &str = "  ";

/// Name of the generated sidebar file.
const SIDEBAR_FILE: &str = "_Sidebar.md";

/// Name of the wiki landing page.
const HOME_FILE: &str = "Home.md";

/// Counters for a completed conversion walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
  /// Topics transformed and written back.
  pub converted: usize,

  /// Topics skipped because their markup was irrecoverably malformed.
  pub skipped: usize,
}

/// Walk the table of contents, transforming every topic in place and
/// building the sidebar alongside.
///
/// Topics are processed strictly one at a time, in TOC order; the sidebar
/// writer stays open for the whole walk and is appended in the same order.
/// A topic whose markup cannot be parsed is skipped and excluded from both
/// the output and the sidebar.
///
/// # Errors
///
/// Filesystem faults are fatal and abort the walk: a missing TOC source, an
/// unreadable topic file or an unwritable working directory.
pub fn convert_topics(config: &Config) -> Result<WalkSummary, WikifyError> {
  let entries = read_toc(&config.toc_path)?;
  info!(
    "Found {} topics in {}",
    entries.len(),
    config.toc_path.display()
  );

  let processor = TopicProcessor::new(TopicOptions::default());
  let sidebar_path = config.work_dir.join(SIDEBAR_FILE);
  let mut sidebar = BufWriter::new(fs::File::create(&sidebar_path)?);
  let mut summary = WalkSummary::default();

  for entry in &entries {
    let topic_path = config.work_dir.join(format!("{}.md", entry.key));
    let raw = fs::read_to_string(&topic_path)?;

    let result = match processor.process(&entry.key, &raw) {
      Ok(result) => result,
      Err(err) => {
        warn!("Skipping topic '{}': {err}", entry.key);
        summary.skipped += 1;
        continue;
      },
    };

    fs::write(&topic_path, &result.markdown)?;

    let title = result.title.as_deref().unwrap_or(&entry.key);
    let indent = SIDEBAR_INDENT.repeat(entry.depth.saturating_sub(1));
    let extension = if config.link_extension { ".md" } else { "" };
    writeln!(sidebar, "{indent}- [{title}]({}{extension})", entry.key)?;

    summary.converted += 1;
    if summary.converted % PROGRESS_INTERVAL == 0 {
      info!("Converted {} topics", summary.converted);
    }
  }

  sidebar.flush()?;

  ensure_home(config)?;

  info!(
    "Converted {} topics ({} skipped)",
    summary.converted, summary.skipped
  );
  Ok(summary)
}

/// Synthesize `Home.md` from the configured default topic when no topic
/// already produced one.
fn ensure_home(config: &Config) -> Result<(), WikifyError> {
  let home_path = config.work_dir.join(HOME_FILE);
  if home_path.exists() {
    return Ok(());
  }

  if let Some(default_topic) = &config.default_topic {
    let source = config.work_dir.join(format!("{default_topic}.md"));
    if source.exists() {
      info!("No {HOME_FILE} found, promoting default topic '{default_topic}'");
      fs::copy(&source, &home_path)?;
    }
  }

  Ok(())
}
