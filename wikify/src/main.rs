use color_eyre::eyre::Result;
use log::{LevelFilter, info};

mod cli;
mod config;
mod error;
mod utils;
mod walker;

use cli::Cli;
use config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so config loading can already log
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  // Create configuration from CLI and/or config file
  let config = Config::load(&cli)?;

  // Run the main conversion process
  generate_wiki(&config)
}

/// Main wiki generation process
fn generate_wiki(config: &Config) -> Result<()> {
  info!("Starting wiki conversion...");

  let summary = walker::convert_topics(config)?;
  let copied = utils::mirror_tree(&config.work_dir, &config.output_dir)?;

  info!(
    "Wiki generated successfully in {} ({} topics, {} files)",
    config.output_dir.display(),
    summary.converted,
    copied
  );

  Ok(())
}
