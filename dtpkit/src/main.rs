use color_eyre::eyre::{Context, Result};
use dtpkit::{
  cli::{Cli, Commands},
  commands,
};
use dtpkit_config::Config;
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  // Writing a fresh config must not depend on an existing one
  if let Commands::Init { output, .. } = &cli.command {
    commands::run(&cli.command, &Config::default()).wrap_err_with(|| {
      format!(
        "Failed to generate configuration file: {}",
        output.display()
      )
    })?;
    info!(
      "Configuration file created successfully. Edit it to customize \
       numbering and table handling."
    );
    return Ok(());
  }

  let config = Config::load(&cli.config_files, &cli.config_overrides)
    .wrap_err("Failed to load configuration")?;

  commands::run(&cli.command, &config)
    .wrap_err_with(|| format!("Failed to run {}", cli.command.name()))
}
