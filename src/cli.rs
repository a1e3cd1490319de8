use std::{path::PathBuf, process::ExitCode};

mod terminal;

use anyhow::Context;
use clap::ArgAction;
use lobster_doxygen::{convert, Config, ConvertError};
use tracing::instrument;

/// Converts Doxygen XML output into a LOBSTER interchange file.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Output file for the LOBSTER interchange data
    #[arg(short, long, default_value = "lobster.json")]
    output: PathBuf,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The directory containing the Doxygen XML output (with index.xml)
    doxygen_xml_folder: PathBuf,
}

impl Cli {
    pub fn run(self) -> ExitCode {
        use terminal::Colorize;

        Self::setup_logging(self.verbose);

        match self.execute() {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("{}", render_error(&error).error());
                ExitCode::from(exit_code(&error))
            }
        }
    }

    #[instrument(skip(self))]
    fn execute(&self) -> anyhow::Result<()> {
        self.log_arguments();

        let config = self.load_config()?;
        let summary = convert(&self.doxygen_xml_folder, &self.output, &config)?;

        tracing::info!(
            "Wrote {} records for {} items to {}",
            summary.records,
            summary.items,
            summary.output.display()
        );
        Ok(())
    }

    fn log_arguments(&self) {
        let config = self
            .config
            .as_ref()
            .map_or_else(|| "None".to_string(), |path| path.display().to_string());

        tracing::info!("Program arguments:");
        tracing::info!("* doxygen_xml_folder = {}", self.doxygen_xml_folder.display());
        tracing::info!("* output = {}", self.output.display());
        tracing::info!("* config = {config}");
        tracing::info!("* verbose = {}", self.verbose);
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let Some(path) = &self.config else {
            return Ok(Config::default());
        };

        tracing::debug!("Loading config from {}", path.display());
        Config::load(path).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// The diagnostic line for a fatal error, causes included.
fn render_error(error: &anyhow::Error) -> String {
    format!("Error: {error:#}")
}

/// Conversion failures carry their own status; everything else is a generic
/// failure.
fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<ConvertError>()
        .map_or(1, ConvertError::exit_code)
}
