// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, Result,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Subcommand, ValueEnum};
use pspec_metadata::PspecExitCode;
use pspec_runner::{
    config::{CliSettings, ConfigLocation, PspecConfig},
    errors::DisplayErrorChain,
    input::{EventReader, InputFormat},
    reporter::{Reporter, ReporterBuilder},
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
};
use tracing::debug;

/// Spec-style test reports for test event streams.
///
/// This binary should typically be invoked as `cargo pspec` (in which case
/// this message will not be seen), not `cargo-pspec`.
#[derive(Debug, clap::Parser)]
#[command(
    version,
    bin_name = "cargo",
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct CargoPspecApp {
    #[clap(subcommand)]
    subcommand: PspecSubcommand,
}

impl CargoPspecApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        match &self.subcommand {
            PspecSubcommand::Pspec(opts) => opts.output.init(),
        }
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        match self.subcommand {
            PspecSubcommand::Pspec(opts) => opts.exec(output, output_writer),
        }
    }
}

#[derive(Debug, Subcommand)]
enum PspecSubcommand {
    /// Renders a test event stream as a spec-style report.
    Pspec(Box<AppOpts>),
}

#[derive(Debug, Args)]
#[command(display_name = "cargo-pspec")]
struct AppOpts {
    /// Render results spec-style instead of as a progress stream
    #[arg(long)]
    pspec: bool,

    /// Use plain ASCII glyphs
    #[arg(long)]
    plaintext: bool,

    /// Config file [default: pspec.toml or .config/pspec.toml, if present]
    ///
    /// Pass in `none` to skip loading a config file.
    #[arg(long, value_name = "PATH", env = "PSPEC_CONFIG_FILE")]
    config_file: Option<String>,

    /// Dialect of the event stream
    #[arg(long, value_enum, default_value_t, value_name = "FORMAT")]
    input_format: InputFormatOpt,

    /// Read events from this file instead of standard input
    ///
    /// `-` reads from standard input.
    #[arg(long, value_name = "PATH")]
    input: Option<Utf8PathBuf>,

    #[clap(flatten)]
    output: OutputOpts,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum InputFormatOpt {
    /// One tagged JSON object per line
    #[default]
    Pspec,

    /// The JSON output of libtest's `--format json`
    Libtest,
}

impl From<InputFormatOpt> for InputFormat {
    fn from(opt: InputFormatOpt) -> Self {
        match opt {
            InputFormatOpt::Pspec => InputFormat::Pspec,
            InputFormatOpt::Libtest => InputFormat::Libtest,
        }
    }
}

impl AppOpts {
    fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let cwd = current_dir()?;
        let config = PspecConfig::from_location(
            ConfigLocation::from_cli_or_env(self.config_file.as_deref()),
            &cwd,
        )?;
        if let Some(config_file) = config.config_file() {
            debug!("loaded config from `{config_file}`");
        }

        let input_format = InputFormat::from(self.input_format);
        let report_config = config.resolve(CliSettings {
            plaintext: self.plaintext,
            input_format,
        });

        let mut builder = ReporterBuilder::default();
        builder
            .set_pspec(self.pspec)
            .set_verbose(output.verbose)
            .set_colorize(output.color.should_colorize(supports_color::Stream::Stdout));
        let mut reporter = builder.build(&report_config, output_writer.reporter_output());

        let input = open_input(self.input.as_deref())?;
        if let Err(err) = run_events(&mut reporter, EventReader::new(input, input_format)) {
            // Completed results and the summary are still written.
            if let Err(finish_err) = reporter.finish() {
                debug!(
                    "failed to finish report after error: {}",
                    DisplayErrorChain::new(finish_err)
                );
            }
            return Err(err);
        }

        let stats = reporter.finish()?;
        if stats.total() == 0 {
            Ok(PspecExitCode::NO_TESTS_COLLECTED)
        } else if stats.has_failures() {
            Ok(PspecExitCode::TESTS_FAILED)
        } else {
            Ok(PspecExitCode::OK)
        }
    }
}

fn run_events<R: BufRead>(reporter: &mut Reporter<'_>, events: EventReader<R>) -> Result<()> {
    for event in events {
        reporter.report_event(&event?)?;
    }
    Ok(())
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd =
        std::env::current_dir().map_err(|err| ExpectedError::GetCurrentDirFailed { err })?;
    Utf8PathBuf::try_from(cwd)
        .map_err(|err| ExpectedError::CurrentDirInvalidUtf8 {
            path: err.into_path_buf(),
        })
}

fn open_input(path: Option<&Utf8Path>) -> Result<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path.as_str() == "-" => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let file = File::open(path).map_err(|err| ExpectedError::InputOpenFailed {
                path: path.to_owned(),
                err,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}
