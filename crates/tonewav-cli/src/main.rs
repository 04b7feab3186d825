//! tonewav CLI - Command-line interface for sine tone generation
//!
//! This binary writes fixed-frequency sine tones as 16-bit mono PCM WAV files
//! and streams them to standard output for playback.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use tonewav_cli::commands;
use tonewav_cli::commands::generate::GenerateArgs;
use tonewav_cli::logging;
use tonewav_spec::PeriodPolicy;

/// tonewav - Sine tone WAV generator
#[derive(Parser)]
#[command(name = "tonewav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log detail on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sine tone to a WAV file
    Generate {
        /// Output file path
        #[arg(short, long)]
        output: String,

        /// Duration in whole seconds
        #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
        duration: i64,

        /// Sample rate in Hz
        #[arg(short = 'r', long, default_value_t = 44100, allow_negative_numbers = true)]
        sample_rate: i64,

        /// Tone frequency in Hz
        #[arg(short, long, default_value_t = 440, allow_negative_numbers = true)]
        frequency: i64,

        /// Period computation (legacy truncates sample_rate / frequency, exact does not)
        #[arg(long, default_value_t = PeriodPolicy::Legacy)]
        policy: PeriodPolicy,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Read a parameter file, write the tone, and stream it to stdout
    Run {
        /// Parameter file (four lines: path, sample rate, frequency, duration; or .json)
        params_file: String,

        /// Write the file without streaming it to stdout
        #[arg(long)]
        no_play: bool,

        /// Override the period policy named in the parameter file
        #[arg(long)]
        policy: Option<PeriodPolicy>,

        /// Output machine-readable JSON diagnostics on stdout (needs --no-play)
        #[arg(long, requires = "no_play")]
        json: bool,
    },

    /// Stream an existing WAV file to stdout
    Play {
        /// Path to the WAV file
        wav: String,
    },

    /// Print header fields, PCM hash, and signal metrics of a WAV file
    Inspect {
        /// Path to the WAV file
        wav: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Generate {
            output,
            duration,
            sample_rate,
            frequency,
            policy,
            json,
        } => {
            let args = GenerateArgs {
                output,
                duration_seconds: duration,
                sample_rate_hz: sample_rate,
                tone_frequency_hz: frequency,
                policy,
            };
            commands::generate::run(&args, json)
        }
        Commands::Run {
            params_file,
            no_play,
            policy,
            json,
        } => commands::run::run(&params_file, no_play, policy, json),
        Commands::Play { wav } => commands::play::run(&wav),
        Commands::Inspect { wav, json } => commands::inspect::run(&wav, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
