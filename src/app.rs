//! Application orchestration and command routing.
//!
//! Parses the command line, prepares logging and the config file, then hands
//! off to the matching command handler.

use crate::commands::{self, BumpArg};
use crate::config;
use crate::logging;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use std::process;

/// Paint frequency-domain bumps and see (or hear) what they make
#[derive(Parser)]
#[command(name = "fourierpaint")]
#[command(version)]
#[command(about = "Paint Gaussian bumps into a Fourier spectrum and watch the image or waveform they make")]
#[command(long_about = "Paint Gaussian bumps into a Fourier spectrum and watch the image or waveform they make.\n\nHold the left mouse button on the spectrum to deposit energy at that frequency;\nthe longer you hold, the stronger the bump. The other pane shows the inverse\ntransform, recomputed as you paint.\n\nDEFAULT COMMAND:\n    If no command is specified, 'paint' is used.\n\nEXAMPLES:\n    # 2D editor\n    $ fourierpaint\n\n    # 1D editor, press p to listen\n    $ fourierpaint wave\n\n    # Two partials written to a WAV file\n    $ fourierpaint synth --bump 20 --bump 30:0.5 -o chord.wav")]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/fourierpaint/fourierpaint.toml\n    Logs:               ~/.local/state/fourierpaint/fourierpaint.log.*"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Paint a 2D spectrum and watch the image it makes (default)
    ///
    /// Left button paints, +/- changes the bump width, c clears, q quits.
    #[command(visible_alias = "p")]
    Paint,

    /// Paint a 1D spectrum, watch and play the waveform
    ///
    /// Left button paints, +/- changes the bump width, p plays, c clears, q quits.
    #[command(visible_alias = "w")]
    Wave,

    /// Render 1D bumps to a WAV file without the editor
    ///
    /// Each bump is BIN[:AMP[:SIGMA]], where BIN is the strip position
    /// (cycles per period). AMP and SIGMA default to 1.
    ///
    /// Examples:
    ///   fourierpaint synth --bump 20 -o tone.wav
    ///   fourierpaint synth --bump 20:1:0.5 --bump 40:0.3 -o chord.wav --play
    Synth {
        /// Bump to add, BIN[:AMP[:SIGMA]] (repeatable)
        #[arg(short, long = "bump", value_name = "BUMP", required = true)]
        bumps: Vec<BumpArg>,

        /// WAV file to write
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Waveform periods in the file (defaults to audio.repetitions)
        #[arg(short, long, value_name = "N")]
        repetitions: Option<usize>,

        /// Also play the result on the configured output device
        #[arg(long)]
        play: bool,
    },

    /// Open configuration file in your preferred editor
    ///
    /// Uses $EDITOR environment variable or falls back to nano/vi.
    #[command(visible_alias = "c")]
    Config,

    /// List available audio output devices
    ///
    /// Shows device IDs, names, and configurations to help configure
    /// the playback device in fourierpaint.toml.
    #[command(name = "list-devices")]
    ListDevices,

    /// Show recent log entries from the application
    ///
    /// Display the last 50 lines of the most recent log file.
    Logs,

    /// Generate shell completion script
    ///
    /// Examples:
    ///   fourierpaint completions bash > fourierpaint.bash
    ///   fourierpaint completions zsh > _fourierpaint
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the application for the parsed command line.
///
/// # Errors
/// - If logging initialization or config setup fails
/// - If the selected command fails
pub async fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Commands that need neither logging nor a config file
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            generate(*shell, &mut Cli::command(), "fourierpaint", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::ListDevices) => {
            if let Err(e) = commands::handle_list_devices() {
                eprintln!("Error: {e}");
                process::exit(1);
            }
            return Ok(());
        }
        Some(Commands::Logs) => {
            if let Err(e) = commands::handle_logs() {
                eprintln!("Error: {e}");
                process::exit(1);
            }
            return Ok(());
        }
        _ => {}
    }

    logging::init_logging()?;
    crate::setup::ensure_config(&config::config_path()?)?;

    match cli.command {
        None | Some(Commands::Paint) => commands::handle_paint().await?,
        Some(Commands::Wave) => commands::handle_wave().await?,
        Some(Commands::Synth {
            bumps,
            output,
            repetitions,
            play,
        }) => commands::handle_synth(bumps, output, repetitions, play).await?,
        Some(Commands::Config) => commands::handle_config()?,
        Some(Commands::Completions { .. }) | Some(Commands::ListDevices) | Some(Commands::Logs) => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}
