use anyhow::Result;
use clap::{Parser, Subcommand};
use powermap::commands::{
    build_command, check_command, demographics_command, dist_command, extract_command,
    info_command, init_command,
};
use powermap::logging::init_logging;

/// Data build pipeline for the UK government power map.
///
/// This CLI is a thin wrapper around `powermap-core` (exposed in code as
/// `powermap_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(name = "powermap", version, about = "Power map data build pipeline", long_about = None)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the project directories and a default `powermap.json`.
    Init {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,
    },

    /// Show layout paths and the effective build configuration.
    Info {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Extract the embedded data literals into `data/*.json`.
    ///
    /// Literals that fail to parse leave a `data/_debug_<file>` artifact and do
    /// not stop the others.
    Extract {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Source document to read instead of the configured one.
        #[arg(long)]
        source: Option<String>,
    },

    /// Cross-check department roles against the extracted roster.
    Check {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,
    },

    /// Build `data/constituency-demographics.json`.
    Demographics {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Commons Library ethnicity workbook (.xlsx, or a .json export).
        #[arg(long)]
        excel: Option<String>,

        /// Use the compiled-in ministerial constituency table.
        #[arg(long, default_value_t = false)]
        manual: bool,
    },

    /// Copy deployable files into `dist/`.
    Dist {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,
    },

    /// Run extract, demographics and dist in order.
    Build {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Default to a full build if no command is provided.
    match cli.command.unwrap_or(Command::Build { root: ".".to_string() }) {
        Command::Init { root } => init_command(&root)?,
        Command::Info { root, json } => info_command(&root, json)?,
        Command::Extract { root, source } => {
            extract_command(&root, source.as_deref())?;
        }
        Command::Check { root } => {
            check_command(&root)?;
        }
        Command::Demographics { root, excel, manual } => {
            demographics_command(&root, excel.as_deref(), manual)?;
        }
        Command::Dist { root } => {
            dist_command(&root)?;
        }
        Command::Build { root } => build_command(&root)?,
    }

    println!("\nDone.");
    Ok(())
}
