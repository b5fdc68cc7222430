use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use ota_cli::cli::{UpdateOpt, UploadOpt};

#[derive(Parser)]
struct Opt {
    #[command(subcommand)]
    /// Specifies the subcommand to execute.
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Manpages for ota-update and ota-upload
    CliMan {
        /// Directory to save manpages
        out_dir: PathBuf,
    },
    /// Generate shell completions for ota-update and ota-upload
    CliCompletion {
        /// Target shell
        shell: clap_complete::Shell,
        /// Directory to save completion scripts
        out_dir: PathBuf,
    },
}

fn commands() -> [clap::Command; 2] {
    [UpdateOpt::command(), UploadOpt::command()]
}

fn main() -> std::io::Result<()> {
    let opts = Opt::parse();

    match opts.command {
        Commands::CliMan { out_dir } => {
            std::fs::create_dir_all(&out_dir)?;
            for cmd in commands() {
                clap_mangen::generate_to(cmd, &out_dir)?;
            }
        }
        Commands::CliCompletion { shell, out_dir } => {
            std::fs::create_dir_all(&out_dir)?;
            for mut cmd in commands() {
                let name = cmd.get_name().to_string();
                clap_complete::generate_to(shell, &mut cmd, name, &out_dir)?;
            }
        }
    }

    Ok(())
}
