use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tisk::commands;

#[derive(Parser)]
#[command(name = "tisk")]
#[command(about = "Terminal task list viewer")]
struct Cli {
    /// Task store directory
    #[arg(long, global = true, default_value = DEFAULT_DIR)]
    dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all tasks sorted first by list then by priority
    Ls {
        /// Filter terms: list:<name> tag:<name> priority:<n>
        /// status:<active|done>, or plain words matched against task names
        filter: Vec<String>,
    },
}

const DEFAULT_DIR: &str = "~/.tisk";

fn main() {
    let cli = Cli::parse();

    let dir = PathBuf::from(shellexpand::tilde(&cli.dir).into_owned());

    match cli.command {
        Commands::Ls { filter } => {
            if let Err(e) = commands::ls(&dir, &filter) {
                eprint!("{}", e);
                std::process::exit(1);
            }
        }
    }
}
