//! keyscout - inspect the key material of a Symbol node installation.
//!
//! Reports the main/node/remote/VRF account identities derived from the
//! node's certificate chain and PEM private keys, and decodes any
//! installed voting key tree files. Run from the node's root directory.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod report;

#[derive(Parser)]
#[command(name = "keyscout")]
#[command(about = "Inspect the key material of a Symbol node installation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all node key information
    #[command(name = "show-key")]
    ShowKey(ShowKeyArgs),
    /// Link harvesting keys (not yet implemented)
    #[command(name = "link")]
    Link(LinkArgs),
    /// Unlink harvesting keys (not yet implemented)
    #[command(name = "unlink")]
    Unlink(LinkArgs),
    /// Show voting key information
    #[command(name = "show-voting")]
    ShowVoting,
}

#[derive(Args)]
struct ShowKeyArgs {
    /// Node configuration path
    #[arg(short, long, default_value = "shoestring/shoestring.ini")]
    config: PathBuf,

    /// CA private key path
    #[arg(long = "ca-key-path", default_value = "ca.key.pem")]
    ca_key_path: PathBuf,

    /// Keys directory path
    #[arg(short = 'k', long = "keys-path", default_value = "keys")]
    keys_path: PathBuf,

    /// Also display private keys
    #[arg(short = 'p', long)]
    show_private_key: bool,
}

#[derive(Args)]
struct LinkArgs {
    /// Node configuration path
    #[arg(short, long, default_value = "shoestring/shoestring.ini")]
    config: PathBuf,

    /// Keys directory path
    #[arg(short = 'k', long = "keys-path", default_value = "keys")]
    keys_path: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::ShowKey(args)) => {
            report::show_all_keys(&args);
            println!();
            report::show_voting_keys();
        }
        Some(Commands::Link(_)) | Some(Commands::Unlink(_)) => {
            println!("Harvesting link management is not yet implemented.");
        }
        Some(Commands::ShowVoting) => {
            report::show_voting_keys();
        }
        None => {
            // Bare invocation: full report, private keys included.
            let args = ShowKeyArgs {
                config: PathBuf::from("shoestring/shoestring.ini"),
                ca_key_path: PathBuf::from("ca.key.pem"),
                keys_path: PathBuf::from("keys"),
                show_private_key: true,
            };
            report::show_all_keys(&args);
            println!();
            report::show_voting_keys();
        }
    }

    Ok(())
}
