//! Console rendering of the key and voting-key reports.
//!
//! Every failure prints as a descriptive message for the role or file it
//! belongs to; the run always continues with the next section.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use log::warn;

use keyscout_keys::{
    find_voting_key_files, read_tree_file, DumpOptions, KeyLocator, KeyRole, Network, SecretPrompt,
    VOTING_DIRS,
};

use crate::config;
use crate::ShowKeyArgs;

/// Password prompt backed by a no-echo terminal read.
struct TerminalPrompt;

impl SecretPrompt for TerminalPrompt {
    fn secret(&self, label: &str) -> io::Result<String> {
        rpassword::prompt_password(format!("{label}: "))
    }
}

fn title(role: KeyRole) -> &'static str {
    match role {
        KeyRole::Main => "Main",
        KeyRole::Node => "Node",
        KeyRole::Remote => "Remote",
        KeyRole::Vrf => "VRF",
    }
}

/// Print one section per key role.
pub fn show_all_keys(args: &ShowKeyArgs) {
    let network_name = config::network_name(&args.config).unwrap_or_else(|err| {
        warn!("{err:#}; using the '{}' network", config::DEFAULT_NETWORK);
        config::DEFAULT_NETWORK.to_string()
    });
    let network = Network::from_name(&network_name);

    let prompt = TerminalPrompt;
    let locator = KeyLocator::new(&args.keys_path, &args.ca_key_path, network, &prompt);

    for role in KeyRole::ALL {
        println!("{} account:", title(role));
        match locator.inspect(role) {
            Ok(identity) => {
                println!("Address:\t{}", identity.address);
                println!("Public key:\t{}", identity.public_key.to_hex());
                if args.show_private_key {
                    if let Some(private_key) = &identity.private_key {
                        println!("Private key:\t{}", private_key.to_hex());
                    }
                }
            }
            Err(err) => println!("{err}"),
        }
        println!();
    }
}

/// Print one section per installed voting key tree file, newest sequence
/// first, with a blank line between (not after) entries.
pub fn show_voting_keys() {
    let search_roots: Vec<PathBuf> = VOTING_DIRS.iter().map(PathBuf::from).collect();
    let files = match find_voting_key_files(&search_roots) {
        Ok(files) => files,
        Err(err) => {
            println!("Error listing voting keys: {err}");
            return;
        }
    };
    if files.is_empty() {
        println!("No voting keys found.");
        return;
    }

    println!("Voting keys:");
    let options = DumpOptions::default();
    for (index, path) in files.iter().enumerate() {
        match read_tree_file(path, &options, &mut wait_for_enter) {
            Ok(summary) => {
                println!("Public key:\t{}", summary.public_key_hex);
                println!("Start epoch:\t{}", summary.start_epoch);
                println!("End epoch:\t{}", summary.end_epoch);
                println!("File name:\t{}", summary.file_name);
            }
            Err(err) => println!("{err}"),
        }
        if index + 1 < files.len() {
            println!();
        }
    }
}

fn wait_for_enter() {
    print!("Press Enter to continue...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
