use std::path::PathBuf;
use std::process;

use clap::Parser;

use cpr_rs::common::{io_error_msg, reset_sigpipe};
use cpr_rs::cptree::{CopyOptions, copy_tree};

#[derive(Parser)]
#[command(
    name = "fcpr",
    version,
    about = "Copy SOURCE to DEST, replicating directory trees and symlinks"
)]
struct Cli {
    /// Copy directories recursively
    #[arg(short = 'R', short_alias = 'r', long = "recursive")]
    recursive: bool,

    /// Follow symlinks in SOURCE and copy what they point to
    #[arg(short = 'L', long = "dereference")]
    dereference: bool,

    /// Keep symlink target strings byte-for-byte instead of re-expressing
    /// them relative to DEST
    #[arg(long = "verbatim-symlinks")]
    verbatim_symlinks: bool,

    /// Explain what is being done
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Source path
    source: PathBuf,

    /// Destination path
    dest: PathBuf,
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();
    let options = CopyOptions {
        recursive: cli.recursive,
        dereference: cli.dereference,
        verbatim_symlinks: cli.verbatim_symlinks,
    };

    if let Err(e) = copy_tree(&cli.source, &cli.dest, &options) {
        eprintln!(
            "fcpr: cannot copy '{}' to '{}': {}",
            cli.source.display(),
            cli.dest.display(),
            io_error_msg(&e)
        );
        process::exit(1);
    }

    if cli.verbose {
        // Goes to stderr to match GNU cp -v behavior when piped.
        eprintln!("'{}' -> '{}'", cli.source.display(), cli.dest.display());
    }
}
