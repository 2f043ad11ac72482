//! playsync: mirror media-library playlists onto a flat music directory.
//!
//! # Usage
//!
//! ```text
//! playsync [OPTIONS] <TARGET_DIR> <PLAYLIST>...
//! playsync /media/usb EDM Rap Rock Pop
//! playsync --sort name --library ~/Music/Library.xml /media/usb Rock
//! playsync --dry-run /media/usb Rock
//! ```
//!
//! Exit status is 0 on success and 1 on any error; errors print a single
//! line to stderr.

mod commands;
mod logging;

use std::panic;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use commands::sync::SyncArgs;

const PRODUCT_NAME: &str = "playsync";

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "playsync",
    version,
    about = "Copy playlist tracks to a music directory, prune everything else, and write .m3u files",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    sync: SyncArgs,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => return usage_error(Some(&err)),
    };
    if cli.sync.target.as_os_str().len() < 3 {
        return usage_error(None);
    }

    match guarded(move || cli.sync.run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(line) => {
            eprintln!("{line}");
            ExitCode::FAILURE
        }
    }
}

/// Run `f`, reducing any failure to its single diagnostic line.
///
/// The default panic hook is silenced for the duration, so a panic yields
/// `unknown error` and nothing else.
fn guarded<F>(f: F) -> Result<(), String>
where
    F: FnOnce() -> anyhow::Result<()> + panic::UnwindSafe,
{
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let outcome = panic::catch_unwind(f);
    panic::set_hook(previous_hook);

    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(format!("{err:#}")),
        Err(_) => Err("unknown error".to_owned()),
    }
}

/// Product banner, usage, and an example on stderr; exit status 1.
fn usage_error(err: Option<&clap::Error>) -> ExitCode {
    eprintln!(
        "{PRODUCT_NAME} version {} Copyright (C) {}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );
    match err {
        Some(err) => eprint!("{}", err.render()),
        None => {
            eprintln!("error: target directory must be at least 3 characters");
            eprintln!("{}", Cli::command().render_usage());
        }
    }
    eprintln!("example:");
    eprintln!("  {PRODUCT_NAME} /media/usb EDM Rap Rock Pop");
    ExitCode::FAILURE
}
