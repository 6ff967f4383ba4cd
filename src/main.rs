//! Binary entry point that glues the configuration-backed data layer to the
//! terminal UI. The bootstrapping pipeline lives in `launcher::launch`; this
//! file only initializes diagnostics, runs it, and exits the process with
//! the status the event loop returned.
use std::process;

use diversity_calculator::launch;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match launch() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(1);
        }
    }
}
