/*!
 * Process and Resource Manager - Main Entry Point
 *
 * Reads commands from a file given as the first argument, or from stdin.
 *
 * Usage: kernel [--json] [FILE]
 */

use miette::{IntoDiagnostic, WrapErr};
use std::fs::File;
use std::io::{self, BufReader};
use tracing::info;

use resman_kernel::{init_tracing, Kernel, KernelConfig, Shell};

fn main() -> miette::Result<()> {
    // Keep stdout clean for command output unless RUST_LOG asks for more
    init_tracing("warn");

    let mut json = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => path = Some(arg),
        }
    }

    let config = KernelConfig::from_env()?;
    info!(?config, "Starting kernel");
    let kernel = Kernel::new(config)?;

    let stdout = io::stdout();
    let mut shell = Shell::new(kernel, stdout.lock()).with_json(json);

    let result = match path {
        Some(path) => {
            let file = File::open(&path)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to open command file {}", path))?;
            shell.run(BufReader::new(file))
        }
        None => shell.run(io::stdin().lock()),
    };
    result
        .into_diagnostic()
        .wrap_err("Failed to run commands")?;

    Ok(())
}
