//! Entry point for the `wayfarer` command-line interface.
#![forbid(unsafe_code)]

use wayfarer_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr before exiting"
)]
fn main() {
    if let Err(err) = wayfarer_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        eprintln!("wayfarer: {err}");
        std::process::exit(1);
    }
}
