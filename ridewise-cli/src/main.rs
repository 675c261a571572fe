//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = ridewise_cli::run() {
        eprintln!("ridewise: {err}");
        std::process::exit(1);
    }
}
