use crate::error::DemoError;
use std::process;

/// Sets up the diagnostic logger. Records below `error` stay silent unless
/// `RUST_LOG` asks for them.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"))
        .try_init();
}

/// Prints `err` to stderr and exits with its status code.
pub fn fail(err: &DemoError) -> ! {
    eprintln!("{}", err);
    process::exit(err.exit_code());
}
