//! Logging setup for the binary.
//!
//! `GAPFILL_LOG` takes an `EnvFilter` directive (e.g. `debug` or
//! `warn,gapfill::cloze=debug`); `GAPFILL_LOG_FORMAT=json` switches to JSON
//! lines. Logs go to stderr so they never mix with the exercise on stdout.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GAPFILL_LOG";
pub const LOG_FORMAT_ENV: &str = "GAPFILL_LOG_FORMAT";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => {
            let _ = builder.json().try_init();
        }
        _ => {
            let _ = builder.try_init();
        }
    }
}
