//! Level thumbnail service
//!
//! Renders a 1280x720 PNG for a level: the background named by the
//! `thumbnail` query parameter cover-fitted onto the canvas, the difficulty
//! badge in the bottom-left corner and the logo in the top-right corner.

#[macro_use]
extern crate derivative;

pub mod assets;
pub mod config;
pub mod error;
pub mod handler;
pub mod layout;
pub mod params;
pub mod server;

/// Initializes the logger.
///
/// Sets up a custom logger format with timestamp, log level, file name, line number,
/// and log message. Uses local time format for timestamps. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("hyper", log::LevelFilter::Warn)
        .filter_module("reqwest", log::LevelFilter::Warn)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = cutil::time::local_now("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
