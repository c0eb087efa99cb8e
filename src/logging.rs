/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use env_logger::Env;
use std::env;
use std::io::Write;

/// Terminal colors per log level
struct LogColors {
    error: &'static str,
    warn: &'static str,
    info: &'static str,
    debug: &'static str,
    trace: &'static str,
    reset: &'static str,
}

impl LogColors {
    fn new(enable_color: bool) -> Self {
        if enable_color {
            Self {
                error: "\x1b[31m",
                warn: "\x1b[33m",
                info: "\x1b[32m",
                debug: "\x1b[36m",
                trace: "\x1b[35m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                error: "",
                warn: "",
                info: "",
                debug: "",
                trace: "",
                reset: "",
            }
        }
    }
}

/// Build the default filter string for a given `-v` count.
///
/// Bring-up progress is always shown (INFO); each extra `-v` enables one
/// more `debugN` target.
pub fn filter_for_verbosity(verbose: u8) -> String {
    let mut log_config = vec!["info".to_string()];

    for level in 1..=verbose.min(5) {
        let log_level = if level <= 4 { "debug" } else { "trace" };
        log_config.push(format!("debug{}={}", level, log_level));
    }

    log_config.join(",")
}

/// Set up the logger.
///
/// # Parameters
/// - `verbose`: verbosity level (0-5)
///   - 0: ERROR, WARN, INFO
///   - 1: + debug1 (-v)
///   - 2: + debug2 (-vv)
///   - 3: + debug3 (-vvv)
///   - 4: + debug4 (-vvvv)
///   - 5: + debug5 (-vvvvv)
///
/// `RUST_LOG` takes precedence when set. Calling this twice is harmless.
pub fn setup_logger(verbose: u8) {
    let enable_color =
        env::var("NO_COLOR").is_err() && env::var("TERM").map_or(false, |term| term != "dumb");

    let default_filter = filter_for_verbosity(verbose);
    let colors = LogColors::new(enable_color);

    let result = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(move |buf, record| {
            let level_color = match record.level() {
                log::Level::Error => colors.error,
                log::Level::Warn => colors.warn,
                log::Level::Info => colors.info,
                log::Level::Debug => colors.debug,
                log::Level::Trace => colors.trace,
            };

            match record.target() {
                // detail output is printed bare, one line per device/pin
                "debug1" | "debug2" | "debug3" | "debug4" | "debug5" => {
                    writeln!(buf, "{}", record.args())
                }
                _ => {
                    let level_text = match record.level() {
                        log::Level::Error => "ERROR",
                        log::Level::Warn => "WARN ",
                        log::Level::Info => "INFO ",
                        log::Level::Debug => "DEBUG",
                        log::Level::Trace => "TRACE",
                    };

                    writeln!(
                        buf,
                        "{}[{}]{} {}",
                        level_color,
                        level_text,
                        colors.reset,
                        record.args()
                    )
                }
            }
        })
        .try_init();

    if result.is_err() {
        log::debug!("logger already initialized");
    }
}
