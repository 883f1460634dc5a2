//! Custom `env_logger` line formats.
//!
//! "Task name" is `log::Record::target()`: each scheduler logs with its
//! SUT's `system_name` as target, and the demo action module's workers log
//! with `"{fault_module}-{fault_name}"`, mirroring the original's per-worker
//! thread name.

use chrono::Local;
use std::io::Write;

pub fn init(debug: bool, export: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    if export {
        builder.format(|buf, record| {
            let unix_seconds = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            writeln!(buf, "{}|{}|{}", unix_seconds, record.target(), record.args())
        });
    } else {
        builder.format(|buf, record| {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            writeln!(buf, "[{timestamp}] {:<40} > {}", record.target(), record.args())
        });
    }

    builder.init();
}
