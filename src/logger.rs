use std::io::Write;

use log::LevelFilter;

/// Initialize the global logger at `level`.
///
/// Module directives in `RUST_LOG` still apply on top of `level`. Records are
/// written as `[time level target] message`; `diorama::` is stripped from the
/// target.
pub fn init_logger(level: LevelFilter) {
    let result = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format(|buf, record| {
            let target = record.target();
            let target = target.strip_prefix("diorama::").unwrap_or(target);
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                target,
                record.args()
            )
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("logger already initialized: {e}");
    }
}
