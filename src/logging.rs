use std::sync::atomic::{AtomicBool, Ordering};

/// Whether debug logging is active, shared between the logger filter and config.
static DEBUG_LOGGING: AtomicBool = AtomicBool::new(false);

pub fn set_debug_logging(enabled: bool) {
    DEBUG_LOGGING.store(enabled, Ordering::Relaxed);
}

pub fn debug_logging() -> bool {
    DEBUG_LOGGING.load(Ordering::Relaxed)
}

/// Journal logger that lets the `basket` crate through at info (debug when
/// toggled) and everything else at warn.
struct FilteredJournal {
    inner: systemd_journal_logger::JournalLog,
}

fn allowed(target: &str, level: log::Level) -> bool {
    let max = if target.starts_with("basket") {
        if debug_logging() {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    } else {
        log::LevelFilter::Warn
    };
    level <= max
}

impl log::Log for FilteredJournal {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        allowed(metadata.target(), metadata.level())
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install the journal logger (`journalctl --user -t <identifier> -f`).
/// Fails if the journal is unreachable or a logger is already installed.
pub fn init(identifier: &str) -> Result<(), String> {
    let journal = systemd_journal_logger::JournalLog::new()
        .map_err(|e| format!("Failed to open journal: {}", e))?
        .with_syslog_identifier(identifier.to_string());

    log::set_boxed_logger(Box::new(FilteredJournal { inner: journal }))
        .map_err(|e| format!("Failed to install logger: {}", e))?;
    // Global max must be Debug so crate debug logs can pass through when toggled
    log::set_max_level(log::LevelFilter::Debug);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_by_target_and_toggle() {
        set_debug_logging(false);
        assert!(allowed("basket::core::store", log::Level::Info));
        assert!(!allowed("basket::core::store", log::Level::Debug));
        assert!(allowed("reqwest", log::Level::Warn));
        assert!(!allowed("reqwest", log::Level::Info));

        set_debug_logging(true);
        assert!(allowed("basket::core::store", log::Level::Debug));
        assert!(!allowed("basket::core::store", log::Level::Trace));
        assert!(!allowed("hyper", log::Level::Debug));
        set_debug_logging(false);
    }
}
