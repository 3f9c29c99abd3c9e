//! log macro's for console logging

/// Writes a debug! message to the app::console logger
#[macro_export]
macro_rules! console_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::console", $($arg)+)
    };
}

/// Writes an info! message to the app::console logger
#[macro_export]
macro_rules! console_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::console", $($arg)+)
    };
}

/// Writes an warn! message to the app::console logger
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::console", $($arg)+)
    };
}

/// Writes an error! message to the app::console logger
#[macro_export]
macro_rules! console_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::console", $($arg)+)
    };
}
