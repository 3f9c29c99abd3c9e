//! log macro's for network logging

/// Writes a debug! message to the app::network logger
#[macro_export]
macro_rules! network_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::network", $($arg)+)
    };
}

/// Writes an info! message to the app::network logger
#[macro_export]
macro_rules! network_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::network", $($arg)+)
    };
}

/// Writes an warn! message to the app::network logger
#[macro_export]
macro_rules! network_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::network", $($arg)+)
    };
}

/// Writes an error! message to the app::network logger
#[macro_export]
macro_rules! network_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::network", $($arg)+)
    };
}
