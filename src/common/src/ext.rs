use log::error;
use std::fmt::Debug;

pub trait ResultExt {
    /// Logs the error at error level, prefixed with what was being attempted.
    fn log_if_error(self, what: &str);
}

impl<T, E: Debug> ResultExt for Result<T, E> {
    fn log_if_error(self, what: &str) {
        if let Err(err) = self {
            error!("{what} failed: {err:?}")
        }
    }
}
