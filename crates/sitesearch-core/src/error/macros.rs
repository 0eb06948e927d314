//! Error macros for sitesearch

/// Macro for creating invalid config errors
#[macro_export]
macro_rules! bail_config {
    ($($arg:tt)*) => {
        return Err($crate::error::SearchError::invalid_config(format!($($arg)*)))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::SearchError::UsageError($msg.to_string()))
    };
}

/// Macro for mapping index (FTS5) errors
#[macro_export]
macro_rules! map_index_err {
    ($op:expr, $error:expr) => {
        $crate::error::SearchError::index_operation($op, $error)
    };
}
