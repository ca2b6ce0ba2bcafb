//! Canonical logging macros

/// Log the start of an operation
///
/// ```
/// # use goldentest_core::log_op_start;
/// log_op_start!("golden_compare");
/// log_op_start!("golden_compare", path = "testdata/a.golden.json");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = goldentest_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = goldentest_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use goldentest_core::log_op_end;
/// log_op_end!("golden_compare", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = goldentest_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = goldentest_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// ```
/// # use goldentest_core::{log_op_error, errors::GoldenError};
/// let err = GoldenError::hook("volatile field not normalized");
/// log_op_error!("golden_compare", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let golden_err: &$crate::errors::GoldenError = &$err;
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = goldentest_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?golden_err.kind(),
            err.code = golden_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let golden_err: &$crate::errors::GoldenError = &$err;
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = goldentest_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?golden_err.kind(),
            err.code = golden_err.code(),
            $($field)*
        );
    }};
}
