//! Termination on broken internal invariants.
//!
//! Some states can only be reached through a programming error, for example a buffer
//! swapper role holding a value its transition table does not know, or a window
//! manager id that was handed out but no longer resolves. Those are not reported as
//! `Result` errors. They are logged and the current thread panics.

use std::fmt;

/// Logs `args` at `error` level and panics with the same message.
#[cold]
#[track_caller]
pub fn fatal_error(args: fmt::Arguments<'_>) -> ! {
    let message = args.to_string();
    tracing::error!(target: "novatile::fatal", "{}", message);
    panic!("fatal error: {}", message);
}

/// Formats its arguments like `format!` and hands them to [`fatal_error`].
#[macro_export]
macro_rules! fatal_error {
    ($($arg:tt)*) => {
        $crate::fatal::fatal_error(format_args!($($arg)*))
    };
}
