//! Precondition checks.
//!
//! A violated precondition is a programmer error: it panics at the point of
//! violation. Debug and test builds always check. Release builds check
//! unless the `unchecked` feature is enabled.

/// Whether precondition checks are compiled in for this build.
pub(crate) const CHECKED: bool = cfg!(any(debug_assertions, not(feature = "unchecked")));

/// Panic with a contract-violation message when `$cond` does not hold.
macro_rules! require {
    ($cond:expr, $($arg:tt)+) => {
        if $crate::contract::CHECKED && !$cond {
            panic!("contract violation: {}", format_args!($($arg)+));
        }
    };
}
