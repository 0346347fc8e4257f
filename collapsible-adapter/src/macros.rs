// Log events under the `collapsible_adapter` target. Without the `tracing` feature every call
// expands to an empty block, so field expressions are never evaluated.

macro_rules! ctrace {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "collapsible_adapter", $($tt)*);
    }};
}

macro_rules! cdebug {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "collapsible_adapter", $($tt)*);
    }};
}

macro_rules! cwarn {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "collapsible_adapter", $($tt)*);
    }};
}
