// Log events under the `collapsible` target. Without the `tracing` feature every call
// expands to an empty block, so field expressions are never evaluated.

macro_rules! ctrace {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "collapsible", $($tt)*);
    }};
}

macro_rules! cdebug {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "collapsible", $($tt)*);
    }};
}

macro_rules! cwarn {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "collapsible", $($tt)*);
    }};
}
