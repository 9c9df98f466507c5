//! Conditional tracing macros
//!
//! Spans and events are emitted through `tracing` when the `tracing` feature is
//! enabled and compile to nothing otherwise.

/// Create an info-level span around a pipeline stage
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Emit a debug-level event for search decisions
#[cfg(feature = "tracing")]
#[allow(unused_macro_rules)]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::debug!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_macro_rules)]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        // Values are still evaluated so call sites have no unused bindings
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Stand-in span guard used when tracing is disabled
///
/// Lets `let _span = trace_span!(...).entered();` compile without conditional
/// code at call sites.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns self, mimicking `Span::entered()`
    #[inline]
    #[must_use]
    pub const fn entered(self) -> Self {
        self
    }
}
