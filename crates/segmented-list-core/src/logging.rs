//! Logging facilities for segmented-list.
//!
//! segmented-list uses the `tracing` crate for instrumentation. Install a
//! subscriber in your application to see the output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("segmented_list=debug")
//!     .init();
//! ```
//!
//! Structural mutations log at `debug`, absorbed no-ops (redundant slot
//! removal, suppressed load-more requests) at `trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "segmented_list_core::signal";
    /// Adapter mutation pipeline target.
    pub const ADAPTER: &str = "segmented_list::adapter";
    /// Header/footer registry target.
    pub const SLOTS: &str = "segmented_list::slots";
    /// Load-more trigger target.
    pub const LOAD_MORE: &str = "segmented_list::load_more";
}

/// A guard for timing a potentially expensive operation.
///
/// The span is entered on creation and exited when the guard is dropped.
///
/// ```
/// use segmented_list_core::logging::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("sort");
///     // ... sort the content ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "segmented_list::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
