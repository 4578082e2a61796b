//! Core systems for segmented-list.
//!
//! This crate provides the foundation shared by the adapter crate:
//!
//! - **Signal/Slot System**: [`Signal`] for coarse change notifications
//! - **Errors**: [`AdapterError`] and the [`Result`] alias
//! - **Logging**: `tracing` targets and [`PerfSpan`]
//!
//! # Signal Example
//!
//! ```
//! use segmented_list_core::Signal;
//!
//! let data_set_changed = Signal::<()>::new();
//!
//! let conn_id = data_set_changed.connect(|_| {
//!     println!("re-render everything");
//! });
//!
//! data_set_changed.emit(());
//! data_set_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{AdapterError, Result};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
