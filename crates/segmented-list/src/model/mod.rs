//! The segmented list model.
//!
//! A [`SegmentedAdapter`] concatenates three sequences into one flat list
//! for a virtualized host:
//!
//! ```text
//! flat position:  0 .. H          H .. H+C          H+C .. H+C+F
//!                 ┌──────────┐    ┌──────────┐      ┌──────────────────┐
//!                 │ headers  │ ‖  │ content  │  ‖   │ footers [+ more] │
//!                 └──────────┘    └──────────┘      └──────────────────┘
//! ```
//!
//! # Core Types
//!
//! - `SpecialSlot` / `SlotRef`: a header or footer row (construct + bind)
//! - `SlotRegistry` / `SlotKey`: ordered slot sequences with stable keys
//! - `SegmentLayout` / `Segment`: pure flat-position mapping
//! - `ViewType`: recycling key, disjoint between slots and content
//! - `LoadMoreTrigger` / `LoadMoreState`: the load-more protocol
//! - `ContentBinder` / `HolderBinder`: content-row construction and binding
//! - `AdapterSignals`: full-refresh and load-more notifications

mod adapter;
mod binder;
mod layout;
mod load_more;
mod signals;
mod slot;

pub use adapter::SegmentedAdapter;
pub use binder::{ContentBinder, HolderBinder, ItemHolder};
pub use layout::{Segment, SegmentLayout, ViewType};
pub use load_more::{LoadMoreCallback, LoadMoreState, LoadMoreTrigger};
pub use signals::AdapterSignals;
pub use slot::{FnSlot, SlotKey, SlotRef, SlotRegistry, SlotRole, SpecialSlot, StaticSlot};
