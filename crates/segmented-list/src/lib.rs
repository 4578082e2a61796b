//! segmented-list: a composite list adapter for virtualized list hosts.
//!
//! Presents header slots, content items, and footer slots as one contiguous,
//! position-addressable list, and drives a "load more" protocol through a
//! trailing footer row.
//!
//! This is the umbrella crate; it re-exports everything from
//! `segmented-list-core`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use segmented_list::model::{
//!     HolderBinder, ItemHolder, LoadMoreState, SegmentedAdapter, SlotRef, StaticSlot,
//! };
//!
//! #[derive(Default)]
//! struct Row(String);
//!
//! impl ItemHolder<String> for Row {
//!     fn set_data(&mut self, item: &String) {
//!         self.0 = item.clone();
//!     }
//! }
//!
//! let adapter = SegmentedAdapter::new(HolderBinder::new(|_: &(), _: u32| Row::default()));
//!
//! let requests = Arc::new(AtomicUsize::new(0));
//! let counter = requests.clone();
//! let more: SlotRef<Row, ()> = Arc::new(StaticSlot::new(|_: &()| Row::default()));
//! adapter.set_more(more, move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! adapter.append("first".to_string());
//! assert_eq!(adapter.item_count(), 2); // one item + the "more" row
//!
//! let mut view = Row::default();
//! adapter.bind_view(1, &mut view).unwrap();
//! adapter.bind_view(1, &mut view).unwrap();
//! assert_eq!(requests.load(Ordering::SeqCst), 1);
//! assert_eq!(adapter.load_more_state(), LoadMoreState::Loading);
//! ```

pub use segmented_list_core::*;

pub mod config;
pub mod model;

pub use config::AdapterConfig;
pub use model::SegmentedAdapter;
