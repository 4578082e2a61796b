//! The load-more trigger.
//!
//! The trigger owns two optional footer rows: a "more" row whose binding asks
//! the caller for the next page, and a "no more" row shown once the caller
//! signals the end of the data. It inserts and removes them at the tail of
//! the footer sequence as its state changes:
//!
//! ```text
//!             show step                 bind "more"
//!   Idle ─────────────────> Awaiting ──────────────> Loading
//!    ^                      FirstBind <──────────────   │
//!    │                          │      show step        │ stop
//!    │ reset                    │ stop                  v
//!    └──────────────────────────┴──────────────────> NoMoreData
//! ```
//!
//! The "show step" runs before each append. The first one after
//! configuration (or after a reset) inserts the footer row; every one of them
//! ends an in-flight load so the next bind of "more" asks again.

use std::fmt;
use std::sync::Arc;

use segmented_list_core::logging::targets;

use super::slot::{SlotRef, SlotRegistry, SlotRole};

/// Zero-argument callback asking the caller for more content.
pub type LoadMoreCallback = Arc<dyn Fn() + Send + Sync>;

/// Load-more protocol state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadMoreState {
    /// Not configured, or configured but the footer row is not shown yet.
    #[default]
    Idle,
    /// The "more" row is in the footers and has not been bound since the
    /// last show step.
    AwaitingFirstBind,
    /// The request callback has fired; further binds are suppressed.
    Loading,
    /// The caller signalled the end of the data.
    NoMoreData,
}

/// State machine driving the "more"/"no more" footer rows.
pub struct LoadMoreTrigger<V, P> {
    more: Option<SlotRef<V, P>>,
    no_more: Option<SlotRef<V, P>>,
    callback: Option<LoadMoreCallback>,
    state: LoadMoreState,
    /// Set once the footer row has been inserted for this cycle.
    footer_shown: bool,
}

impl<V, P> Default for LoadMoreTrigger<V, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> LoadMoreTrigger<V, P> {
    /// Creates an unconfigured trigger.
    pub fn new() -> Self {
        Self {
            more: None,
            no_more: None,
            callback: None,
            state: LoadMoreState::Idle,
            footer_shown: false,
        }
    }

    /// Current state.
    pub fn state(&self) -> LoadMoreState {
        self.state
    }

    /// Returns `true` once the footer row has been inserted this cycle.
    pub fn is_footer_shown(&self) -> bool {
        self.footer_shown
    }

    /// The configured "more" row.
    pub fn more(&self) -> Option<&SlotRef<V, P>> {
        self.more.as_ref()
    }

    /// The configured "no more" row.
    pub fn no_more(&self) -> Option<&SlotRef<V, P>> {
        self.no_more.as_ref()
    }

    /// Configures the "more" row and its request callback.
    ///
    /// If a previous "more" row is already in the footers the new one takes
    /// its position.
    pub fn set_more(
        &mut self,
        slots: &mut SlotRegistry<V, P>,
        slot: SlotRef<V, P>,
        callback: LoadMoreCallback,
    ) {
        if let Some(old) = self.more.take() {
            slots.replace_footer_as(&old, slot.clone(), SlotRole::More);
        }
        self.more = Some(slot);
        self.callback = Some(callback);
    }

    /// Configures the "no more" row, replacing a shown one at its position.
    pub fn set_no_more(&mut self, slots: &mut SlotRegistry<V, P>, slot: SlotRef<V, P>) {
        if let Some(old) = self.no_more.take() {
            slots.replace_footer_as(&old, slot.clone(), SlotRole::NoMore);
        }
        self.no_more = Some(slot);
    }

    /// Runs before content is appended.
    ///
    /// Returns the new state if it changed.
    pub fn show(&mut self, slots: &mut SlotRegistry<V, P>) -> Option<LoadMoreState> {
        let mut next = match self.state {
            LoadMoreState::Loading => LoadMoreState::AwaitingFirstBind,
            state => state,
        };

        if !self.footer_shown {
            if let Some(more) = &self.more {
                slots.push_footer(more.clone(), SlotRole::More);
                next = LoadMoreState::AwaitingFirstBind;
            } else if let Some(no_more) = &self.no_more {
                if !slots.contains_footer_as(no_more, SlotRole::NoMore) {
                    slots.push_footer(no_more.clone(), SlotRole::NoMore);
                }
                next = LoadMoreState::NoMoreData;
            }
            self.footer_shown = true;
            tracing::debug!(target: targets::LOAD_MORE, state = ?next, "load-more footer shown");
        }

        self.transition(next)
    }

    /// Handles a bind of the "more" row.
    ///
    /// Returns the callback to invoke (after releasing any locks) the first
    /// time this is called outside [`LoadMoreState::Loading`]; `None` while a
    /// load is in flight or when nothing is configured.
    pub fn request(&mut self) -> Option<LoadMoreCallback> {
        if self.more.is_none() {
            return None;
        }
        let Some(callback) = self.callback.clone() else {
            tracing::trace!(target: targets::LOAD_MORE, "no request callback configured");
            return None;
        };
        if self.state == LoadMoreState::Loading {
            tracing::trace!(target: targets::LOAD_MORE, "load already in flight, ignoring bind");
            return None;
        }
        self.state = LoadMoreState::Loading;
        Some(callback)
    }

    /// Signals that there is no more data.
    ///
    /// Removes the "more" row and shows the "no more" row. Stopping an
    /// already stopped or unconfigured trigger changes nothing.
    ///
    /// Returns `true` if the footers or the state changed.
    pub fn stop(&mut self, slots: &mut SlotRegistry<V, P>) -> bool {
        if self.more.is_none() && self.no_more.is_none() {
            tracing::trace!(target: targets::LOAD_MORE, "stop on unconfigured trigger");
            return false;
        }

        let mut changed = false;
        if let Some(more) = &self.more {
            changed |= slots.remove_footer_as(more, SlotRole::More);
        }
        if let Some(no_more) = &self.no_more
            && !slots.contains_footer_as(no_more, SlotRole::NoMore)
        {
            slots.push_footer(no_more.clone(), SlotRole::NoMore);
            changed = true;
        }
        // The "more" row must not come back on the next append.
        self.footer_shown = true;
        changed |= self.transition(LoadMoreState::NoMoreData).is_some();
        changed
    }

    /// Removes both rows and returns to [`LoadMoreState::Idle`], re-arming
    /// the footer insertion for the next append.
    ///
    /// Returns the new state if it changed.
    pub fn reset(&mut self, slots: &mut SlotRegistry<V, P>) -> Option<LoadMoreState> {
        if let Some(no_more) = &self.no_more {
            slots.remove_footer_as(no_more, SlotRole::NoMore);
        }
        if let Some(more) = &self.more {
            slots.remove_footer_as(more, SlotRole::More);
        }
        self.footer_shown = false;
        self.transition(LoadMoreState::Idle)
    }

    fn transition(&mut self, next: LoadMoreState) -> Option<LoadMoreState> {
        if self.state == next {
            return None;
        }
        tracing::debug!(target: targets::LOAD_MORE, from = ?self.state, to = ?next, "load-more transition");
        self.state = next;
        Some(next)
    }
}

impl<V, P> fmt::Debug for LoadMoreTrigger<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadMoreTrigger")
            .field("state", &self.state)
            .field("footer_shown", &self.footer_shown)
            .field("has_more", &self.more.is_some())
            .field("has_no_more", &self.no_more.is_some())
            .finish()
    }
}
