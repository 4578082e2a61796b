//! Change notifications emitted by the adapter.

use segmented_list_core::Signal;

use super::load_more::LoadMoreState;

/// Signals emitted by a [`SegmentedAdapter`](super::SegmentedAdapter).
///
/// The host connects to [`data_set_changed`](Self::data_set_changed) and
/// re-renders the whole visible list when it fires. There are no
/// fine-grained insert/remove/move notifications.
pub struct AdapterSignals {
    /// Full-refresh signal: the host must re-query counts, types, and binds.
    pub data_set_changed: Signal<()>,

    /// Emitted after the load-more trigger changes state.
    pub load_more_state_changed: Signal<LoadMoreState>,
}

impl Default for AdapterSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterSignals {
    /// Creates a new set of adapter signals.
    pub fn new() -> Self {
        Self {
            data_set_changed: Signal::new(),
            load_more_state_changed: Signal::new(),
        }
    }

    /// Emits the full-refresh signal.
    pub fn emit_data_set_changed(&self) {
        self.data_set_changed.emit(());
    }

    /// Emits a load-more state change, if there was one.
    pub fn emit_load_more_state(&self, state: Option<LoadMoreState>) {
        if let Some(state) = state {
            self.load_more_state_changed.emit(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_signals_creation() {
        let signals = AdapterSignals::new();
        assert_eq!(signals.data_set_changed.connection_count(), 0);
        assert_eq!(signals.load_more_state_changed.connection_count(), 0);
    }

    #[test]
    fn test_emit_load_more_state_skips_none() {
        let signals = AdapterSignals::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let recv = received.clone();
        signals.load_more_state_changed.connect(move |state| {
            recv.lock().push(*state);
        });

        signals.emit_load_more_state(None);
        signals.emit_load_more_state(Some(LoadMoreState::Loading));

        assert_eq!(*received.lock(), vec![LoadMoreState::Loading]);
    }
}
