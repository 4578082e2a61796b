//! The composite list adapter.
//!
//! [`SegmentedAdapter`] presents `headers ‖ content ‖ footers` to a
//! virtualized list host as one flat list, and drives the load-more protocol
//! through its trailing footer row.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use segmented_list_core::logging::targets;
use segmented_list_core::{AdapterError, PerfSpan, Result};

use super::binder::ContentBinder;
use super::layout::{Segment, SegmentLayout, ViewType};
use super::load_more::{LoadMoreState, LoadMoreTrigger};
use super::signals::AdapterSignals;
use super::slot::{SlotKey, SlotRef, SlotRegistry, SlotRole};
use crate::config::AdapterConfig;

/// A flat position after resolution, detached from the adapter's locks.
enum Located<V, P> {
    Slot {
        slot: SlotRef<V, P>,
        role: SlotRole,
    },
    Content(usize),
}

/// A list adapter over header slots, content items, and footer slots.
///
/// - `T` is the content item type.
/// - `V` is the host's view handle type.
/// - `P` is the container views are created in.
///
/// # Host contract
///
/// The host calls [`item_count`](Self::item_count),
/// [`view_type`](Self::view_type), [`create_view`](Self::create_view), and
/// [`bind_view`](Self::bind_view), and re-renders everything when
/// [`AdapterSignals::data_set_changed`] fires. It must not interleave those
/// queries with structural mutations inside one render pass.
///
/// # Locking
///
/// Content is guarded by a read/write lock; each structural mutation holds
/// the write lock only for the mutation itself. Slot descriptors, the
/// request-more callback, and signal slots are always invoked with no adapter
/// lock held, so they may call back into the adapter (for example, a
/// request-more callback that appends synchronously).
///
/// The content binder runs with only the content read lock held. Read-only
/// queries take that lock recursively, so a binder may ask the adapter about
/// its counts and items, but it must not mutate it.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use segmented_list::model::{
///     FnSlot, HolderBinder, ItemHolder, SegmentedAdapter, Segment, SlotRef,
/// };
///
/// #[derive(Default)]
/// struct Row(String);
///
/// impl ItemHolder<String> for Row {
///     fn set_data(&mut self, item: &String) {
///         self.0 = item.clone();
///     }
/// }
///
/// let adapter = SegmentedAdapter::new(HolderBinder::new(|_: &(), _: u32| Row::default()));
///
/// let header: SlotRef<Row, ()> = Arc::new(FnSlot::new(
///     |_: &()| Row::default(),
///     |row: &mut Row| row.0 = "Fruit".to_string(),
/// ));
/// adapter.add_header(header);
/// adapter.append_all(["apple".to_string(), "pear".to_string()]);
///
/// assert_eq!(adapter.item_count(), 3);
/// assert_eq!(adapter.resolve(2).unwrap(), Segment::Content(1));
///
/// let view_type = adapter.view_type(0).unwrap();
/// let mut view = adapter.create_view(view_type, &()).unwrap();
/// adapter.bind_view(0, &mut view).unwrap();
/// assert_eq!(view.0, "Fruit");
/// ```
pub struct SegmentedAdapter<T, V, P> {
    items: RwLock<Vec<T>>,
    slots: Mutex<SlotRegistry<V, P>>,
    load_more: Mutex<LoadMoreTrigger<V, P>>,
    binder: Arc<dyn ContentBinder<T, V, P>>,
    notify_on_change: AtomicBool,
    notify_on_slot_added: bool,
    signals: AdapterSignals,
}

impl<T, V, P> SegmentedAdapter<T, V, P>
where
    T: Send + Sync + 'static,
    V: 'static,
    P: 'static,
{
    /// Creates an empty adapter with the default configuration.
    pub fn new<B>(binder: B) -> Self
    where
        B: ContentBinder<T, V, P> + 'static,
    {
        Self::with_config(&AdapterConfig::default(), binder)
    }

    /// Creates an adapter over `items` with the default configuration.
    pub fn with_items<B>(items: Vec<T>, binder: B) -> Self
    where
        B: ContentBinder<T, V, P> + 'static,
    {
        let adapter = Self::new(binder);
        *adapter.items.write() = items;
        adapter
    }

    /// Creates an empty adapter from an explicit configuration.
    pub fn with_config<B>(config: &AdapterConfig, binder: B) -> Self
    where
        B: ContentBinder<T, V, P> + 'static,
    {
        Self {
            items: RwLock::new(Vec::with_capacity(config.initial_capacity)),
            slots: Mutex::new(SlotRegistry::new()),
            load_more: Mutex::new(LoadMoreTrigger::new()),
            binder: Arc::new(binder),
            notify_on_change: AtomicBool::new(config.notify_on_change),
            notify_on_slot_added: config.notify_on_slot_added,
            signals: AdapterSignals::new(),
        }
    }

    /// Returns the adapter's signals.
    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    // -------------------------------------------------------------------------
    // Header and footer slots
    // -------------------------------------------------------------------------

    /// Appends a header slot and returns its key.
    ///
    /// Does not refresh the host unless `notify_on_slot_added` is configured.
    pub fn add_header(&self, slot: SlotRef<V, P>) -> SlotKey {
        let key = self.slots.lock().push_header(slot);
        tracing::debug!(target: targets::SLOTS, ?key, "header added");
        if self.notify_on_slot_added {
            self.signals.emit_data_set_changed();
        }
        key
    }

    /// Appends a footer slot and returns its key.
    ///
    /// User footers are placed before any load-more row shown later, but a
    /// footer added while a load-more row is shown lands after it.
    pub fn add_footer(&self, slot: SlotRef<V, P>) -> SlotKey {
        let key = self.slots.lock().push_footer(slot, SlotRole::User);
        tracing::debug!(target: targets::SLOTS, ?key, "footer added");
        if self.notify_on_slot_added {
            self.signals.emit_data_set_changed();
        }
        key
    }

    /// Removes the first occurrence of a header slot and refreshes the host.
    ///
    /// Removing a slot that is not a header does nothing.
    pub fn remove_header(&self, slot: &SlotRef<V, P>) -> bool {
        let removed = self.slots.lock().remove_header(slot);
        self.after_slot_removal(removed, "header")
    }

    /// Removes the first occurrence of a footer slot and refreshes the host.
    ///
    /// Removing a slot that is not a footer does nothing.
    pub fn remove_footer(&self, slot: &SlotRef<V, P>) -> bool {
        let removed = self.slots.lock().remove_footer(slot);
        self.after_slot_removal(removed, "footer")
    }

    fn after_slot_removal(&self, removed: bool, kind: &'static str) -> bool {
        if removed {
            tracing::debug!(target: targets::SLOTS, kind, "slot removed");
            self.signals.emit_data_set_changed();
        } else {
            tracing::trace!(target: targets::SLOTS, kind, "slot not registered, nothing removed");
        }
        removed
    }

    /// Number of header slots.
    pub fn header_count(&self) -> usize {
        self.slots.lock().header_count()
    }

    /// Number of footer slots, including a shown load-more row.
    pub fn footer_count(&self) -> usize {
        self.slots.lock().footer_count()
    }

    /// Header keys in display order.
    pub fn header_keys(&self) -> Vec<SlotKey> {
        self.slots.lock().headers().to_vec()
    }

    /// Footer keys in display order.
    pub fn footer_keys(&self) -> Vec<SlotKey> {
        self.slots.lock().footers().collect()
    }

    /// Returns `true` if `slot` is currently a header.
    pub fn contains_header(&self, slot: &SlotRef<V, P>) -> bool {
        self.slots.lock().contains_header(slot)
    }

    /// Returns `true` if `slot` is currently a footer.
    pub fn contains_footer(&self, slot: &SlotRef<V, P>) -> bool {
        self.slots.lock().contains_footer(slot)
    }

    // -------------------------------------------------------------------------
    // Load-more
    // -------------------------------------------------------------------------

    /// Configures load-more.
    ///
    /// `slot` is the trailing "more" row. The first append after this call
    /// shows it; each time the host binds it outside an in-flight load,
    /// `on_load_more` is called exactly once. The callback should eventually
    /// append the next page or call [`stop_more`](Self::stop_more).
    pub fn set_more<F>(&self, slot: SlotRef<V, P>, on_load_more: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut trigger = self.load_more.lock();
        let mut slots = self.slots.lock();
        trigger.set_more(&mut slots, slot, Arc::new(on_load_more));
    }

    /// Configures the "no more data" row shown after
    /// [`stop_more`](Self::stop_more).
    pub fn set_no_more(&self, slot: SlotRef<V, P>) {
        let mut trigger = self.load_more.lock();
        let mut slots = self.slots.lock();
        trigger.set_no_more(&mut slots, slot);
    }

    /// Signals that there is no more data to load.
    ///
    /// Replaces the "more" row with the "no more" row (if configured) and
    /// refreshes the host, regardless of the auto-notify flag. Repeated calls
    /// do nothing.
    pub fn stop_more(&self) {
        let (changed, state) = {
            let mut trigger = self.load_more.lock();
            let mut slots = self.slots.lock();
            let changed = trigger.stop(&mut slots);
            (changed, trigger.state())
        };
        if changed {
            tracing::debug!(target: targets::LOAD_MORE, "load-more stopped");
            self.signals.emit_load_more_state(Some(state));
            self.signals.emit_data_set_changed();
        }
    }

    /// Current load-more state.
    pub fn load_more_state(&self) -> LoadMoreState {
        self.load_more.lock().state()
    }

    /// Returns `true` while a load-more request is in flight.
    pub fn is_loading_more(&self) -> bool {
        self.load_more_state() == LoadMoreState::Loading
    }

    fn show_load_more(&self) {
        let changed = {
            let mut trigger = self.load_more.lock();
            let mut slots = self.slots.lock();
            trigger.show(&mut slots)
        };
        self.signals.emit_load_more_state(changed);
    }

    fn request_more(&self) {
        let callback = self.load_more.lock().request();
        if let Some(callback) = callback {
            tracing::debug!(target: targets::LOAD_MORE, "requesting more content");
            self.signals
                .emit_load_more_state(Some(LoadMoreState::Loading));
            callback();
        }
    }

    // -------------------------------------------------------------------------
    // Content mutations
    // -------------------------------------------------------------------------

    /// Appends an item.
    pub fn append(&self, item: T) {
        self.show_load_more();
        self.items.write().push(item);
        tracing::debug!(target: targets::ADAPTER, "item appended");
        self.notify_changed();
    }

    /// Appends every item of `items`.
    ///
    /// An empty batch does nothing: no load-more step, no lock, no refresh.
    pub fn append_all<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let batch: Vec<T> = items.into_iter().collect();
        if batch.is_empty() {
            tracing::trace!(target: targets::ADAPTER, "empty batch, nothing appended");
            return;
        }
        self.show_load_more();
        let count = batch.len();
        self.items.write().extend(batch);
        tracing::debug!(target: targets::ADAPTER, count, "items appended");
        self.notify_changed();
    }

    /// Appends a batch that may be absent.
    ///
    /// `None` behaves like an empty batch and does nothing.
    pub fn append_all_opt(&self, items: Option<Vec<T>>) {
        match items {
            Some(items) => self.append_all(items),
            None => tracing::trace!(target: targets::ADAPTER, "absent batch, nothing appended"),
        }
    }

    /// Inserts an item at content `index`.
    ///
    /// Fails with [`AdapterError::IndexOutOfRange`] if `index > count()`.
    pub fn insert(&self, index: usize, item: T) -> Result<()> {
        {
            let mut items = self.items.write();
            if index > items.len() {
                return Err(AdapterError::index_out_of_range(index, items.len()));
            }
            items.insert(index, item);
        }
        tracing::debug!(target: targets::ADAPTER, index, "item inserted");
        self.notify_changed();
        Ok(())
    }

    /// Removes the first item equal to `item`.
    ///
    /// Returns `true` if an item was removed. The host is refreshed either way
    /// when auto-notify is on.
    pub fn remove(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        let removed = {
            let mut items = self.items.write();
            match items.iter().position(|candidate| candidate == item) {
                Some(index) => {
                    items.remove(index);
                    true
                }
                None => false,
            }
        };
        tracing::debug!(target: targets::ADAPTER, removed, "remove");
        self.notify_changed();
        removed
    }

    /// Removes all content and resets load-more.
    ///
    /// Both load-more rows leave the footers and the next append shows the
    /// "more" row again.
    pub fn clear(&self) {
        let changed = {
            let mut trigger = self.load_more.lock();
            let mut slots = self.slots.lock();
            trigger.reset(&mut slots)
        };
        self.items.write().clear();
        tracing::debug!(target: targets::ADAPTER, "content cleared");
        self.signals.emit_load_more_state(changed);
        self.notify_changed();
    }

    /// Sorts the content with `compare`.
    pub fn sort_by<F>(&self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        {
            let _span = PerfSpan::new("sort");
            self.items.write().sort_by(compare);
        }
        self.notify_changed();
    }

    // -------------------------------------------------------------------------
    // Refresh control
    // -------------------------------------------------------------------------

    /// Controls whether content mutations refresh the host automatically.
    ///
    /// While disabled the caller must call
    /// [`notify_data_set_changed`](Self::notify_data_set_changed), which also
    /// turns auto-notify back on.
    pub fn set_notify_on_change(&self, notify: bool) {
        self.notify_on_change.store(notify, Ordering::SeqCst);
    }

    /// Returns whether content mutations refresh the host automatically.
    pub fn notify_on_change(&self) -> bool {
        self.notify_on_change.load(Ordering::SeqCst)
    }

    /// Refreshes the host and re-enables auto-notify.
    pub fn notify_data_set_changed(&self) {
        self.notify_on_change.store(true, Ordering::SeqCst);
        self.signals.emit_data_set_changed();
    }

    fn notify_changed(&self) {
        if self.notify_on_change() {
            self.signals.emit_data_set_changed();
        }
    }

    // -------------------------------------------------------------------------
    // Content queries
    // -------------------------------------------------------------------------

    /// Number of content items, excluding headers and footers.
    pub fn count(&self) -> usize {
        self.items.read_recursive().len()
    }

    /// Returns `true` if there are no content items.
    pub fn is_empty(&self) -> bool {
        self.items.read_recursive().is_empty()
    }

    /// Returns a clone of the item at content `index`.
    pub fn item(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.items.read_recursive().get(index).cloned()
    }

    /// Calls `f` with the item at content `index`.
    pub fn with_item<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.items.read_recursive().get(index).map(f)
    }

    /// Returns the content index of the first item equal to `item`.
    pub fn position_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.items
            .read_recursive()
            .iter()
            .position(|candidate| candidate == item)
    }

    /// Read access to the content.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read_recursive()
    }

    // -------------------------------------------------------------------------
    // Host contract
    // -------------------------------------------------------------------------

    /// Snapshot of the three sequence lengths.
    pub fn layout(&self) -> SegmentLayout {
        let slots = self.slots.lock();
        let content = self.items.read_recursive().len();
        SegmentLayout::new(slots.header_count(), content, slots.footer_count())
    }

    /// Total number of flat positions: headers + content + footers.
    pub fn item_count(&self) -> usize {
        self.layout().total()
    }

    /// Resolves a flat position to its segment.
    pub fn resolve(&self, position: usize) -> Result<Segment> {
        let layout = self.layout();
        layout
            .resolve(position)
            .ok_or_else(|| AdapterError::position_out_of_range(position, layout.total()))
    }

    /// Maps a segment index back to a flat position.
    pub fn flat_position(&self, segment: Segment) -> Option<usize> {
        self.layout().flat_position(segment)
    }

    /// A stable id for the row at `position`; the flat position itself.
    pub fn item_id(&self, position: usize) -> Result<u64> {
        self.resolve(position)?;
        Ok(position as u64)
    }

    /// The view type of the row at `position`.
    ///
    /// Header and footer rows use their slot key; content rows ask the
    /// content binder, which runs with only the content read lock held.
    pub fn view_type(&self, position: usize) -> Result<ViewType> {
        let layout = self.layout();
        let out_of_range = || AdapterError::position_out_of_range(position, layout.total());
        match layout.resolve(position).ok_or_else(out_of_range)? {
            Segment::Header(i) => self
                .slots
                .lock()
                .header(i)
                .map(ViewType::Slot)
                .ok_or_else(out_of_range),
            Segment::Footer(i) => self
                .slots
                .lock()
                .footer(i)
                .map(|(key, _)| ViewType::Slot(key))
                .ok_or_else(out_of_range),
            Segment::Content(i) => {
                let items = self.items.read();
                let item = items.get(i).ok_or_else(out_of_range)?;
                Ok(ViewType::Content(self.binder.view_type(i, item)))
            }
        }
    }

    /// Creates a view for `view_type` inside `parent`.
    ///
    /// Slot view types are looked up among the registered headers and footers;
    /// a key that is no longer registered fails with
    /// [`AdapterError::UnknownViewType`]. Content view types go to the content
    /// binder.
    pub fn create_view(&self, view_type: ViewType, parent: &P) -> Result<V> {
        match view_type {
            ViewType::Slot(key) => {
                let slot = self
                    .slots
                    .lock()
                    .get(key)
                    .cloned()
                    .ok_or(AdapterError::UnknownViewType(view_type.to_raw()))?;
                Ok(slot.create_view(parent))
            }
            ViewType::Content(t) => Ok(self.binder.create_view(parent, t)),
        }
    }

    /// Binds the row at `position` to `view`.
    ///
    /// Binding the load-more row asks for more content (at most once per
    /// load).
    pub fn bind_view(&self, position: usize, view: &mut V) -> Result<()> {
        match self.locate(position)? {
            Located::Slot { slot, role } => {
                slot.bind_view(view);
                if role == SlotRole::More {
                    self.request_more();
                }
                Ok(())
            }
            Located::Content(index) => {
                let items = self.items.read();
                let item = items
                    .get(index)
                    .ok_or_else(|| AdapterError::index_out_of_range(index, items.len()))?;
                self.binder.bind_view(view, item, index);
                Ok(())
            }
        }
    }

    fn locate(&self, position: usize) -> Result<Located<V, P>> {
        let slots = self.slots.lock();
        let content = self.items.read_recursive().len();
        let layout = SegmentLayout::new(slots.header_count(), content, slots.footer_count());
        let segment = layout
            .resolve(position)
            .ok_or_else(|| AdapterError::position_out_of_range(position, layout.total()))?;

        let entry = match segment {
            Segment::Header(i) => slots.header(i).map(|key| (key, SlotRole::User)),
            Segment::Footer(i) => slots.footer(i),
            Segment::Content(i) => return Ok(Located::Content(i)),
        };
        entry
            .and_then(|(key, role)| slots.get(key).map(|slot| (slot.clone(), role)))
            .map(|(slot, role)| Located::Slot { slot, role })
            .ok_or_else(|| AdapterError::position_out_of_range(position, layout.total()))
    }
}

impl<T, V, P> std::fmt::Debug for SegmentedAdapter<T, V, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let load_more = self.load_more.lock();
        let slots = self.slots.lock();
        let content = self.items.read_recursive().len();
        f.debug_struct("SegmentedAdapter")
            .field("content", &content)
            .field("slots", &*slots)
            .field("load_more", &*load_more)
            .field("notify_on_change", &self.notify_on_change.load(Ordering::SeqCst))
            .finish()
    }
}

static_assertions::assert_impl_all!(SegmentedAdapter<String, String, ()>: Send, Sync);
