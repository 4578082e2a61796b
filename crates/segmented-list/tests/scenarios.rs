//! End-to-end adapter scenarios driven through the host contract.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use segmented_list::model::{
    FnSlot, HolderBinder, ItemHolder, LoadMoreState, Segment, SegmentedAdapter, SlotRef,
    StaticSlot, ViewType,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Cell {
    text: String,
}

impl ItemHolder<String> for Cell {
    fn set_data(&mut self, item: &String) {
        self.text = item.clone();
    }
}

type Adapter = SegmentedAdapter<String, Cell, ()>;

fn adapter() -> Adapter {
    SegmentedAdapter::new(HolderBinder::new(|_: &(), _: u32| Cell::default()))
}

fn label(text: &'static str) -> SlotRef<Cell, ()> {
    Arc::new(FnSlot::new(
        |_: &()| Cell::default(),
        move |cell: &mut Cell| cell.text = text.to_string(),
    ))
}

fn blank() -> SlotRef<Cell, ()> {
    Arc::new(StaticSlot::new(|_: &()| Cell::default()))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Configures load-more with a call counter.
fn with_load_more(adapter: &Adapter) -> (SlotRef<Cell, ()>, SlotRef<Cell, ()>, Arc<AtomicUsize>) {
    let more = blank();
    let no_more = blank();
    let calls = Arc::new(AtomicUsize::new(0));
    let recv = calls.clone();
    adapter.set_more(more.clone(), move || {
        recv.fetch_add(1, Ordering::SeqCst);
    });
    adapter.set_no_more(no_more.clone());
    (more, no_more, calls)
}

fn refresh_counter(adapter: &Adapter) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let recv = count.clone();
    adapter.signals().data_set_changed.connect(move |_| {
        recv.fetch_add(1, Ordering::SeqCst);
    });
    count
}

#[test]
fn test_header_over_content() {
    let adapter = adapter();
    adapter.add_header(label("H0"));
    adapter.append_all(strings(&["a", "b", "c"]));

    assert_eq!(adapter.item_count(), 4);
    assert_eq!(adapter.resolve(0).unwrap(), Segment::Header(0));
    assert_eq!(adapter.resolve(1).unwrap(), Segment::Content(0));
    assert_eq!(adapter.resolve(3).unwrap(), Segment::Content(2));

    let mut cell = Cell::default();
    adapter.bind_view(1, &mut cell).unwrap();
    assert_eq!(cell.text, "a");
    adapter.bind_view(3, &mut cell).unwrap();
    assert_eq!(cell.text, "c");
}

#[test]
fn test_more_row_appears_on_first_append() {
    let adapter = adapter();
    let (more, _, _) = with_load_more(&adapter);

    assert_eq!(adapter.item_count(), 0);
    assert_eq!(adapter.load_more_state(), LoadMoreState::Idle);

    adapter.append_all(strings(&["x", "y"]));
    assert_eq!(adapter.item_count(), 3);
    assert_eq!(adapter.footer_count(), 1);
    assert!(adapter.contains_footer(&more));
    assert_eq!(adapter.load_more_state(), LoadMoreState::AwaitingFirstBind);

    // Only once per configuration cycle.
    adapter.append("z".to_string());
    assert_eq!(adapter.footer_count(), 1);
}

#[test]
fn test_bind_more_then_stop() {
    let adapter = adapter();
    let (more, no_more, calls) = with_load_more(&adapter);
    adapter.append("x".to_string());

    let mut cell = Cell::default();
    adapter.bind_view(1, &mut cell).unwrap();
    assert_eq!(adapter.load_more_state(), LoadMoreState::Loading);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    adapter.bind_view(1, &mut cell).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    adapter.stop_more();
    assert_eq!(adapter.load_more_state(), LoadMoreState::NoMoreData);
    assert!(!adapter.contains_footer(&more));
    assert!(adapter.contains_footer(&no_more));
    assert_eq!(adapter.item_count(), 2);

    // Binding the "no more" row never requests anything.
    adapter.bind_view(1, &mut cell).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_append_ends_load_and_rearms_request() {
    let adapter = adapter();
    let (_, _, calls) = with_load_more(&adapter);
    adapter.append("x".to_string());

    let mut cell = Cell::default();
    adapter.bind_view(1, &mut cell).unwrap();
    adapter.append("y".to_string());
    assert_eq!(adapter.load_more_state(), LoadMoreState::AwaitingFirstBind);

    adapter.bind_view(2, &mut cell).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_stop_more_is_idempotent() {
    let adapter = adapter();
    let (_, no_more, _) = with_load_more(&adapter);
    adapter.append("x".to_string());
    let refreshes = refresh_counter(&adapter);

    adapter.stop_more();
    adapter.stop_more();

    assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    let no_more_key = adapter.footer_keys()[0];
    assert_eq!(
        adapter.footer_keys().iter().filter(|k| **k == no_more_key).count(),
        1
    );
    assert!(adapter.contains_footer(&no_more));
}

#[test]
fn test_stop_more_without_no_more_row() {
    let adapter = adapter();
    let more = blank();
    adapter.set_more(more.clone(), || {});
    adapter.append("x".to_string());

    adapter.stop_more();
    assert_eq!(adapter.footer_count(), 0);
    assert_eq!(adapter.item_count(), 1);
    assert_eq!(adapter.load_more_state(), LoadMoreState::NoMoreData);
}

#[test]
fn test_stop_refreshes_even_with_auto_notify_off() {
    let adapter = adapter();
    with_load_more(&adapter);
    adapter.append("x".to_string());
    adapter.set_notify_on_change(false);
    let refreshes = refresh_counter(&adapter);

    adapter.stop_more();
    assert_eq!(refreshes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_clear_resets_everything_but_user_slots() {
    let adapter = adapter();
    adapter.add_header(label("H0"));
    adapter.add_footer(label("F0"));
    let (more, no_more, _) = with_load_more(&adapter);
    adapter.append_all(strings(&["a", "b"]));

    let mut cell = Cell::default();
    adapter.bind_view(4, &mut cell).unwrap();
    adapter.stop_more();

    adapter.clear();
    assert_eq!(adapter.item_count(), 2);
    assert_eq!(adapter.load_more_state(), LoadMoreState::Idle);
    assert!(!adapter.contains_footer(&more));
    assert!(!adapter.contains_footer(&no_more));

    // The next append shows the "more" row again.
    adapter.append("c".to_string());
    assert!(adapter.contains_footer(&more));
    assert_eq!(adapter.item_count(), 4);
}

#[test]
fn test_empty_batches_are_noops() {
    let adapter = adapter();
    let (_, _, _) = with_load_more(&adapter);
    let refreshes = refresh_counter(&adapter);

    adapter.append_all(Vec::<String>::new());
    adapter.append_all(std::iter::empty());
    adapter.append_all_opt(None);
    adapter.append_all_opt(Some(Vec::new()));

    assert_eq!(adapter.count(), 0);
    assert_eq!(adapter.item_count(), 0);
    assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    assert_eq!(adapter.load_more_state(), LoadMoreState::Idle);

    adapter.append_all_opt(Some(strings(&["a", "b"])));
    assert_eq!(adapter.count(), 2);
    assert_eq!(adapter.footer_count(), 1);
    assert_eq!(refreshes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_only_appends_show_the_more_row() {
    let adapter = adapter();
    let (more, _, calls) = with_load_more(&adapter);

    adapter.insert(0, "b".to_string()).unwrap();
    adapter.insert(0, "a".to_string()).unwrap();
    adapter.sort_by(|x, y| y.cmp(x));
    assert!(adapter.remove(&"a".to_string()));

    assert_eq!(adapter.footer_count(), 0);
    assert_eq!(adapter.item_count(), 1);
    assert_eq!(adapter.load_more_state(), LoadMoreState::Idle);

    adapter.append("c".to_string());
    assert!(adapter.contains_footer(&more));
    assert_eq!(adapter.load_more_state(), LoadMoreState::AwaitingFirstBind);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_stop_before_first_append_keeps_more_row_hidden() {
    let adapter = adapter();
    let (more, no_more, calls) = with_load_more(&adapter);

    adapter.stop_more();
    assert_eq!(adapter.load_more_state(), LoadMoreState::NoMoreData);
    assert!(adapter.contains_footer(&no_more));

    adapter.append("a".to_string());
    adapter.append_all(strings(&["b", "c"]));

    assert!(!adapter.contains_footer(&more));
    assert_eq!(adapter.footer_count(), 1);
    assert_eq!(adapter.item_count(), 4);
    assert_eq!(adapter.load_more_state(), LoadMoreState::NoMoreData);

    let mut cell = Cell::default();
    for position in 0..adapter.item_count() {
        adapter.bind_view(position, &mut cell).unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_footers_follow_headers_when_content_empty() {
    let adapter = adapter();
    adapter.add_header(label("H0"));
    adapter.add_footer(label("F0"));

    assert_eq!(adapter.resolve(1).unwrap(), Segment::Footer(0));
    let mut cell = Cell::default();
    adapter.bind_view(1, &mut cell).unwrap();
    assert_eq!(cell.text, "F0");
}

#[test]
fn test_view_types_drive_construction() {
    let adapter = adapter();
    let h0 = label("H0");
    let key = adapter.add_header(h0);
    adapter.append("a".to_string());

    let header_type = adapter.view_type(0).unwrap();
    assert_eq!(header_type, ViewType::Slot(key));
    assert!(header_type.to_raw() > u64::from(u32::MAX));

    let content_type = adapter.view_type(1).unwrap();
    assert_eq!(content_type, ViewType::Content(0));

    let mut header_view = adapter.create_view(header_type, &()).unwrap();
    adapter.bind_view(0, &mut header_view).unwrap();
    assert_eq!(header_view.text, "H0");
}

#[test]
fn test_load_more_state_signal_sequence() {
    let adapter = adapter();
    with_load_more(&adapter);
    let states = Arc::new(Mutex::new(Vec::new()));
    let recv = states.clone();
    adapter
        .signals()
        .load_more_state_changed
        .connect(move |state| recv.lock().push(*state));

    adapter.append("x".to_string());
    let mut cell = Cell::default();
    adapter.bind_view(1, &mut cell).unwrap();
    adapter.stop_more();
    adapter.clear();

    assert_eq!(
        *states.lock(),
        vec![
            LoadMoreState::AwaitingFirstBind,
            LoadMoreState::Loading,
            LoadMoreState::NoMoreData,
            LoadMoreState::Idle,
        ]
    );
}

#[test]
fn test_concurrent_producers() {
    let adapter = Arc::new(adapter());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let adapter = adapter.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    adapter.append(format!("{t}-{i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(adapter.count(), 100);
}
