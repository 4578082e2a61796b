//! Paged feed demo
//!
//! Drives a `SegmentedAdapter` the way a virtualized host would: a header,
//! three pages of content fetched through the load-more row, and a
//! "no more" footer once the source runs dry. The "host" here renders to
//! stdout.
//!
//! Run with: RUST_LOG=segmented_list=debug cargo run -p segmented-list --example paged_feed

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use segmented_list::model::{
    FnSlot, HolderBinder, ItemHolder, SegmentedAdapter, SlotRef, StaticSlot,
};
use tracing_subscriber::EnvFilter;

/// A text row, standing in for a real widget.
#[derive(Debug, Default)]
struct TextRow {
    text: String,
}

impl ItemHolder<String> for TextRow {
    fn set_data(&mut self, item: &String) {
        self.text = item.clone();
    }
}

type Feed = SegmentedAdapter<String, TextRow, ()>;

/// A fake paged backend.
struct Source {
    next_page: usize,
    pages: usize,
}

impl Source {
    fn fetch(&mut self) -> Option<Vec<String>> {
        if self.next_page >= self.pages {
            return None;
        }
        let page = self.next_page;
        self.next_page += 1;
        Some((0..4).map(|i| format!("post {}-{}", page, i)).collect())
    }
}

/// Renders every position, like a host whose viewport shows the whole list.
fn render(feed: &Feed) {
    println!("--- {} rows ---", feed.item_count());
    for position in 0..feed.item_count() {
        let Ok(view_type) = feed.view_type(position) else {
            break;
        };
        let Ok(mut row) = feed.create_view(view_type, &()) else {
            continue;
        };
        if feed.bind_view(position, &mut row).is_ok() {
            println!("{position:>3}  {}", row.text);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let feed: Arc<Feed> = Arc::new(SegmentedAdapter::new(HolderBinder::new(
        |_: &(), _: u32| TextRow::default(),
    )));

    let header: SlotRef<TextRow, ()> = Arc::new(FnSlot::new(
        |_: &()| TextRow::default(),
        |row: &mut TextRow| row.text = "== Feed ==".to_string(),
    ));
    feed.add_header(header);

    let loading: SlotRef<TextRow, ()> = Arc::new(FnSlot::new(
        |_: &()| TextRow::default(),
        |row: &mut TextRow| row.text = "loading...".to_string(),
    ));
    let the_end: SlotRef<TextRow, ()> = Arc::new(StaticSlot::new(|_: &()| TextRow {
        text: "-- no more posts --".to_string(),
    }));

    let source = Arc::new(Mutex::new(Source {
        next_page: 0,
        pages: 3,
    }));

    // The load-more callback runs synchronously from the bind path; a real
    // application would spawn the fetch and append when it completes.
    let weak: Weak<Feed> = Arc::downgrade(&feed);
    let backend = source.clone();
    feed.set_more(loading, move || {
        let Some(feed) = weak.upgrade() else {
            return;
        };
        match backend.lock().fetch() {
            Some(page) => feed.append_all(page),
            None => feed.stop_more(),
        }
    });
    feed.set_no_more(the_end);

    feed.signals().load_more_state_changed.connect(|state| {
        println!("[load-more] {state:?}");
    });

    let first_page = source.lock().fetch().unwrap_or_default();
    feed.append_all(first_page);

    // Each render binds the trailing "more" row, pulling the next page.
    for _ in 0..4 {
        render(&feed);
    }
}
