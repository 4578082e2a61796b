//! Flat position mapping over the header, content, and footer sequences.
//!
//! The host sees a single list of `headers + content + footers` rows. Every
//! mapping here is a pure function of the three sequence lengths captured in a
//! [`SegmentLayout`].

use std::ops::Range;

use slotmap::{Key, KeyData};

use super::slot::SlotKey;

/// The sequence a flat position belongs to, with the index inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Index into the header sequence.
    Header(usize),
    /// Index into the content sequence.
    Content(usize),
    /// Index into the footer sequence.
    Footer(usize),
}

impl Segment {
    /// The index within the segment's own sequence.
    pub fn index(self) -> usize {
        match self {
            Self::Header(i) | Self::Content(i) | Self::Footer(i) => i,
        }
    }

    /// Returns `true` for header and footer positions.
    pub fn is_special(self) -> bool {
        !matches!(self, Self::Content(_))
    }
}

/// The view type the host uses to pick a construction path and recycle views.
///
/// Content types come from the content binder; slot types are the registry
/// key of the descriptor. The two never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewType {
    /// A content row type chosen by the content binder.
    Content(u32),
    /// A header or footer row, identified by its descriptor key.
    Slot(SlotKey),
}

impl ViewType {
    /// Encodes the view type as a single integer for hosts that key their
    /// recycling pools by number.
    ///
    /// Content types occupy `0..=u32::MAX`. Slot keys always carry a nonzero
    /// version in their high 32 bits, so they land strictly above that range.
    pub fn to_raw(self) -> u64 {
        match self {
            Self::Content(t) => u64::from(t),
            Self::Slot(key) => key.data().as_ffi(),
        }
    }

    /// Decodes an integer produced by [`to_raw`](Self::to_raw).
    pub fn from_raw(raw: u64) -> Self {
        match u32::try_from(raw) {
            Ok(t) => Self::Content(t),
            Err(_) => Self::Slot(KeyData::from_ffi(raw).into()),
        }
    }
}

/// Snapshot of the three sequence lengths.
///
/// # Example
///
/// ```
/// use segmented_list::model::{Segment, SegmentLayout};
///
/// let layout = SegmentLayout::new(1, 3, 0);
/// assert_eq!(layout.total(), 4);
/// assert_eq!(layout.resolve(0), Some(Segment::Header(0)));
/// assert_eq!(layout.resolve(3), Some(Segment::Content(2)));
/// assert_eq!(layout.resolve(4), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentLayout {
    /// Number of header rows.
    pub headers: usize,
    /// Number of content rows.
    pub content: usize,
    /// Number of footer rows.
    pub footers: usize,
}

impl SegmentLayout {
    /// Creates a layout from the three sequence lengths.
    pub const fn new(headers: usize, content: usize, footers: usize) -> Self {
        Self {
            headers,
            content,
            footers,
        }
    }

    /// Total number of flat positions.
    pub const fn total(&self) -> usize {
        self.headers + self.content + self.footers
    }

    /// Flat positions occupied by headers.
    pub fn header_range(&self) -> Range<usize> {
        0..self.headers
    }

    /// Flat positions occupied by content.
    pub fn content_range(&self) -> Range<usize> {
        self.headers..self.headers + self.content
    }

    /// Flat positions occupied by footers.
    pub fn footer_range(&self) -> Range<usize> {
        self.headers + self.content..self.total()
    }

    /// Resolves a flat position to its segment.
    ///
    /// Headers are checked first, then footers (counted back from the end of
    /// the content), and anything else is content. With no content, the first
    /// position after the headers is therefore the first footer.
    ///
    /// Returns `None` for positions at or past [`total`](Self::total).
    pub fn resolve(&self, position: usize) -> Option<Segment> {
        if position >= self.total() {
            return None;
        }
        if position < self.headers {
            return Some(Segment::Header(position));
        }
        let past_headers = position - self.headers;
        if self.footers > 0 && past_headers >= self.content {
            return Some(Segment::Footer(past_headers - self.content));
        }
        Some(Segment::Content(past_headers))
    }

    /// Maps a segment index back to its flat position.
    ///
    /// Returns `None` if the index is outside its sequence.
    pub fn flat_position(&self, segment: Segment) -> Option<usize> {
        match segment {
            Segment::Header(i) if i < self.headers => Some(i),
            Segment::Content(i) if i < self.content => Some(self.headers + i),
            Segment::Footer(i) if i < self.footers => Some(self.headers + self.content + i),
            _ => None,
        }
    }
}
