//! Header and footer slot descriptors and their registry.
//!
//! A *special slot* is any non-content row: a header, a footer, or one of the
//! two rows owned by the load-more trigger. Each slot knows how to construct
//! its view and how to bind it; the registry keeps the ordered header and
//! footer sequences and hands out a stable [`SlotKey`] per descriptor instance.

use std::fmt;
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

/// A pluggable header/footer row.
///
/// `V` is the host's view handle type and `P` the container a view is created
/// in. Implementations are shared with the adapter through [`SlotRef`].
///
/// # Example
///
/// ```
/// use segmented_list::model::SpecialSlot;
///
/// struct Banner(&'static str);
///
/// impl SpecialSlot<String, ()> for Banner {
///     fn create_view(&self, _parent: &()) -> String {
///         String::new()
///     }
///
///     fn bind_view(&self, view: &mut String) {
///         view.clear();
///         view.push_str(self.0);
///     }
/// }
/// ```
pub trait SpecialSlot<V, P>: Send + Sync {
    /// Creates a fresh view for this slot inside `parent`.
    fn create_view(&self, parent: &P) -> V;

    /// Binds this slot's content to a (possibly recycled) view.
    fn bind_view(&self, view: &mut V);
}

/// Shared handle to a slot descriptor.
///
/// Registry operations compare descriptors by `Arc` identity, never by value.
pub type SlotRef<V, P> = Arc<dyn SpecialSlot<V, P>>;

/// A [`SpecialSlot`] built from two closures.
///
/// ```
/// use std::sync::Arc;
/// use segmented_list::model::{FnSlot, SlotRef};
///
/// let header: SlotRef<String, ()> = Arc::new(FnSlot::new(
///     |_parent: &()| String::new(),
///     |view: &mut String| *view = "Today".to_string(),
/// ));
/// ```
pub struct FnSlot<C, B> {
    create: C,
    bind: B,
}

impl<C, B> FnSlot<C, B> {
    /// Creates a slot from a construct closure and a bind closure.
    pub fn new(create: C, bind: B) -> Self {
        Self { create, bind }
    }
}

impl<V, P, C, B> SpecialSlot<V, P> for FnSlot<C, B>
where
    C: Fn(&P) -> V + Send + Sync,
    B: Fn(&mut V) + Send + Sync,
{
    fn create_view(&self, parent: &P) -> V {
        (self.create)(parent)
    }

    fn bind_view(&self, view: &mut V) {
        (self.bind)(view)
    }
}

/// A slot whose view is static: construction delegates to a closure and
/// binding does nothing.
///
/// This is the usual shape of "loading..." and "no more items" rows.
pub struct StaticSlot<C> {
    create: C,
}

impl<C> StaticSlot<C> {
    /// Creates a static slot from a construct closure.
    pub fn new(create: C) -> Self {
        Self { create }
    }
}

impl<V, P, C> SpecialSlot<V, P> for StaticSlot<C>
where
    C: Fn(&P) -> V + Send + Sync,
{
    fn create_view(&self, parent: &P) -> V {
        (self.create)(parent)
    }

    fn bind_view(&self, _view: &mut V) {}
}

new_key_type! {
    /// Stable identity of a registered slot descriptor.
    ///
    /// A key is assigned the first time a descriptor instance enters the
    /// header or footer sequence and stays the same while the descriptor is
    /// registered anywhere. It doubles as the slot's view type
    /// (see [`ViewType::Slot`](super::ViewType::Slot)).
    pub struct SlotKey;
}

/// What a row in the header or footer sequence is used for.
///
/// The role belongs to the sequence entry, not to the descriptor: the same
/// descriptor may be a plain header and the load-more row at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    /// A caller-supplied header or footer.
    User,
    /// The load-more trigger's "more" row. Binding it requests more data.
    More,
    /// The load-more trigger's "no more data" row.
    NoMore,
}

struct SlotEntry<V, P> {
    slot: SlotRef<V, P>,
    /// Occurrences across both sequences; the key is released at zero.
    uses: usize,
}

/// Ordered header and footer sequences backed by a key arena.
pub struct SlotRegistry<V, P> {
    arena: SlotMap<SlotKey, SlotEntry<V, P>>,
    headers: Vec<SlotKey>,
    footers: Vec<(SlotKey, SlotRole)>,
}

impl<V, P> Default for SlotRegistry<V, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> SlotRegistry<V, P> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
            headers: Vec::new(),
            footers: Vec::new(),
        }
    }

    /// Number of header slots.
    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of footer slots, including load-more rows currently shown.
    pub fn footer_count(&self) -> usize {
        self.footers.len()
    }

    /// Header keys in display order.
    pub fn headers(&self) -> &[SlotKey] {
        &self.headers
    }

    /// Footer keys in display order.
    pub fn footers(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.footers.iter().map(|(key, _)| *key)
    }

    /// Returns the key of the header at `index`.
    pub fn header(&self, index: usize) -> Option<SlotKey> {
        self.headers.get(index).copied()
    }

    /// Returns the key and role of the footer at `index`.
    pub fn footer(&self, index: usize) -> Option<(SlotKey, SlotRole)> {
        self.footers.get(index).copied()
    }

    /// Looks up a registered descriptor.
    pub fn get(&self, key: SlotKey) -> Option<&SlotRef<V, P>> {
        self.arena.get(key).map(|entry| &entry.slot)
    }

    /// Returns the key currently assigned to `slot`, if it is registered.
    pub fn key_of(&self, slot: &SlotRef<V, P>) -> Option<SlotKey> {
        self.arena
            .iter()
            .find(|(_, entry)| Arc::ptr_eq(&entry.slot, slot))
            .map(|(key, _)| key)
    }

    /// Returns `true` if `slot` is in the footer sequence.
    pub fn contains_footer(&self, slot: &SlotRef<V, P>) -> bool {
        self.footer_index(slot, None).is_some()
    }

    /// Returns `true` if `slot` is in the footer sequence with `role`.
    pub fn contains_footer_as(&self, slot: &SlotRef<V, P>, role: SlotRole) -> bool {
        self.footer_index(slot, Some(role)).is_some()
    }

    /// Returns `true` if `slot` is in the header sequence.
    pub fn contains_header(&self, slot: &SlotRef<V, P>) -> bool {
        self.key_of(slot)
            .is_some_and(|key| self.headers.contains(&key))
    }

    /// Appends a header and returns its key.
    pub fn push_header(&mut self, slot: SlotRef<V, P>) -> SlotKey {
        let key = self.intern(slot);
        self.headers.push(key);
        key
    }

    /// Appends a footer with the given role and returns its key.
    pub fn push_footer(&mut self, slot: SlotRef<V, P>, role: SlotRole) -> SlotKey {
        let key = self.intern(slot);
        self.footers.push((key, role));
        key
    }

    /// Removes the first occurrence of `slot` from the headers.
    ///
    /// Returns `false` if the slot was not a header.
    pub fn remove_header(&mut self, slot: &SlotRef<V, P>) -> bool {
        let Some(key) = self.key_of(slot) else {
            return false;
        };
        match self.headers.iter().position(|k| *k == key) {
            Some(index) => {
                self.headers.remove(index);
                self.release(key)
            }
            None => false,
        }
    }

    /// Removes the first occurrence of `slot` from the footers, whatever its
    /// role.
    ///
    /// Returns `false` if the slot was not a footer.
    pub fn remove_footer(&mut self, slot: &SlotRef<V, P>) -> bool {
        self.remove_footer_at(self.footer_index(slot, None))
    }

    /// Removes the first footer occurrence of `slot` that has `role`.
    pub fn remove_footer_as(&mut self, slot: &SlotRef<V, P>, role: SlotRole) -> bool {
        self.remove_footer_at(self.footer_index(slot, Some(role)))
    }

    /// Replaces the first footer occurrence of `old` that has `role` with
    /// `new`, keeping its position.
    ///
    /// Returns `false` (and registers nothing) if `old` is not shown with
    /// that role.
    pub fn replace_footer_as(
        &mut self,
        old: &SlotRef<V, P>,
        new: SlotRef<V, P>,
        role: SlotRole,
    ) -> bool {
        let Some(index) = self.footer_index(old, Some(role)) else {
            return false;
        };
        let (old_key, _) = self.footers[index];
        let new_key = self.intern(new);
        self.footers[index] = (new_key, role);
        self.release(old_key)
    }

    fn footer_index(&self, slot: &SlotRef<V, P>, role: Option<SlotRole>) -> Option<usize> {
        let key = self.key_of(slot)?;
        self.footers
            .iter()
            .position(|(k, r)| *k == key && role.is_none_or(|role| role == *r))
    }

    fn remove_footer_at(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(index) => {
                let (key, _) = self.footers.remove(index);
                self.release(key)
            }
            None => false,
        }
    }

    fn intern(&mut self, slot: SlotRef<V, P>) -> SlotKey {
        let key = match self.key_of(&slot) {
            Some(key) => key,
            None => self.arena.insert(SlotEntry { slot, uses: 0 }),
        };
        if let Some(entry) = self.arena.get_mut(key) {
            entry.uses += 1;
        }
        key
    }

    fn release(&mut self, key: SlotKey) -> bool {
        let Some(entry) = self.arena.get_mut(key) else {
            return false;
        };
        entry.uses -= 1;
        if entry.uses == 0 {
            self.arena.remove(key);
        }
        true
    }
}

impl<V, P> fmt::Debug for SlotRegistry<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let footers: Vec<SlotRole> = self.footers.iter().map(|(_, role)| *role).collect();
        f.debug_struct("SlotRegistry")
            .field("headers", &vec![SlotRole::User; self.headers.len()])
            .field("footers", &footers)
            .finish()
    }
}
