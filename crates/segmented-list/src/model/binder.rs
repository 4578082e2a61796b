//! Content-row construction and binding.

/// Builds and binds the views for content rows.
///
/// The adapter calls [`create_view`](Self::create_view) when the host needs a
/// new view for a content view type, and [`bind_view`](Self::bind_view) to
/// put an item into a (possibly recycled) view.
///
/// [`view_type`](Self::view_type) and [`bind_view`](Self::bind_view) run with
/// the adapter's content read lock held and no other adapter lock. A binder
/// may call the adapter's read-only queries (counts, items, layout) but must
/// not mutate the adapter it is bound to.
pub trait ContentBinder<T, V, P>: Send + Sync {
    /// The view type for the content row at `index`. Defaults to `0`.
    fn view_type(&self, _index: usize, _item: &T) -> u32 {
        0
    }

    /// Creates a view for `view_type` inside `parent`.
    fn create_view(&self, parent: &P, view_type: u32) -> V;

    /// Binds `item` (at content `index`) to `view`.
    fn bind_view(&self, view: &mut V, item: &T, index: usize);
}

/// A view that displays a single item.
///
/// Implemented by view holders used with [`HolderBinder`].
pub trait ItemHolder<T> {
    /// Attaches `item` to this view's data slot.
    fn set_data(&mut self, item: &T);
}

/// The default content binder: creates views with a closure and binds them
/// through [`ItemHolder::set_data`].
///
/// # Example
///
/// ```
/// use segmented_list::model::{HolderBinder, ItemHolder};
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
/// let binder = HolderBinder::new(|_parent: &(), _view_type: u32| Row::default());
/// ```
pub struct HolderBinder<F> {
    create: F,
}

impl<F> HolderBinder<F> {
    /// Creates a binder from a view construction closure.
    pub fn new(create: F) -> Self {
        Self { create }
    }
}

impl<T, V, P, F> ContentBinder<T, V, P> for HolderBinder<F>
where
    V: ItemHolder<T>,
    F: Fn(&P, u32) -> V + Send + Sync,
{
    fn create_view(&self, parent: &P, view_type: u32) -> V {
        (self.create)(parent, view_type)
    }

    fn bind_view(&self, view: &mut V, item: &T, _index: usize) {
        view.set_data(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Label {
        text: String,
        created_for: u32,
    }

    impl ItemHolder<&'static str> for Label {
        fn set_data(&mut self, item: &&'static str) {
            self.text = item.to_string();
        }
    }

    #[test]
    fn test_holder_binder_sets_data() {
        let binder = HolderBinder::new(|_: &(), view_type| Label {
            created_for: view_type,
            ..Default::default()
        });

        let mut view = ContentBinder::<&'static str, Label, ()>::create_view(&binder, &(), 7);
        assert_eq!(view.created_for, 7);

        ContentBinder::<&'static str, Label, ()>::bind_view(&binder, &mut view, &"apple", 0);
        assert_eq!(view.text, "apple");
        assert_eq!(
            ContentBinder::<&'static str, Label, ()>::view_type(&binder, 0, &"apple"),
            0
        );
    }
}
