//! Filtering traits.

/// Immutable, pure filter (2 successive equal inputs -> 2 equal outputs).
///
/// Returns `true` for items to keep. Any `Fn(&T) -> bool` is a filter.
pub trait Filter<T: ?Sized> {
    fn detect(&self, item: &T) -> bool;
}

impl<T: ?Sized, F> Filter<T> for F
where
    F: Fn(&T) -> bool,
{
    fn detect(&self, item: &T) -> bool {
        self(item)
    }
}
