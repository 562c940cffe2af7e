use std::ops::Deref;

/// A `Vec` holding at least one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyVec<T: Clone>(Vec<T>);

impl<T: Clone> NonEmptyVec<T> {
    pub fn maybe_new(v: Vec<T>) -> Option<Self> {
        (!v.is_empty()).then_some(Self(v))
    }
}

impl<T: Clone> Deref for NonEmptyVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}
