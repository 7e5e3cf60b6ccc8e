use std::fmt::Debug;

pub fn mk_string<I: IntoIterator<Item=String>>(items: I, separator: &str) -> String {
    items.into_iter().collect::<Vec<_>>().join(separator)
}

pub trait SliceExt<A> {
    fn unwrap_single(&self) -> &A;
}

impl<A: Debug> SliceExt<A> for [A] {
    fn unwrap_single(&self) -> &A {
        assert_eq!(self.len(), 1, "Expected slice with single element, got {:?}", self);
        self.first().unwrap()
    }
}
