//! Borrowing iterators over the direct children of a [`Json`] value.
//!
//! Arrays yield their elements in index order, objects yield their values in
//! key order, scalars yield nothing. [`Iter`] and [`IterMut`] can also report
//! the key of the object entry they are about to yield. Two [`Iter`]s compare
//! equal when they walk the same container and sit at the same position, so an
//! exhausted iterator equals [`Json::end`] of its container.

use crate::value::Json;
use std::collections::btree_map;
use std::iter::{FusedIterator, Peekable};
use std::ptr;
use std::slice;

#[derive(Debug, Clone, Default)]
enum Children<'a> {
    Array(slice::Iter<'a, Json>),
    Object(btree_map::Iter<'a, String, Json>),
    #[default]
    Empty,
}

/// Shared iterator over the children of a value, created by [`Json::iter`].
#[derive(Debug, Clone, Default)]
pub struct Iter<'a> {
    parent: Option<&'a Json>,
    children: Children<'a>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(parent: &'a Json) -> Self {
        let children = match parent {
            Json::Array(items) => Children::Array(items.iter()),
            Json::Object(map) => Children::Object(map.iter()),
            _ => Children::Empty,
        };
        Iter {
            parent: Some(parent),
            children,
        }
    }

    pub(crate) fn end(parent: &'a Json) -> Self {
        Iter {
            parent: Some(parent),
            children: Children::Empty,
        }
    }

    /// Key of the object entry the next call to `next()` yields.
    /// `None` for arrays, scalars and exhausted iterators.
    pub fn key(&self) -> Option<&'a str> {
        match &self.children {
            Children::Object(entries) => entries.clone().next().map(|(key, _)| key.as_str()),
            _ => None,
        }
    }

    /// The child the next call to `next()` yields, without advancing.
    pub fn peek(&self) -> Option<&'a Json> {
        self.clone().next()
    }

    /// True once every child has been yielded.
    pub fn is_end(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Json;

    fn next(&mut self) -> Option<&'a Json> {
        match &mut self.children {
            Children::Array(items) => items.next(),
            Children::Object(entries) => entries.next().map(|(_, value)| value),
            Children::Empty => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match &self.children {
            Children::Array(items) => items.len(),
            Children::Object(entries) => entries.len(),
            Children::Empty => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Same container, same position. Default-constructed iterators are equal to
/// each other and to nothing else.
impl PartialEq for Iter<'_> {
    fn eq(&self, other: &Self) -> bool {
        let same_parent = match (self.parent, other.parent) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_parent && self.len() == other.len()
    }
}

#[derive(Debug, Default)]
enum ChildrenMut<'a> {
    Array(slice::IterMut<'a, Json>),
    Object(Peekable<btree_map::IterMut<'a, String, Json>>),
    #[default]
    Empty,
}

/// Mutable iterator over the children of a value, created by [`Json::iter_mut`].
#[derive(Debug, Default)]
pub struct IterMut<'a> {
    children: ChildrenMut<'a>,
}

impl<'a> IterMut<'a> {
    pub(crate) fn new(parent: &'a mut Json) -> Self {
        let children = match parent {
            Json::Array(items) => ChildrenMut::Array(items.iter_mut()),
            Json::Object(map) => ChildrenMut::Object(map.iter_mut().peekable()),
            _ => ChildrenMut::Empty,
        };
        IterMut { children }
    }

    /// Key of the object entry the next call to `next()` yields.
    /// `None` for arrays, scalars and exhausted iterators.
    pub fn key(&mut self) -> Option<&str> {
        match &mut self.children {
            ChildrenMut::Object(entries) => entries.peek().map(|(key, _)| key.as_str()),
            _ => None,
        }
    }
}

impl<'a> Iterator for IterMut<'a> {
    type Item = &'a mut Json;

    fn next(&mut self) -> Option<&'a mut Json> {
        match &mut self.children {
            ChildrenMut::Array(items) => items.next(),
            ChildrenMut::Object(entries) => entries.next().map(|(_, value)| value),
            ChildrenMut::Empty => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match &self.children {
            ChildrenMut::Array(items) => items.len(),
            ChildrenMut::Object(entries) => entries.len(),
            ChildrenMut::Empty => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IterMut<'_> {}

impl FusedIterator for IterMut<'_> {}

impl<'a> IntoIterator for &'a Json {
    type Item = &'a Json;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Json {
    type Item = &'a mut Json;
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> IterMut<'a> {
        self.iter_mut()
    }
}
