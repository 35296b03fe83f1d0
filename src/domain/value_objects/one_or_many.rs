//! OneOrMany value object
//!
//! Descriptor documents store a repeated element as a bare entry when it
//! occurs once and as a list otherwise. `OneOrMany` accepts both shapes and
//! always hands out a slice.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Uniform view: a solitary entry is a one-element slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item),
            OneOrMany::Many(items) => items,
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Collapse back to the compact shape used on the wire.
    pub fn from_vec(mut items: Vec<T>) -> Option<Self> {
        match items.len() {
            0 => None,
            1 => items.pop().map(OneOrMany::One),
            _ => Some(OneOrMany::Many(items)),
        }
    }

    pub fn push(&mut self, item: T)
    where
        T: Clone,
    {
        match self {
            OneOrMany::Many(items) => items.push(item),
            OneOrMany::One(existing) => {
                *self = OneOrMany::Many(vec![existing.clone(), item]);
            }
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(item: T) -> Self {
        OneOrMany::One(item)
    }
}
