/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;

use std::ops::Index;
use std::ops::IndexMut;

pub use error::NoMemory;

const INITIAL_CAPACITY: usize = 1;

/// An append-only list with doubling capacity.
///
/// Nodes keep their attributes and child handles in this list. Storage
/// starts with room for a single item and doubles whenever it is full,
/// so appends are amortized constant time. Items are never removed.
///
/// Since every append may move the backing storage, references into
/// the list cannot be held across a [push()](GrowList::push). Child
/// lists store [NodeId](crate::NodeId) handles instead of the nodes,
/// so growing them never moves a node.
///
/// Indexing with `list[i]` panics when `i` is out of range, it is the
/// caller's job to check [len()](GrowList::len) first. Use
/// [get()](GrowList::get) for the checked variant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrowList<T> {
    items: Vec<T>,
}

impl<T> GrowList<T> {
    pub fn new() -> GrowList<T> {
        GrowList {
            items: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Appends an item to the end of the list.
    ///
    /// Returns [NoMemory] if the storage could not be doubled, the list
    /// is left unchanged in that case.
    pub fn push(&mut self, item: T) -> Result<(), NoMemory> {
        if self.items.len() >= self.items.capacity() {
            let grow = std::cmp::max(self.items.capacity(), INITIAL_CAPACITY);
            self.items.try_reserve_exact(grow)?;
        }
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> Default for GrowList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for GrowList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for GrowList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a GrowList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowList<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}
