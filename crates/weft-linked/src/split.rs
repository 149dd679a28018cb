//! Batching split cursor over a [`LinkedSequence`].
//!
//! A chain cannot be cut in half without walking to the middle, so a
//! split copies references to the next batch of elements into a buffer
//! and hands that out as a [`BatchCursor`], which does bisect. Batches
//! grow by [`BatchPolicy::unit`] on every split.

use tracing::debug;
use weft_core::{ContainerId, Generation, SeqError};

use crate::config::BatchPolicy;
use crate::list::LinkedSequence;

/// A late-binding split cursor over a linked sequence.
///
/// Like the array split cursor it binds its size estimate and the
/// generation on first use. Every operation validates the generation
/// before following any link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkedSplitCursor {
    owner: ContainerId,
    current: Option<usize>,
    est: Option<usize>,
    expected: Generation,
    batch: usize,
    policy: BatchPolicy,
}

impl LinkedSplitCursor {
    pub(crate) fn new(owner: ContainerId, policy: BatchPolicy) -> Self {
        Self {
            owner,
            current: None,
            est: None,
            expected: Generation::ZERO,
            batch: 0,
            policy,
        }
    }

    /// The batch policy in effect.
    pub fn policy(&self) -> &BatchPolicy {
        &self.policy
    }

    fn bind<T>(&mut self, list: &LinkedSequence<T>) -> Result<usize, SeqError> {
        if self.owner != list.id() {
            return Err(SeqError::ForeignContainer {
                expected: self.owner,
                found: list.id(),
            });
        }
        match self.est {
            Some(est) => Ok(est),
            None => {
                let est = list.len();
                self.est = Some(est);
                self.expected = list.generation();
                self.current = list.head_slot();
                Ok(est)
            }
        }
    }

    /// Number of elements left to visit. Binds the cursor.
    pub fn estimate_size<T>(&mut self, list: &LinkedSequence<T>) -> Result<usize, SeqError> {
        self.bind(list)
    }

    /// Copy the next batch into a [`BatchCursor`].
    ///
    /// Returns `Ok(None)` when at most one element remains.
    pub fn try_split<'a, T>(
        &mut self,
        list: &'a LinkedSequence<T>,
    ) -> Result<Option<BatchCursor<'a, T>>, SeqError> {
        let remaining = self.bind(list)?;
        list.verify(self.owner, self.expected)?;
        if remaining <= 1 {
            return Ok(None);
        }
        let Some(start) = self.current else {
            return Ok(None);
        };
        let n = self.policy.next_batch(self.batch, remaining);
        let mut items = Vec::with_capacity(n);
        let mut cursor = Some(start);
        while let Some(node) = cursor {
            if items.len() >= n {
                break;
            }
            items.push(list.slot_value(node)?);
            cursor = list.next_slot(node);
        }
        self.current = cursor;
        self.batch = items.len();
        self.est = Some(remaining - items.len());
        debug!(batch = items.len(), remaining = remaining - items.len(), "linked split batch");
        Ok(Some(BatchCursor::new(items)))
    }

    /// Visit the next element, if any. Returns whether one was visited.
    pub fn try_advance<'a, T, F>(
        &mut self,
        list: &'a LinkedSequence<T>,
        visit: F,
    ) -> Result<bool, SeqError>
    where
        F: FnOnce(&'a T),
    {
        let remaining = self.bind(list)?;
        list.verify(self.owner, self.expected)?;
        let Some(node) = self.current else {
            return Ok(false);
        };
        if remaining == 0 {
            return Ok(false);
        }
        self.est = Some(remaining - 1);
        self.current = list.next_slot(node);
        visit(list.slot_value(node)?);
        list.verify(self.owner, self.expected)?;
        Ok(true)
    }

    /// Visit every remaining element.
    pub fn for_each_remaining<'a, T, F>(
        &mut self,
        list: &'a LinkedSequence<T>,
        mut visit: F,
    ) -> Result<(), SeqError>
    where
        F: FnMut(&'a T),
    {
        let mut remaining = self.bind(list)?;
        list.verify(self.owner, self.expected)?;
        let mut cursor = self.current.take();
        self.est = Some(0);
        while let Some(node) = cursor {
            if remaining == 0 {
                break;
            }
            visit(list.slot_value(node)?);
            remaining -= 1;
            cursor = list.next_slot(node);
        }
        list.verify(self.owner, self.expected)
    }
}

/// A bisectable batch of element references produced by
/// [`LinkedSplitCursor::try_split`].
#[derive(Debug)]
pub struct BatchCursor<'a, T> {
    items: Vec<&'a T>,
    index: usize,
}

impl<T> Clone for BatchCursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            index: self.index,
        }
    }
}

impl<'a, T> BatchCursor<'a, T> {
    fn new(items: Vec<&'a T>) -> Self {
        Self { items, index: 0 }
    }

    /// Number of elements left in the batch.
    pub fn estimate_size(&self) -> usize {
        self.items.len() - self.index
    }

    /// Split off the lower half of what is left.
    pub fn try_split(&mut self) -> Option<Self> {
        let lo = self.index;
        let mid = lo + (self.items.len() - lo) / 2;
        if lo >= mid {
            return None;
        }
        self.index = mid;
        Some(Self::new(self.items[lo..mid].to_vec()))
    }

    /// Visit the next element, if any.
    pub fn try_advance<F: FnOnce(&'a T)>(&mut self, visit: F) -> bool {
        match self.next() {
            Some(item) => {
                visit(item);
                true
            }
            None => false,
        }
    }

    /// Visit every remaining element.
    pub fn for_each_remaining<F: FnMut(&'a T)>(&mut self, visit: F) {
        self.by_ref().for_each(visit);
    }
}

impl<'a, T> Iterator for BatchCursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let item = self.items.get(self.index).copied()?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.estimate_size();
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for BatchCursor<'_, T> {}
