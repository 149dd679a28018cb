//! A `Vec`-backed reference model and replayable operations.

use weft_core::{Deque, Generation, SeqError, Sequence};

/// Result of replaying one operation: the element it produced, if any.
pub type Outcome<T> = Result<Option<T>, SeqError>;

/// Trusted sequence model.
///
/// Implements [`Sequence`] and [`Deque`] with the same error contract as
/// the real containers, using nothing but `Vec` operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceModel<T> {
    items: Vec<T>,
    generation: Generation,
}

impl<T> ReferenceModel<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            generation: Generation::ZERO,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> From<Vec<T>> for ReferenceModel<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            generation: Generation::ZERO,
        }
    }
}

impl<T> Sequence<T> for ReferenceModel<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn generation(&self) -> Generation {
        self.generation
    }

    fn get(&self, index: usize) -> Result<&T, SeqError> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(SeqError::IndexOutOfBounds { index, len })
    }

    fn set(&mut self, index: usize, value: T) -> Result<T, SeqError> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(SeqError::IndexOutOfBounds { index, len }),
        }
    }

    fn insert(&mut self, index: usize, value: T) -> Result<(), SeqError> {
        let len = self.items.len();
        if index > len {
            return Err(SeqError::PositionOutOfBounds { index, len });
        }
        self.items.insert(index, value);
        self.generation.advance();
        Ok(())
    }

    fn remove(&mut self, index: usize) -> Result<T, SeqError> {
        let len = self.items.len();
        if index >= len {
            return Err(SeqError::IndexOutOfBounds { index, len });
        }
        self.generation.advance();
        Ok(self.items.remove(index))
    }

    fn push(&mut self, value: T) -> Result<(), SeqError> {
        self.items.push(value);
        self.generation.advance();
        Ok(())
    }

    fn clear(&mut self) {
        self.items.clear();
        self.generation.advance();
    }

    fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.items.iter().position(|item| item == value)
    }
}

impl<T> Deque<T> for ReferenceModel<T> {
    fn push_front(&mut self, value: T) {
        self.items.insert(0, value);
        self.generation.advance();
    }

    fn push_back(&mut self, value: T) {
        self.items.push(value);
        self.generation.advance();
    }

    fn front(&self) -> Result<&T, SeqError> {
        self.items.first().ok_or(SeqError::NoSuchElement)
    }

    fn back(&self) -> Result<&T, SeqError> {
        self.items.last().ok_or(SeqError::NoSuchElement)
    }

    fn peek_front(&self) -> Option<&T> {
        self.items.first()
    }

    fn peek_back(&self) -> Option<&T> {
        self.items.last()
    }

    fn remove_front(&mut self) -> Result<T, SeqError> {
        self.pop_front().ok_or(SeqError::NoSuchElement)
    }

    fn remove_back(&mut self) -> Result<T, SeqError> {
        self.pop_back().ok_or(SeqError::NoSuchElement)
    }

    fn pop_front(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        self.generation.advance();
        Some(self.items.remove(0))
    }

    fn pop_back(&mut self) -> Option<T> {
        let value = self.items.pop()?;
        self.generation.advance();
        Some(value)
    }
}

/// An index-based operation replayable against any [`Sequence`].
///
/// Indices are raw: they may be out of range, in which case the
/// container under test must fail exactly as the model does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeqOp<T> {
    Push(T),
    Insert(usize, T),
    Remove(usize),
    Set(usize, T),
    Get(usize),
    Clear,
}

impl<T: Clone> SeqOp<T> {
    pub fn apply<S: Sequence<T> + ?Sized>(&self, seq: &mut S) -> Outcome<T> {
        match self {
            Self::Push(value) => seq.push(value.clone()).map(|()| None),
            Self::Insert(index, value) => seq.insert(*index, value.clone()).map(|()| None),
            Self::Remove(index) => seq.remove(*index).map(Some),
            Self::Set(index, value) => seq.set(*index, value.clone()).map(Some),
            Self::Get(index) => seq.get(*index).map(|v| Some(v.clone())),
            Self::Clear => {
                seq.clear();
                Ok(None)
            }
        }
    }

    /// Whether a successful replay changes the element count.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Push(_) | Self::Insert(..) | Self::Remove(_) | Self::Clear
        )
    }
}

/// An end operation replayable against any [`Deque`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DequeOp<T> {
    PushFront(T),
    PushBack(T),
    PopFront,
    PopBack,
    RemoveFront,
    RemoveBack,
    Front,
    Back,
}

impl<T: Clone> DequeOp<T> {
    pub fn apply<D: Deque<T> + ?Sized>(&self, deque: &mut D) -> Outcome<T> {
        match self {
            Self::PushFront(value) => {
                deque.push_front(value.clone());
                Ok(None)
            }
            Self::PushBack(value) => {
                deque.push_back(value.clone());
                Ok(None)
            }
            Self::PopFront => Ok(deque.pop_front()),
            Self::PopBack => Ok(deque.pop_back()),
            Self::RemoveFront => deque.remove_front().map(Some),
            Self::RemoveBack => deque.remove_back().map(Some),
            Self::Front => deque.front().map(|v| Some(v.clone())),
            Self::Back => deque.back().map(|v| Some(v.clone())),
        }
    }
}
