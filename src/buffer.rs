// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ops::{Add, AddAssign};
use log::debug;
use crate::{Error, Result, Source};

/// A source reading from a growable in-memory buffer.
///
/// Extraction advances a cursor over the buffer without removing elements, so
/// [`reset`](Source::reset) replays everything from the start, including any
/// elements appended since construction.
#[derive(Debug)]
pub struct BufferSource<T> {
	data: Vec<T>,
	cursor: usize,
}

impl<T> BufferSource<T> {
	/// The factor by which capacity grows when appending to a full buffer.
	pub const GROWTH_FACTOR: usize = 2;
	/// The capacity allocated on the first append to an empty buffer.
	pub const MIN_CAPACITY: usize = 4;

	/// Creates an empty buffer source.
	pub const fn new() -> Self {
		Self { data: Vec::new(), cursor: 0 }
	}

	/// Returns the number of elements in the buffer, extracted or not.
	pub fn len(&self) -> usize { self.data.len() }
	/// Returns `true` if the buffer holds no elements.
	pub fn is_empty(&self) -> bool { self.data.is_empty() }
	/// Returns the buffer capacity.
	pub fn capacity(&self) -> usize { self.data.capacity() }
	/// Returns the cursor position, the number of elements extracted since
	/// construction or the last reset.
	pub fn position(&self) -> usize { self.cursor }
	/// Returns the number of elements left to extract.
	pub fn remaining(&self) -> usize { self.data.len() - self.cursor }
	/// Returns the whole buffer, including already extracted elements.
	pub fn as_slice(&self) -> &[T] { &self.data }

	/// Appends an element, growing the buffer by [`GROWTH_FACTOR`] if it's full.
	///
	/// # Errors
	///
	/// Returns [`Error::Allocation`] if the buffer could not grow.
	///
	/// [`GROWTH_FACTOR`]: Self::GROWTH_FACTOR
	pub fn push(&mut self, element: T) -> Result {
		self.grow_for(1)?;
		self.data.push(element);
		Ok(())
	}

	/// Reserves room for `additional` more elements, multiplying the capacity
	/// until they fit.
	fn grow_for(&mut self, additional: usize) -> Result {
		let len = self.data.len();
		let required = len.checked_add(additional).ok_or(Error::InvalidArgument("buffer length overflow"))?;
		let mut capacity = self.data.capacity();
		if required <= capacity {
			return Ok(())
		}

		capacity = capacity.max(Self::MIN_CAPACITY);
		while capacity < required {
			capacity = capacity.saturating_mul(Self::GROWTH_FACTOR);
		}
		self.data.try_reserve_exact(capacity - len)?;
		Ok(())
	}
}

impl<T: Clone> BufferSource<T> {
	/// Creates a buffer source from a copy of `elements`.
	///
	/// # Errors
	///
	/// Returns [`Error::Allocation`] if the buffer could not be allocated.
	pub fn from_slice(elements: &[T]) -> Result<Self> {
		let mut data = Vec::new();
		data.try_reserve_exact(elements.len())?;
		data.extend_from_slice(elements);
		debug!("created buffer source with {} elements", data.len());
		Ok(Self { data, cursor: 0 })
	}

	/// Appends all elements of a slice.
	///
	/// # Errors
	///
	/// Returns [`Error::Allocation`] if the buffer could not grow.
	pub fn extend_from_slice(&mut self, elements: &[T]) -> Result {
		self.grow_for(elements.len())?;
		self.data.extend_from_slice(elements);
		Ok(())
	}

	/// Returns a copy of this source with `element` appended.
	///
	/// # Errors
	///
	/// Returns [`Error::Allocation`] if the copy could not be allocated.
	pub fn with(&self, element: T) -> Result<Self> {
		let mut copy = self.try_clone()?;
		copy.push(element)?;
		Ok(copy)
	}

	/// Copies the buffer contents and cursor position. The copy's capacity only
	/// fits its contents.
	///
	/// # Errors
	///
	/// Returns [`Error::Allocation`] if the copy could not be allocated.
	pub fn try_clone(&self) -> Result<Self> {
		let mut data = Vec::new();
		data.try_reserve_exact(self.data.len())?;
		data.extend_from_slice(&self.data);
		Ok(Self { data, cursor: self.cursor })
	}
}

impl<T> Default for BufferSource<T> {
	fn default() -> Self { Self::new() }
}

impl<T: Clone> Clone for BufferSource<T> {
	fn clone(&self) -> Self {
		Self {
			data: self.data.as_slice().to_vec(),
			cursor: self.cursor,
		}
	}
}

impl<T> From<Vec<T>> for BufferSource<T> {
	fn from(data: Vec<T>) -> Self {
		Self { data, cursor: 0 }
	}
}

impl<T> FromIterator<T> for BufferSource<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Vec::from_iter(iter).into()
	}
}

impl<T: Clone + 'static> Source<T> for BufferSource<T> {
	fn extract(&mut self) -> Result<T> {
		let element = self.data.get(self.cursor).ok_or(Error::Exhausted)?.clone();
		self.cursor += 1;
		Ok(element)
	}

	fn extract_bulk(&mut self, mut count: usize) -> Result<Vec<T>> {
		count = count.min(self.remaining());
		let start = self.cursor;
		let mut batch = Vec::new();
		batch.try_reserve_exact(count)?;
		batch.extend_from_slice(&self.data[start..start + count]);
		self.cursor += count;
		Ok(batch)
	}

	fn has_next(&self) -> bool {
		self.cursor < self.data.len()
	}

	fn reset(&mut self) -> bool {
		self.cursor = 0;
		true
	}

	fn clone_source(&self) -> Result<Box<dyn Source<T>>> {
		Ok(Box::new(self.try_clone()?))
	}
}

impl<T> AddAssign<T> for BufferSource<T> {
	/// Appends an element.
	///
	/// # Panics
	///
	/// Panics if the buffer could not grow. Use [`push`](Self::push) to handle
	/// allocation failure.
	fn add_assign(&mut self, element: T) {
		if let Err(error) = self.push(element) {
			panic!("could not append to buffer source: {error}")
		}
	}
}

impl<T> Add<T> for BufferSource<T> {
	type Output = Self;

	fn add(mut self, element: T) -> Self {
		self += element;
		self
	}
}
