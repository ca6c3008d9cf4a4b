// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

mod iter;
mod markers;

use alloc::boxed::Box;
use alloc::vec::Vec;
use crate::{Error, Result};

pub use iter::Iter;
pub use markers::InfiniteSource;

/// A pull-based source of `T` elements.
///
/// Every source is independently owned: two sources never share a cursor or
/// stream position, and [`clone_source`](Self::clone_source) always produces a
/// deep copy.
pub trait Source<T> {
	/// Extracts one element, returning [`Error::Exhausted`](crate::Error::Exhausted)
	/// if none remain.
	fn extract(&mut self) -> Result<T>;
	/// Extracts at most `count` elements, stopping early if the source runs out
	/// of data. Returning fewer than `count` elements is not an error.
	///
	/// The provided implementation propagates errors other than exhaustion,
	/// discarding any partial batch. The file and rotating sources instead return
	/// the partial batch and hold the error back for the next call.
	fn extract_bulk(&mut self, count: usize) -> Result<Vec<T>> {
		default_extract_bulk(self, count)
	}
	/// Returns `true` if a following [`extract`](Self::extract) is expected to
	/// succeed. This never changes the state of the source.
	fn has_next(&self) -> bool;
	/// Rewinds the source to its initial readable state where supported,
	/// returning whether the source is now in that state.
	fn reset(&mut self) -> bool;
	/// Returns a deep, independently owned copy of the source. Extracting from the
	/// copy never affects the original, and vice versa.
	fn clone_source(&self) -> Result<Box<dyn Source<T>>>;

	/// Extracts one element into `element`, returning the source for chaining.
	fn extract_into(&mut self, element: &mut T) -> Result<&mut Self> where Self: Sized {
		*element = self.extract()?;
		Ok(self)
	}
	/// Returns an iterator extracting elements until [`has_next`] returns `false`.
	///
	/// [`has_next`]: Self::has_next
	fn iter(&mut self) -> Iter<'_, T, Self> where Self: Sized {
		Iter::new(self)
	}
}

pub(crate) fn default_extract_bulk<T>(source: &mut (impl Source<T> + ?Sized), count: usize) -> Result<Vec<T>> {
	let mut batch = Vec::new();
	while batch.len() < count && source.has_next() {
		match source.extract() {
			Ok(element) => {
				batch.try_reserve(1)?;
				batch.push(element);
			}
			Err(error) if error.is_exhaustion() => break,
			Err(error) => return Err(error)
		}
	}
	Ok(batch)
}

/// Extracts at most `count` elements like [`default_extract_bulk`], but if an
/// error interrupts a non-empty batch, the batch is returned and the error is
/// passed to `hold` to be returned by the next call.
pub(crate) fn extract_bulk_holding<T, S: Source<T> + ?Sized>(
	source: &mut S,
	count: usize,
	hold: impl FnOnce(&mut S, Error)
) -> Result<Vec<T>> {
	let mut batch = Vec::new();
	while batch.len() < count && source.has_next() {
		match source.extract() {
			Ok(element) => {
				batch.try_reserve(1)?;
				batch.push(element);
			}
			Err(error) if error.is_exhaustion() => break,
			Err(error) if batch.is_empty() => return Err(error),
			Err(error) => {
				hold(source, error);
				break
			}
		}
	}
	Ok(batch)
}

/// Extracts exactly `count` elements from an infinite source, failing only if
/// the batch can't be allocated.
pub(crate) fn infinite_extract_bulk<T>(source: &mut (impl InfiniteSource<T> + ?Sized), count: usize) -> Result<Vec<T>> {
	let mut batch = Vec::new();
	batch.try_reserve_exact(count)?;
	batch.extend((0..count).map(|_| source.produce()));
	Ok(batch)
}
