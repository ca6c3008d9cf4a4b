// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use core::iter::FusedIterator;
use core::marker::PhantomData;
use crate::Result;
use super::Source;

/// An iterator over the elements of a [`Source`], created by [`Source::iter`].
///
/// Iteration ends when the source reports no more data, or after the first
/// error is yielded. Iterating an infinite source never ends on its own.
pub struct Iter<'a, T, S: ?Sized> {
	source: &'a mut S,
	failed: bool,
	_element: PhantomData<fn() -> T>,
}

impl<'a, T, S: Source<T> + ?Sized> Iter<'a, T, S> {
	pub(crate) fn new(source: &'a mut S) -> Self {
		Self { source, failed: false, _element: PhantomData }
	}
}

impl<T, S: Source<T> + ?Sized> Iterator for Iter<'_, T, S> {
	type Item = Result<T>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed || !self.source.has_next() {
			return None
		}

		let result = self.source.extract();
		self.failed = result.is_err();
		Some(result)
	}
}

impl<T, S: Source<T> + ?Sized> FusedIterator for Iter<'_, T, S> { }
