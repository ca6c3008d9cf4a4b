// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter, Result as FmtResult};
use core::marker::PhantomData;
use crate::{InfiniteSource, Result, Source};
use crate::source::infinite_extract_bulk;

/// An infinite source producing the [default](Default) value of `T`, for use
/// as a fallback in composites.
pub struct NullSource<T>(PhantomData<fn() -> T>);

impl<T> NullSource<T> {
	/// Creates a null source.
	pub const fn new() -> Self {
		Self(PhantomData)
	}
}

impl<T> Default for NullSource<T> {
	fn default() -> Self { Self::new() }
}

impl<T> Clone for NullSource<T> {
	fn clone(&self) -> Self { *self }
}

impl<T> Copy for NullSource<T> { }

impl<T> Debug for NullSource<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.write_str("NullSource")
	}
}

impl<T: Default + 'static> Source<T> for NullSource<T> {
	fn extract(&mut self) -> Result<T> {
		Ok(self.produce())
	}

	fn extract_bulk(&mut self, count: usize) -> Result<Vec<T>> {
		infinite_extract_bulk(self, count)
	}

	fn has_next(&self) -> bool { true }

	fn reset(&mut self) -> bool { true }

	fn clone_source(&self) -> Result<Box<dyn Source<T>>> {
		Ok(Box::new(*self))
	}
}

impl<T: Default + 'static> InfiniteSource<T> for NullSource<T> {
	fn produce(&mut self) -> T { T::default() }
}
