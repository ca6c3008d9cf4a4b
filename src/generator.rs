// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt::{Debug, Formatter, Result as FmtResult};
use num_traits::{PrimInt, WrappingAdd};
use crate::{InfiniteSource, Result, Source};
use crate::source::infinite_extract_bulk;

/// An infinite source calling a producer function for each element.
///
/// The source keeps no state of its own; any state lives in the producer's
/// captured environment. Clones **share** the producer, and with it that state:
/// extracting from a clone advances the original's producer too. To get an
/// independent generator, construct a new source from a fresh producer.
pub struct GeneratorSource<T> {
	producer: Rc<RefCell<dyn FnMut() -> T>>,
}

impl<T> GeneratorSource<T> {
	/// Creates a generator source from a producer.
	pub fn new(producer: impl FnMut() -> T + 'static) -> Self {
		Self { producer: Rc::new(RefCell::new(producer)) }
	}

	/// Returns `true` if both sources share the same producer.
	pub fn shares_producer(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.producer, &other.producer)
	}
}

impl<T: PrimInt + WrappingAdd + 'static> GeneratorSource<T> {
	/// Creates a generator counting up from `start` by `step`, wrapping on
	/// overflow. The counter lives in the producer, so clones continue the same
	/// count.
	pub fn counter(start: T, step: T) -> Self {
		let mut next = start;
		Self::new(move || {
			let value = next;
			next = next.wrapping_add(&step);
			value
		})
	}
}

impl<T> Clone for GeneratorSource<T> {
	fn clone(&self) -> Self {
		Self { producer: Rc::clone(&self.producer) }
	}
}

impl<T> Debug for GeneratorSource<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.debug_struct("GeneratorSource")
			.field("shared", &Rc::strong_count(&self.producer))
			.finish_non_exhaustive()
	}
}

impl<T: 'static> Source<T> for GeneratorSource<T> {
	fn extract(&mut self) -> Result<T> {
		Ok(self.produce())
	}

	fn extract_bulk(&mut self, count: usize) -> Result<Vec<T>> {
		infinite_extract_bulk(self, count)
	}

	fn has_next(&self) -> bool { true }

	fn reset(&mut self) -> bool { true }

	fn clone_source(&self) -> Result<Box<dyn Source<T>>> {
		Ok(Box::new(self.clone()))
	}
}

impl<T: 'static> InfiniteSource<T> for GeneratorSource<T> {
	fn produce(&mut self) -> T {
		(&mut *self.producer.borrow_mut())()
	}
}
