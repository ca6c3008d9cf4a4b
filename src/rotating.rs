// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter, Result as FmtResult};
use log::{debug, trace, warn};
use crate::{Error, Result, Source};
use crate::source::extract_bulk_holding;

/// A composite source merging its children into one round-robin stream.
///
/// Each extraction takes one element from the child at the rotation cursor,
/// then moves the cursor to the next child with data, skipping exhausted ones.
/// When every child has data, consecutive extractions visit the children in
/// order, one element each.
///
/// Children are exclusively owned. [`new`](Self::new) clones its inputs, and
/// cloning the composite clones every child, so no child is ever shared with a
/// caller or another composite.
///
/// A child which fails with an exhaustion error is skipped for the rest of the
/// call. Any other error is returned to the caller, since it signals a broken
/// child rather than the end of its data. If such an error interrupts a bulk
/// extraction, the elements already extracted are returned and the error is
/// returned by the next call.
pub struct RotatingMultiSource<T> {
	children: Vec<Box<dyn Source<T>>>,
	cursor: usize,
	pending: Option<Error>,
}

impl<T: 'static> RotatingMultiSource<T> {
	/// Creates a composite from clones of `sources`, in order.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidArgument`] if `sources` is empty, or any error
	/// returned while cloning a source.
	pub fn new(sources: &[&dyn Source<T>]) -> Result<Self> {
		if sources.is_empty() {
			return Err(Error::InvalidArgument("composite requires at least one source"))
		}

		let mut children = Vec::new();
		children.try_reserve_exact(sources.len())?;
		for source in sources {
			children.push(source.clone_source()?);
		}
		Ok(Self::with_children(children))
	}

	/// Creates a composite taking ownership of `sources`, in order.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidArgument`] if `sources` is empty.
	pub fn from_owned(sources: Vec<Box<dyn Source<T>>>) -> Result<Self> {
		if sources.is_empty() {
			return Err(Error::InvalidArgument("composite requires at least one source"))
		}

		Ok(Self::with_children(sources))
	}

	fn with_children(children: Vec<Box<dyn Source<T>>>) -> Self {
		debug!("created rotating source over {} children", children.len());
		Self { children, cursor: 0, pending: None }
	}

	/// Returns the number of children.
	pub fn len(&self) -> usize { self.children.len() }
	/// Always returns `false`; a composite has at least one child.
	pub fn is_empty(&self) -> bool { self.children.is_empty() }
	/// Returns the index of the child visited next.
	pub fn cursor(&self) -> usize { self.cursor }

	/// Deep-clones every child and copies the cursor. An error held back from an
	/// interrupted bulk extraction is not copied.
	///
	/// # Errors
	///
	/// Returns any error returned while cloning a child.
	pub fn try_clone(&self) -> Result<Self> {
		let mut children = Vec::new();
		children.try_reserve_exact(self.children.len())?;
		for child in &self.children {
			children.push(child.clone_source()?);
		}
		Ok(Self { children, cursor: self.cursor, pending: None })
	}

	/// Returns the first child after `index` in rotation order which has data,
	/// ending with `index` itself. If none have data, returns the index after
	/// `index`.
	fn next_ready(&self, index: usize) -> usize {
		let count = self.children.len();
		(1..=count)
			.map(|step| (index + step) % count)
			.find(|&i| self.children[i].has_next())
			.unwrap_or((index + 1) % count)
	}
}

impl<T: 'static> Source<T> for RotatingMultiSource<T> {
	fn extract(&mut self) -> Result<T> {
		if let Some(error) = self.pending.take() {
			return Err(error)
		}

		if !self.has_next() {
			return Err(Error::all_exhausted(0))
		}

		let count = self.children.len();
		let mut faulted = 0;
		for step in 0..count {
			let index = (self.cursor + step) % count;
			let child = &mut self.children[index];
			if !child.has_next() {
				continue
			}

			match child.extract() {
				Ok(element) => {
					self.cursor = self.next_ready(index);
					trace!("extracted from child {index}, next is {}", self.cursor);
					return Ok(element)
				}
				Err(error) if error.is_exhaustion() => {
					warn!("child {index} reported data, but failed to extract: {error}");
					faulted += 1;
				}
				Err(error) => {
					self.cursor = self.next_ready(index);
					return Err(error)
				}
			}
		}

		Err(Error::all_exhausted(faulted))
	}

	fn extract_bulk(&mut self, count: usize) -> Result<Vec<T>> {
		extract_bulk_holding(self, count, |source, error| source.pending = Some(error))
	}

	fn has_next(&self) -> bool {
		self.pending.is_some() || self.children.iter().any(|child| child.has_next())
	}

	fn reset(&mut self) -> bool {
		self.pending = None;
		let mut all_reset = true;
		for (index, child) in self.children.iter_mut().enumerate() {
			if !child.reset() {
				warn!("child {index} failed to reset");
				all_reset = false;
			}
		}
		self.cursor = 0;
		all_reset
	}

	fn clone_source(&self) -> Result<Box<dyn Source<T>>> {
		Ok(Box::new(self.try_clone()?))
	}
}

impl<T> Debug for RotatingMultiSource<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.debug_struct("RotatingMultiSource")
			.field("children", &self.children.len())
			.field("cursor", &self.cursor)
			.finish()
	}
}
