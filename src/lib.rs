// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! This crate provides a pull-based [`Source`] trait for extracting typed elements
//! one at a time, whatever they are backed by: an in-memory [`BufferSource`], a
//! whitespace-delimited text file read by [`FileTokenSource`], a producer function
//! in [`GeneratorSource`], or the default value from [`NullSource`]. Several
//! sources can be merged into one round-robin stream with [`RotatingMultiSource`],
//! which is itself a source and can be nested.
//!
//! ```
//! # use typed_sources::{BufferSource, NullSource, RotatingMultiSource, Source};
//! let numbers = BufferSource::from(vec![1, 2]);
//! let zeros = NullSource::<i32>::new();
//! let mut merged = RotatingMultiSource::<i32>::new(&[&numbers, &zeros])?;
//!
//! assert_eq!(merged.extract_bulk(5)?, [1, 0, 2, 0, 0]);
//! # Ok::<(), typed_sources::Error>(())
//! ```
//!
//! Implementing your own source takes the required methods of the contract:
//!
//! ```
//! # use typed_sources::{Error, Result, Source};
//! #[derive(Clone)]
//! struct Countdown(u32);
//!
//! impl Source<u32> for Countdown {
//!     fn extract(&mut self) -> Result<u32> {
//!         if self.0 == 0 {
//!             return Err(Error::Exhausted)
//!         }
//!         self.0 -= 1;
//!         Ok(self.0)
//!     }
//!
//!     fn has_next(&self) -> bool { self.0 > 0 }
//!
//!     fn reset(&mut self) -> bool { false }
//!
//!     fn clone_source(&self) -> Result<Box<dyn Source<u32>>> {
//!         Ok(Box::new(self.clone()))
//!     }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#![deny(clippy::pedantic)]
#![allow(
	clippy::module_name_repetitions,
	clippy::must_use_candidate,
)]

extern crate alloc;

mod error;
mod source;
mod buffer;
mod file;
mod generator;
mod null;
mod rotating;
mod wrappers;

pub use error::Error;
#[cfg(feature = "std")]
pub use error::Utf8Error;
pub use source::{InfiniteSource, Iter, Source};
pub use buffer::BufferSource;
#[cfg(feature = "std")]
pub use file::FileTokenSource;
pub use generator::GeneratorSource;
pub use null::NullSource;
pub use rotating::RotatingMultiSource;

pub type Result<T = (), E = Error> = core::result::Result<T, E>;
