// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use alloc::collections::TryReserveError;
use alloc::string::String;
use core::fmt::{Display, Formatter, Result as FmtResult};
#[cfg(feature = "std")]
pub use simdutf8::compat::Utf8Error;

/// A source error.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
	/// The source has no more elements. This is the expected end-of-data
	/// condition, and is recoverable with [`reset`](crate::Source::reset).
	Exhausted,
	/// No child of a composite source has more elements.
	AllExhausted {
		/// The number of children which reported available data, but failed with
		/// an exhaustion error when extracted from. A non-zero count means some
		/// child broke its [`has_next`](crate::Source::has_next) promise.
		faulted: usize
	},
	/// An IO error.
	#[cfg(feature = "std")]
	Io(std::io::Error),
	/// A token was read, but could not be parsed into the element type.
	Parse {
		/// The unparsed token.
		token: String
	},
	/// A token was read, but contained invalid UTF-8.
	#[cfg(feature = "std")]
	Utf8(Utf8Error),
	/// A source was constructed from invalid input.
	InvalidArgument(&'static str),
	/// Error while attempting to reserve capacity.
	Allocation(TryReserveError),
}

impl Error {
	/// Creates an all-exhausted error.
	#[inline]
	pub const fn all_exhausted(faulted: usize) -> Self {
		Self::AllExhausted { faulted }
	}
	/// Creates a parse error.
	#[inline]
	pub fn parse(token: impl Into<String>) -> Self {
		Self::Parse { token: token.into() }
	}
	/// Returns `true` if the error marks the end of data rather than a failure.
	#[inline]
	pub const fn is_exhaustion(&self) -> bool {
		matches!(self, Self::Exhausted | Self::AllExhausted { .. })
	}
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(error) => Some(error),
			Self::Utf8(error) => Some(error),
			Self::Allocation(error) => Some(error),
			Self::Exhausted |
			Self::AllExhausted { .. } |
			Self::Parse { .. } |
			Self::InvalidArgument(_) => None,
		}
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		match self {
			Self::Exhausted => write!(f, "source exhausted"),
			Self::AllExhausted { faulted: 0 } => write!(f, "all sources exhausted"),
			Self::AllExhausted { faulted } =>
				write!(f, "all sources exhausted, {faulted} of which failed after reporting available data"),
			#[cfg(feature = "std")]
			Self::Io(error) => Display::fmt(error, f),
			Self::Parse { token } => write!(f, "could not parse token {token:?}"),
			#[cfg(feature = "std")]
			Self::Utf8(error) => Display::fmt(error, f),
			Self::InvalidArgument(reason) => write!(f, "invalid argument: {reason}"),
			Self::Allocation(error) => Display::fmt(error, f),
		}
	}
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
	#[inline]
	fn from(value: std::io::Error) -> Self {
		Self::Io(value)
	}
}

#[cfg(feature = "std")]
impl From<Utf8Error> for Error {
	#[inline]
	fn from(value: Utf8Error) -> Self {
		Self::Utf8(value)
	}
}

impl From<TryReserveError> for Error {
	#[inline]
	fn from(value: TryReserveError) -> Self {
		Self::Allocation(value)
	}
}
