// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use super::Source;

/// A source which always produces data. Its [`has_next`](Source::has_next)
/// always returns `true`, and extraction never fails with exhaustion.
///
/// Bulk extraction from an infinite source always yields the requested count,
/// so a composite containing one never runs dry.
pub trait InfiniteSource<T>: Source<T> {
	/// Produces the next element.
	fn produce(&mut self) -> T;
}
