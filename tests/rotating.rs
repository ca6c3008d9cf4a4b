// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

#![cfg(feature = "std")]

use std::fs;
use std::io;
use proptest::prelude::*;
use tempdir::TempDir;
use typed_sources::{BufferSource, Error, FileTokenSource, GeneratorSource, NullSource, Result, RotatingMultiSource, Source};

fn init() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// A source which claims data it doesn't have, failing with a configured error.
#[derive(Clone)]
struct Liar {
	error: fn() -> Error,
	resets: bool,
}

impl Source<i32> for Liar {
	fn extract(&mut self) -> Result<i32> {
		Err((self.error)())
	}

	fn has_next(&self) -> bool { true }

	fn reset(&mut self) -> bool { self.resets }

	fn clone_source(&self) -> Result<Box<dyn Source<i32>>> {
		Ok(Box::new(self.clone()))
	}
}

fn exhausted_liar() -> Liar {
	Liar { error: || Error::Exhausted, resets: true }
}

fn broken_liar() -> Liar {
	Liar { error: || io::Error::new(io::ErrorKind::Other, "disk on fire").into(), resets: true }
}

#[test]
fn mixed_sources() -> Result {
	init();
	let dir = TempDir::new("rotating").unwrap();
	let path = dir.path().join("test_data.txt");
	fs::write(&path, "100 200 300\n").unwrap();

	let buffer = BufferSource::from(vec![1, 2, 3, 4, 5]);
	let null = NullSource::<i32>::new();
	let file = FileTokenSource::<i32>::open(&path)?;
	let mut source = RotatingMultiSource::<i32>::new(&[&buffer, &null, &file])?;

	assert!(source.has_next());
	assert_eq!(source.extract_bulk(9)?, [1, 0, 100, 2, 0, 200, 3, 0, 300]);
	assert_eq!(source.extract_bulk(4)?, [4, 0, 5, 0]);
	for _ in 0..5 {
		assert_eq!(source.extract()?, 0);
	}
	assert!(source.has_next());

	assert!(source.reset());
	assert_eq!(source.cursor(), 0);
	assert_eq!(source.extract_bulk(3)?, [1, 0, 100]);

	// The composite holds clones; the inputs are untouched.
	assert_eq!(buffer.position(), 0);
	assert!(file.has_next());
	Ok(())
}

#[test]
fn empty_sources_rejected() {
	assert!(matches!(
		RotatingMultiSource::<i32>::new(&[]),
		Err(Error::InvalidArgument(_))
	));
	assert!(matches!(
		RotatingMultiSource::<i32>::from_owned(Vec::new()),
		Err(Error::InvalidArgument(_))
	));
}

#[test]
fn all_exhausted() -> Result {
	let mut source = RotatingMultiSource::from_owned(vec![
		Box::new(BufferSource::from(vec![1])) as Box<dyn Source<i32>>,
		Box::new(BufferSource::<i32>::new()),
	])?;
	assert_eq!(source.extract()?, 1);
	assert!(!source.has_next());
	assert!(matches!(source.extract(), Err(Error::AllExhausted { faulted: 0 })));
	assert!(source.extract_bulk(5)?.is_empty());
	Ok(())
}

#[test]
fn fair_rotation() -> Result {
	let a = BufferSource::from(vec![1, 2]);
	let b = BufferSource::from(vec![10, 20]);
	let c = BufferSource::from(vec![100, 200]);
	let mut source = RotatingMultiSource::<i32>::new(&[&a, &b, &c])?;

	for expected_cursor in [1, 2, 0, 1, 2] {
		source.extract()?;
		assert_eq!(source.cursor(), expected_cursor);
	}
	assert_eq!(source.extract()?, 200);
	assert!(!source.has_next());
	Ok(())
}

#[test]
fn skips_lying_child() -> Result {
	init();
	let liar = exhausted_liar();
	let buffer = BufferSource::from(vec![1, 2]);
	let mut source = RotatingMultiSource::<i32>::new(&[&liar, &buffer])?;

	assert_eq!(source.extract()?, 1);
	assert_eq!(source.extract()?, 2);
	// Only the liar is left, and it can never deliver.
	assert!(source.has_next());
	assert!(matches!(source.extract(), Err(Error::AllExhausted { faulted: 1 })));
	Ok(())
}

#[test]
fn propagates_child_failure() -> Result {
	let buffer = BufferSource::from(vec![1, 2, 3]);
	let broken = broken_liar();
	let mut source = RotatingMultiSource::<i32>::new(&[&buffer, &broken])?;

	assert_eq!(source.extract()?, 1);
	assert!(matches!(source.extract(), Err(Error::Io(_))));
	// The failed child loses its turn.
	assert_eq!(source.extract()?, 2);
	assert!(matches!(source.extract_bulk(3), Err(Error::Io(_))));
	Ok(())
}

#[test]
fn failure_moves_cursor_to_ready_child() -> Result {
	let broken = broken_liar();
	let empty = BufferSource::<i32>::new();
	let buffer = BufferSource::from(vec![1, 2]);
	let mut source = RotatingMultiSource::<i32>::new(&[&broken, &empty, &buffer])?;

	assert!(matches!(source.extract(), Err(Error::Io(_))));
	// The empty buffer is skipped, as after a successful extraction.
	assert_eq!(source.cursor(), 2);
	assert_eq!(source.extract()?, 1);
	assert_eq!(source.cursor(), 0);
	Ok(())
}

/// Yields negated call counts, failing once on the second call.
#[derive(Clone, Default)]
struct Hiccup {
	calls: i32,
}

impl Source<i32> for Hiccup {
	fn extract(&mut self) -> Result<i32> {
		self.calls += 1;
		if self.calls == 2 {
			Err(io::Error::new(io::ErrorKind::Other, "transient").into())
		} else {
			Ok(-self.calls)
		}
	}

	fn has_next(&self) -> bool { self.calls < 4 }

	fn reset(&mut self) -> bool {
		self.calls = 0;
		true
	}

	fn clone_source(&self) -> Result<Box<dyn Source<i32>>> {
		Ok(Box::new(self.clone()))
	}
}

#[test]
fn bulk_keeps_batch_before_failure() -> Result {
	init();
	let buffer = BufferSource::from(vec![1, 2, 3, 4]);
	let mut source = RotatingMultiSource::<i32>::new(&[&buffer, &Hiccup::default()])?;

	assert_eq!(source.extract_bulk(10)?, [1, -1, 2]);
	assert!(source.has_next());
	assert!(matches!(source.extract(), Err(Error::Io(_))));
	assert_eq!(source.extract_bulk(10)?, [3, -3, 4, -4]);
	assert!(!source.has_next());
	Ok(())
}

#[test]
fn reset_drops_held_failure() -> Result {
	let buffer = BufferSource::from(vec![1, 2]);
	let mut source = RotatingMultiSource::<i32>::new(&[&buffer, &Hiccup::default()])?;

	assert_eq!(source.extract_bulk(10)?, [1, -1, 2]);
	assert!(source.reset());
	assert_eq!(source.extract_bulk(3)?, [1, -1, 2]);
	Ok(())
}

#[test]
fn reset_reports_failing_child() -> Result {
	let buffer = BufferSource::from(vec![1]);
	let stuck = Liar { resets: false, ..exhausted_liar() };
	let mut source = RotatingMultiSource::<i32>::new(&[&buffer, &stuck])?;

	assert_eq!(source.extract()?, 1);
	assert!(!source.reset());
	assert_eq!(source.cursor(), 0);
	// The buffer was still rewound.
	assert_eq!(source.extract()?, 1);
	Ok(())
}

#[test]
fn clone_is_deep() -> Result {
	let inner = RotatingMultiSource::<i32>::new(&[
		&BufferSource::from(vec![1, 3]),
		&BufferSource::from(vec![2, 4]),
	])?;
	let outer_buffer = BufferSource::from(vec![100, 200]);
	let mut outer = RotatingMultiSource::<i32>::new(&[&inner, &outer_buffer])?;

	assert_eq!(outer.extract()?, 1);
	let mut copy = outer.try_clone()?;
	assert_eq!(copy.cursor(), outer.cursor());

	let from_copy = copy.extract_bulk(10)?;
	assert_eq!(from_copy, [100, 2, 200, 3, 4]);
	assert!(!copy.has_next());

	let from_outer = outer.extract_bulk(10)?;
	assert_eq!(from_outer, from_copy);

	let mut boxed = outer.clone_source()?;
	assert!(!boxed.has_next());
	assert!(boxed.reset());
	assert_eq!(boxed.extract()?, 1);
	assert!(!outer.has_next());
	Ok(())
}

#[test]
fn nested_composite() -> Result {
	let inner = RotatingMultiSource::<i32>::new(&[&BufferSource::from(vec![1])])?;
	let outer_buffer = BufferSource::from(vec![10, 20]);
	let mut outer = RotatingMultiSource::from_owned(vec![
		Box::new(inner) as Box<dyn Source<i32>>,
		Box::new(outer_buffer),
	])?;
	assert_eq!(outer.extract_bulk(5)?, [1, 10, 20]);
	Ok(())
}

#[test]
fn generator_child_shares_producer() -> Result {
	let counter = GeneratorSource::counter(0i32, 1);
	let mut source = RotatingMultiSource::<i32>::new(&[&counter, &BufferSource::from(vec![-1])])?;
	assert_eq!(source.extract_bulk(4)?, [0, -1, 1, 2]);

	let mut counter = counter;
	assert_eq!(counter.extract()?, 3);
	Ok(())
}

/// Extracts from each non-empty queue in turn, the way a caller would by hand.
fn round_robin(mut queues: Vec<Vec<i32>>) -> Vec<i32> {
	for queue in &mut queues {
		queue.reverse();
	}

	let mut merged = Vec::new();
	while queues.iter().any(|queue| !queue.is_empty()) {
		for queue in &mut queues {
			merged.extend(queue.pop());
		}
	}
	merged
}

fn buffers(data: &[Vec<i32>]) -> Vec<Box<dyn Source<i32>>> {
	data.iter()
		.map(|values| Box::new(BufferSource::from(values.clone())) as Box<dyn Source<i32>>)
		.collect()
}

proptest! {
	#[test]
	fn matches_manual_round_robin(data in prop::collection::vec(prop::collection::vec(any::<i32>(), 0..16), 1..8)) {
		let mut source = RotatingMultiSource::from_owned(buffers(&data)).unwrap();
		let total = data.iter().map(Vec::len).sum::<usize>();

		let merged = source.extract_bulk(total + 5).unwrap();
		prop_assert_eq!(merged, round_robin(data));
		prop_assert!(!source.has_next());
	}

	#[test]
	fn has_next_tracks_children(data in prop::collection::vec(prop::collection::vec(any::<i32>(), 0..4), 1..6), steps in 0usize..24) {
		let mut source = RotatingMultiSource::from_owned(buffers(&data)).unwrap();
		for _ in 0..steps {
			let remaining = source.has_next();
			prop_assert_eq!(source.extract().is_ok(), remaining);
		}
	}

	#[test]
	fn reset_replays_clone(data in prop::collection::vec(prop::collection::vec(any::<i32>(), 0..8), 1..5), skip in 0usize..16) {
		let mut source = RotatingMultiSource::from_owned(buffers(&data)).unwrap();
		source.extract_bulk(skip).unwrap();

		let mut fresh = RotatingMultiSource::from_owned(buffers(&data)).unwrap();
		let expected = fresh.extract_bulk(usize::MAX >> 1).unwrap();

		let mut snapshot = source.try_clone().unwrap();
		prop_assert!(source.reset());
		prop_assert_eq!(source.extract_bulk(usize::MAX >> 1).unwrap(), expected);

		// The snapshot kept its own position through the original's reset.
		let remaining = snapshot.extract_bulk(usize::MAX >> 1).unwrap();
		let total = data.iter().map(Vec::len).sum::<usize>();
		prop_assert_eq!(remaining.len(), total - skip.min(total));
	}
}
