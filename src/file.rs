// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

#![cfg(feature = "std")]

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Seek, SeekFrom};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use log::{debug, warn};
use simdutf8::compat::from_utf8;
use crate::{Error, Result, Source};
use crate::source::extract_bulk_holding;

/// The next token, read ahead so [`has_next`](Source::has_next) can answer
/// without touching the stream.
enum Lookahead {
	Token(Vec<u8>),
	/// A read failed. The failure stays in place until the source is reset.
	Failed(io::Error),
	End,
}

impl Lookahead {
	fn duplicate(&self) -> Self {
		match self {
			Self::Token(token) => Self::Token(token.clone()),
			Self::Failed(error) => Self::Failed(duplicate_error(error)),
			Self::End => Self::End,
		}
	}
}

fn duplicate_error(error: &io::Error) -> io::Error {
	io::Error::new(error.kind(), error.to_string())
}

/// A source parsing whitespace-delimited tokens from a text file.
///
/// Each source owns its own file handle. Clones reopen the file and continue
/// from the same position, independently of the original.
///
/// Once reading fails, every following [`extract`](Source::extract) returns the
/// IO error again until the source is [reset](Source::reset); a broken file
/// never reads as an exhausted one.
pub struct FileTokenSource<T> {
	path: PathBuf,
	reader: BufReader<File>,
	/// Byte offset in the file just past the lookahead token.
	position: u64,
	next: Lookahead,
	/// An error which interrupted a bulk extraction, returned by the next call.
	pending: Option<Error>,
	_element: PhantomData<fn() -> T>,
}

impl<T> FileTokenSource<T> {
	/// Opens a file to read tokens from.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidArgument`] if the path is empty, or [`Error::Io`]
	/// if the file couldn't be opened or read, for example if it's a directory.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		if path.as_os_str().is_empty() {
			return Err(Error::InvalidArgument("file path cannot be empty"))
		}

		let mut source = Self::open_at(path.to_path_buf(), 0)?;
		source.advance();
		match std::mem::replace(&mut source.next, Lookahead::End) {
			Lookahead::Failed(error) => return Err(error.into()),
			next => source.next = next,
		}
		debug!("opened token source on {}", path.display());
		Ok(source)
	}

	/// Returns the path of the file read from.
	pub fn path(&self) -> &Path { &self.path }

	/// Opens another handle to the same file at the same position. An error held
	/// back from an interrupted bulk extraction is not copied.
	///
	/// # Errors
	///
	/// Returns [`Error::Io`] if the file couldn't be reopened.
	pub fn try_clone(&self) -> Result<Self> {
		let mut source = Self::open_at(self.path.clone(), self.position)?;
		source.next = self.next.duplicate();
		Ok(source)
	}

	fn open_at(path: PathBuf, position: u64) -> Result<Self> {
		let mut file = File::open(&path)?;
		if position > 0 {
			file.seek(SeekFrom::Start(position))?;
		}

		Ok(Self {
			path,
			reader: BufReader::new(file),
			position,
			next: Lookahead::End,
			pending: None,
			_element: PhantomData,
		})
	}

	/// Reads the next token into the lookahead.
	fn advance(&mut self) {
		self.next = match self.read_token() {
			Ok(Some(token)) => Lookahead::Token(token),
			Ok(None) => Lookahead::End,
			Err(error) => Lookahead::Failed(error),
		};
	}

	fn read_token(&mut self) -> io::Result<Option<Vec<u8>>> {
		let mut token = Vec::new();
		loop {
			let buf = match self.reader.fill_buf() {
				Ok(buf) => buf,
				Err(err) if err.kind() == ErrorKind::Interrupted => continue,
				Err(err) => return Err(err)
			};

			if buf.is_empty() {
				break
			}

			let mut consumed = 0;
			let mut complete = false;
			for &byte in buf {
				if byte.is_ascii_whitespace() {
					if !token.is_empty() {
						complete = true;
						break
					}
				} else {
					token.push(byte);
				}
				consumed += 1;
			}

			self.reader.consume(consumed);
			self.position += consumed as u64;
			if complete {
				break
			}
		}

		Ok((!token.is_empty()).then_some(token))
	}
}

impl<T> Debug for FileTokenSource<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.debug_struct("FileTokenSource")
			.field("path", &self.path)
			.field("position", &self.position)
			.finish_non_exhaustive()
	}
}

impl<T: FromStr + 'static> Source<T> for FileTokenSource<T> {
	fn extract(&mut self) -> Result<T> {
		if let Some(error) = self.pending.take() {
			return Err(error)
		}

		let token = match std::mem::replace(&mut self.next, Lookahead::End) {
			Lookahead::Token(token) => token,
			Lookahead::Failed(error) => {
				self.next = Lookahead::Failed(duplicate_error(&error));
				return Err(error.into())
			}
			Lookahead::End => return Err(Error::Exhausted),
		};
		self.advance();

		let token = from_utf8(&token)?;
		token.parse().map_err(|_| Error::parse(token))
	}

	fn extract_bulk(&mut self, count: usize) -> Result<Vec<T>> {
		extract_bulk_holding(self, count, |source, error| source.pending = Some(error))
	}

	fn has_next(&self) -> bool {
		self.pending.is_some() || !matches!(self.next, Lookahead::End)
	}

	fn reset(&mut self) -> bool {
		self.pending = None;
		match self.reader.seek(SeekFrom::Start(0)) {
			Ok(_) => {
				self.position = 0;
				self.advance();
				debug!("rewound token source on {}", self.path.display());
				!matches!(self.next, Lookahead::Failed(_))
			}
			Err(error) => {
				warn!("could not rewind token source on {}: {error}", self.path.display());
				false
			}
		}
	}

	fn clone_source(&self) -> Result<Box<dyn Source<T>>> {
		Ok(Box::new(self.try_clone()?))
	}
}
