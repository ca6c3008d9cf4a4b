// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use alloc::boxed::Box;
use alloc::vec::Vec;
use crate::{Result, Source};

macro_rules! delegate_impl {
    (with $reduced:expr;
	$(
	fn $name:ident($($params:tt)+)$( -> $ret:ty)?;
	)+) => {
		$(fn $name($($params)+)$( -> $ret)? {
			delegate_impl!(@$reduced;$name($($params)+))
		})+
	};
	(@$reduced:expr;$name:ident(&$(mut)? self$(, $param:ident: $param_ty:ty)*)) => {
		$reduced.$name($($param),*)
	};
}

macro_rules! impl_source {
    ($(impl<$gen:ident> for $ty:ty;)+) => {
		$(
		impl<T, $gen: Source<T> + ?Sized> Source<T> for $ty {
			delegate_impl! {
				with (**self);
				fn extract(&mut self) -> Result<T>;
				fn extract_bulk(&mut self, count: usize) -> Result<Vec<T>>;
				fn has_next(&self) -> bool;
				fn reset(&mut self) -> bool;
				fn clone_source(&self) -> Result<Box<dyn Source<T>>>;
			}
		}
		)+
	};
}

impl_source! {
	impl<S> for &mut S;
	impl<S> for Box<S>;
}
