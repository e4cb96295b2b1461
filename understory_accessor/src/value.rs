// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-erased values crossing a member boundary.
//!
//! Members registered in a [`MemberTable`](crate::MemberTable) have different
//! Rust types, so values going into setters and coming out of getters travel
//! as an [`ErasedValue`] and are recovered by downcasting.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

/// A value of some `'static` type, with its type information kept for
/// downcasting.
///
/// # Example
///
/// ```rust
/// use understory_accessor::ErasedValue;
///
/// let value = ErasedValue::new(42_i32);
/// assert!(value.is::<i32>());
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
///
/// let value = value.downcast::<f64>().unwrap_err();
/// assert_eq!(value.downcast::<i32>().ok(), Some(42));
/// ```
pub struct ErasedValue {
    inner: Box<dyn Any>,
    type_name: &'static str,
}

impl ErasedValue {
    /// Creates a new erased value from a concrete value.
    #[must_use]
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the contained value.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    /// Returns the name of the contained value's type.
    #[must_use]
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the contained value is of type `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Attempts to downcast to a reference of type `T`.
    ///
    /// Returns `None` if the contained value is not of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Attempts to take the contained value out as a `T`.
    ///
    /// On a type mismatch the erased value is handed back unchanged.
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.inner
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|inner| Self { inner, type_name })
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
