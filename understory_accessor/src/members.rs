// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-type member tables.
//!
//! This module provides [`MemberTable`], the explicit list of members a host
//! type exposes, and the [`Getter`], [`Setter`] and [`Field`] entries it holds.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::type_name;
use core::convert::Infallible;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::MemberError;
use crate::value::ErasedValue;
use crate::value_type::ValueType;

type ReadFn<T> = Arc<dyn Fn(&T) -> Result<ErasedValue, MemberError> + Send + Sync>;
type WriteFn<T> = Arc<dyn Fn(&mut T, ErasedValue) -> Result<(), MemberError> + Send + Sync>;

/// A zero-argument method returning a value.
pub struct Getter<T> {
    name: &'static str,
    returns: ValueType,
    call: ReadFn<T>,
}

impl<T> Getter<T> {
    /// Returns the method name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the representation of the returned value.
    #[must_use]
    #[inline]
    pub fn returns(&self) -> ValueType {
        self.returns
    }

    pub(crate) fn invoke(&self, host: &T) -> Result<ErasedValue, MemberError> {
        (self.call)(host)
    }
}

/// A one-argument method taking a value.
pub struct Setter<T> {
    name: &'static str,
    param: ValueType,
    call: WriteFn<T>,
}

impl<T> Setter<T> {
    /// Returns the method name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the representation of the parameter.
    #[must_use]
    #[inline]
    pub fn param(&self) -> ValueType {
        self.param
    }

    pub(crate) fn invoke(&self, host: &mut T, value: ErasedValue) -> Result<(), MemberError> {
        (self.call)(host, value)
    }
}

/// A public field, readable and writable in place.
pub struct Field<T> {
    name: &'static str,
    ty: ValueType,
    read: Arc<dyn Fn(&T) -> ErasedValue + Send + Sync>,
    write: Arc<dyn Fn(&mut T, ErasedValue) + Send + Sync>,
}

impl<T> Field<T> {
    /// Returns the field name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the representation of the field.
    #[must_use]
    #[inline]
    pub fn ty(&self) -> ValueType {
        self.ty
    }

    pub(crate) fn read(&self, host: &T) -> ErasedValue {
        (self.read)(host)
    }

    pub(crate) fn write(&self, host: &mut T, value: ErasedValue) {
        (self.write)(host, value);
    }
}

// Manual trait implementations to avoid requiring T: Clone, etc.

impl<T> Clone for Getter<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            returns: self.returns,
            call: Arc::clone(&self.call),
        }
    }
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            param: self.param,
            call: Arc::clone(&self.call),
        }
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            ty: self.ty,
            read: Arc::clone(&self.read),
            write: Arc::clone(&self.write),
        }
    }
}

impl<T> fmt::Debug for Getter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Getter")
            .field("name", &self.name)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for Setter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setter")
            .field("name", &self.name)
            .field("param", &self.param)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

/// Recovers a value handed to a member.
///
/// Bindings only pass values whose carrier matches the member's registered
/// representation, and registration checks that representation against the
/// closure's type, so a mismatch here is a broken invariant.
fn take_value<R: 'static>(member: &str, value: ErasedValue) -> R {
    match value.downcast::<R>() {
        Ok(value) => value,
        Err(value) => panic!(
            "member {member} expects {} but was handed {}",
            type_name::<R>(),
            value.type_name()
        ),
    }
}

/// The members a host type exposes, keyed by name.
///
/// Zero-argument methods and fields have unique names. One-argument methods
/// may be overloaded on their parameter representation.
///
/// # Example
///
/// ```rust
/// use understory_accessor::{MemberTable, ValueType};
///
/// struct Counter {
///     count: i32,
/// }
///
/// let mut members = MemberTable::<Counter>::new();
/// members
///     .field("count", ValueType::primitive::<i32>(), |c| &c.count, |c| &mut c.count)
///     .getter("getCount", ValueType::primitive::<i32>(), |c| c.count)
///     .setter("setCount", ValueType::primitive::<i32>(), |c, v| c.count = v);
///
/// assert_eq!(members.len(), 3);
/// assert!(members.find_getter("getCount").is_some());
/// assert!(members.find_setter("setCount", ValueType::primitive::<i32>()).is_some());
/// assert!(members.find_setter("setCount", ValueType::primitive::<i64>()).is_none());
/// ```
pub struct MemberTable<T> {
    getters: HashMap<&'static str, Getter<T>>,
    setters: HashMap<&'static str, SmallVec<[Setter<T>; 1]>>,
    fields: HashMap<&'static str, Field<T>>,
}

impl<T> Default for MemberTable<T> {
    fn default() -> Self {
        Self {
            getters: HashMap::new(),
            setters: HashMap::new(),
            fields: HashMap::new(),
        }
    }
}

impl<T: 'static> MemberTable<T> {
    /// Creates a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a zero-argument method.
    ///
    /// # Panics
    ///
    /// Panics if `returns` is not carried by `R`, or if a zero-argument method
    /// with the same name is already registered.
    pub fn getter<R, F>(&mut self, name: &'static str, returns: ValueType, f: F) -> &mut Self
    where
        R: 'static,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        self.try_getter(name, returns, move |host| Ok::<R, Infallible>(f(host)))
    }

    /// Registers a zero-argument method that can fail.
    ///
    /// # Panics
    ///
    /// Panics if `returns` is not carried by `R`, or if a zero-argument method
    /// with the same name is already registered.
    pub fn try_getter<R, E, F>(
        &mut self,
        name: &'static str,
        returns: ValueType,
        f: F,
    ) -> &mut Self
    where
        R: 'static,
        E: Into<MemberError>,
        F: Fn(&T) -> Result<R, E> + Send + Sync + 'static,
    {
        assert!(
            returns.is_carried_by::<R>(),
            "getter '{name}' returns {} but is registered as {returns}",
            type_name::<R>()
        );
        assert!(
            !self.getters.contains_key(name),
            "getter '{name}' is already registered"
        );

        self.getters.insert(
            name,
            Getter {
                name,
                returns,
                call: Arc::new(move |host: &T| -> Result<ErasedValue, MemberError> {
                    f(host).map(ErasedValue::new).map_err(Into::into)
                }),
            },
        );
        self
    }

    /// Registers a one-argument method.
    ///
    /// # Panics
    ///
    /// Panics if `param` is not carried by `R`, or if a one-argument method
    /// with the same name and parameter representation is already registered.
    pub fn setter<R, F>(&mut self, name: &'static str, param: ValueType, f: F) -> &mut Self
    where
        R: 'static,
        F: Fn(&mut T, R) + Send + Sync + 'static,
    {
        self.try_setter(name, param, move |host, value| {
            f(host, value);
            Ok::<(), Infallible>(())
        })
    }

    /// Registers a one-argument method that can fail.
    ///
    /// # Panics
    ///
    /// Panics if `param` is not carried by `R`, or if a one-argument method
    /// with the same name and parameter representation is already registered.
    pub fn try_setter<R, E, F>(
        &mut self,
        name: &'static str,
        param: ValueType,
        f: F,
    ) -> &mut Self
    where
        R: 'static,
        E: Into<MemberError>,
        F: Fn(&mut T, R) -> Result<(), E> + Send + Sync + 'static,
    {
        assert!(
            param.is_carried_by::<R>(),
            "setter '{name}' takes {} but is registered as {param}",
            type_name::<R>()
        );

        let overloads = self.setters.entry(name).or_default();
        assert!(
            overloads.iter().all(|s| s.param != param),
            "setter '{name}({param})' is already registered"
        );

        overloads.push(Setter {
            name,
            param,
            call: Arc::new(
                move |host: &mut T, value: ErasedValue| -> Result<(), MemberError> {
                    f(host, take_value(name, value)).map_err(Into::into)
                },
            ),
        });
        self
    }

    /// Registers a public field through a pair of projections.
    ///
    /// # Panics
    ///
    /// Panics if `ty` is not carried by `R`, or if a field with the same name
    /// is already registered.
    pub fn field<R, G, S>(
        &mut self,
        name: &'static str,
        ty: ValueType,
        get: G,
        get_mut: S,
    ) -> &mut Self
    where
        R: Clone + 'static,
        G: Fn(&T) -> &R + Send + Sync + 'static,
        S: Fn(&mut T) -> &mut R + Send + Sync + 'static,
    {
        assert!(
            ty.is_carried_by::<R>(),
            "field '{name}' has type {} but is registered as {ty}",
            type_name::<R>()
        );
        assert!(
            !self.fields.contains_key(name),
            "field '{name}' is already registered"
        );

        self.fields.insert(
            name,
            Field {
                name,
                ty,
                read: Arc::new(move |host: &T| ErasedValue::new(get(host).clone())),
                write: Arc::new(move |host: &mut T, value: ErasedValue| {
                    *get_mut(host) = take_value(name, value);
                }),
            },
        );
        self
    }

    /// Looks up a zero-argument method by name.
    #[must_use]
    pub fn find_getter(&self, name: &str) -> Option<&Getter<T>> {
        self.getters.get(name)
    }

    /// Looks up a one-argument method by name and exact parameter
    /// representation.
    #[must_use]
    pub fn find_setter(&self, name: &str, param: ValueType) -> Option<&Setter<T>> {
        self.setters
            .get(name)
            .and_then(|overloads| overloads.iter().find(|s| s.param == param))
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&Field<T>> {
        self.fields.get(name)
    }

    /// Returns the number of registered members, counting each setter
    /// overload.
    #[must_use]
    pub fn len(&self) -> usize {
        let setters: usize = self.setters.values().map(SmallVec::len).sum();
        self.getters.len() + setters + self.fields.len()
    }

    /// Returns `true` if no members are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the names of all registered members, sorted and de-duplicated.
    #[must_use]
    pub fn member_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .getters
            .keys()
            .chain(self.setters.keys())
            .chain(self.fields.keys())
            .copied()
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl<T: 'static> fmt::Debug for MemberTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberTable")
            .field("count", &self.len())
            .field("members", &self.member_names())
            .finish_non_exhaustive()
    }
}
