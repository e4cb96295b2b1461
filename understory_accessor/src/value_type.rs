// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value representation tokens.
//!
//! This module provides [`ValueType`], the token a caller uses to declare the
//! type it expects to read and write, and the token a host uses to describe the
//! representation of each member it exposes.
//!
//! Scalars come in two representations: the *primitive* one hosts usually
//! store, and the *boxed* one accessor contracts are usually written against.
//! Both are carried by the same Rust type, so the distinction only matters for
//! [`types_compatible`].

use core::any::TypeId;
use core::fmt;
use core::marker::PhantomData;

/// The eight scalar kinds that have both a primitive and a boxed form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `i32`.
    Int,
    /// `i64`.
    Long,
    /// `i16`.
    Short,
    /// `i8`.
    Byte,
    /// `f32`.
    Float,
    /// `f64`.
    Double,
    /// `bool`.
    Boolean,
    /// `char`.
    Char,
}

impl Primitive {
    /// Returns the [`TypeId`] of the Rust scalar that carries this kind.
    #[must_use]
    pub fn carrier(self) -> TypeId {
        match self {
            Self::Int => TypeId::of::<i32>(),
            Self::Long => TypeId::of::<i64>(),
            Self::Short => TypeId::of::<i16>(),
            Self::Byte => TypeId::of::<i8>(),
            Self::Float => TypeId::of::<f32>(),
            Self::Double => TypeId::of::<f64>(),
            Self::Boolean => TypeId::of::<bool>(),
            Self::Char => TypeId::of::<char>(),
        }
    }

    /// Returns the name of the Rust scalar that carries this kind.
    #[must_use]
    pub const fn carrier_name(self) -> &'static str {
        match self {
            Self::Int => "i32",
            Self::Long => "i64",
            Self::Short => "i16",
            Self::Byte => "i8",
            Self::Float => "f32",
            Self::Double => "f64",
            Self::Boolean => "bool",
            Self::Char => "char",
        }
    }
}

mod sealed {
    #[expect(unnameable_types, reason = "sealed trait pattern")]
    pub trait Sealed {}
}

/// Rust scalars with a [`Primitive`] kind.
///
/// This trait is sealed; it is implemented for `i32`, `i64`, `i16`, `i8`,
/// `f32`, `f64`, `bool` and `char`.
pub trait Scalar: sealed::Sealed + Copy + 'static {
    /// The kind this scalar carries.
    const KIND: Primitive;
}

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Scalar for $ty {
                const KIND: Primitive = Primitive::$kind;
            }
        )*
    };
}

impl_scalar! {
    i32 => Int,
    i64 => Long,
    i16 => Short,
    i8 => Byte,
    f32 => Float,
    f64 => Double,
    bool => Boolean,
    char => Char,
}

/// A value representation token.
///
/// # Example
///
/// ```rust
/// use understory_accessor::{Primitive, ValueType};
///
/// let native = ValueType::primitive::<i32>();
/// let boxed = ValueType::boxed::<i32>();
///
/// assert_eq!(native, ValueType::Primitive(Primitive::Int));
/// assert_ne!(native, boxed);
///
/// // Both forms are read and written as `i32`.
/// assert_eq!(native.carrier(), boxed.carrier());
///
/// // A boxed declaration accepts a primitive member, not the other way round.
/// assert!(boxed.accepts(native));
/// assert!(!native.accepts(boxed));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// The primitive (storage) representation of a scalar.
    Primitive(Primitive),
    /// The boxed (uniform) representation of a scalar.
    Boxed(Primitive),
    /// Any other Rust type, identified by its [`TypeId`].
    Other {
        /// The type's identity.
        id: TypeId,
        /// The type's name, for diagnostics only.
        name: &'static str,
    },
}

impl ValueType {
    /// The primitive representation of scalar `T`.
    #[must_use]
    #[inline]
    pub const fn primitive<T: Scalar>() -> Self {
        Self::Primitive(T::KIND)
    }

    /// The boxed representation of scalar `T`.
    #[must_use]
    #[inline]
    pub const fn boxed<T: Scalar>() -> Self {
        Self::Boxed(T::KIND)
    }

    /// A token for any other `'static` type.
    ///
    /// Note that `ValueType::of::<i32>()` is neither the primitive nor the
    /// boxed `i32`; use [`ValueType::primitive`] or [`ValueType::boxed`] for
    /// scalars.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self::Other {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the Rust type values of this representation
    /// are carried in.
    #[must_use]
    pub fn carrier(self) -> TypeId {
        match self {
            Self::Primitive(kind) | Self::Boxed(kind) => kind.carrier(),
            Self::Other { id, .. } => id,
        }
    }

    /// Returns `true` if values of this representation are carried in `T`.
    #[must_use]
    #[inline]
    pub fn is_carried_by<T: 'static>(self) -> bool {
        self.carrier() == TypeId::of::<T>()
    }

    /// Returns the scalar kind, if this is a primitive or boxed scalar.
    #[must_use]
    pub const fn kind(self) -> Option<Primitive> {
        match self {
            Self::Primitive(kind) | Self::Boxed(kind) => Some(kind),
            Self::Other { .. } => None,
        }
    }

    /// Returns `true` for the primitive representation of a scalar.
    #[must_use]
    pub const fn is_primitive(self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Returns `true` if a member of representation `actual` can back a
    /// property declared with this representation.
    ///
    /// See [`types_compatible`].
    #[must_use]
    #[inline]
    pub fn accepts(self, actual: Self) -> bool {
        types_compatible(self, actual)
    }
}

/// Returns `true` if a member of representation `actual` can back a property
/// declared as `declared`.
///
/// The rule is asymmetric: representations must be equal, or `actual` must be
/// a primitive scalar and `declared` exactly its boxed form. There is no
/// widening or narrowing.
///
/// ```rust
/// use understory_accessor::{ValueType, types_compatible};
///
/// assert!(types_compatible(ValueType::boxed::<i32>(), ValueType::primitive::<i32>()));
/// assert!(!types_compatible(ValueType::boxed::<i64>(), ValueType::primitive::<i32>()));
/// assert!(!types_compatible(ValueType::primitive::<i32>(), ValueType::boxed::<i32>()));
/// ```
#[must_use]
pub fn types_compatible(declared: ValueType, actual: ValueType) -> bool {
    if declared == actual {
        return true;
    }
    match (declared, actual) {
        (ValueType::Boxed(boxed), ValueType::Primitive(primitive)) => boxed == primitive,
        _ => false,
    }
}

/// A declared value type, tied to the Rust type `V` values cross as.
///
/// This wraps a [`ValueType`] whose carrier is `V`, so a property can never be
/// declared with a representation its values are not carried in.
///
/// ```rust
/// use understory_accessor::{Declared, ValueType};
///
/// let declared = Declared::<i32>::boxed();
/// assert_eq!(declared.value_type(), ValueType::boxed::<i32>());
///
/// let declared = Declared::<String>::of();
/// assert_eq!(declared.value_type(), ValueType::of::<String>());
/// ```
pub struct Declared<V> {
    value_type: ValueType,
    _marker: PhantomData<fn() -> V>,
}

impl<V: Scalar> Declared<V> {
    /// Declares the primitive representation of `V`.
    #[must_use]
    #[inline]
    pub const fn primitive() -> Self {
        Self {
            value_type: ValueType::primitive::<V>(),
            _marker: PhantomData,
        }
    }

    /// Declares the boxed representation of `V`.
    #[must_use]
    #[inline]
    pub const fn boxed() -> Self {
        Self {
            value_type: ValueType::boxed::<V>(),
            _marker: PhantomData,
        }
    }
}

impl<V: 'static> Declared<V> {
    /// Declares `V` itself, as [`ValueType::of`] does.
    #[must_use]
    pub fn of() -> Self {
        Self {
            value_type: ValueType::of::<V>(),
            _marker: PhantomData,
        }
    }
}

impl<V> Declared<V> {
    /// Returns the declared representation.
    #[must_use]
    #[inline]
    pub fn value_type(self) -> ValueType {
        self.value_type
    }
}

// Manual trait implementations to avoid requiring V: Clone, etc.

impl<V> Copy for Declared<V> {}

impl<V> Clone for Declared<V> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> PartialEq for Declared<V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value_type == other.value_type
    }
}

impl<V> Eq for Declared<V> {}

impl<V> fmt::Debug for Declared<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declared")
            .field("value_type", &self.value_type)
            .field("carrier", &core::any::type_name::<V>())
            .finish()
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.debug_tuple("Primitive").field(kind).finish(),
            Self::Boxed(kind) => f.debug_tuple("Boxed").field(kind).finish(),
            Self::Other { name, .. } => f.debug_tuple("Other").field(name).finish(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.carrier_name()),
            Self::Boxed(kind) => write!(f, "boxed {}", kind.carrier_name()),
            Self::Other { name, .. } => f.write_str(name),
        }
    }
}
