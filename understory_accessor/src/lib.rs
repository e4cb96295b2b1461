// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Accessor: convention-based property accessors.
//!
//! This crate resolves a named property on a host type to the members that
//! read and write it, then exposes them through the uniform [`Property`]
//! get/set interface. Callers never see whether a value sits behind a
//! getter/setter pair or a plain field.
//!
//! ## Core Concepts
//!
//! ### Member Tables
//!
//! A host type implements [`Introspect`] to list its exposed members in a
//! [`MemberTable`]: zero-argument methods, one-argument methods, and fields,
//! each tagged with the [`ValueType`] it stores.
//!
//! ### Resolution
//!
//! [`resolve`] takes a declared type and a property name and searches, in
//! order, for `get<Name>`, `is<Name>`, and a field named `<name>`. A matching
//! `set<Name>` makes a method-backed property writable; fields are always
//! writable. Resolution is eager and all-or-nothing.
//!
//! ### Representations
//!
//! Scalars have a primitive and a boxed [`ValueType`]. A property declared as
//! a boxed scalar can be backed by a member storing the primitive form; see
//! [`types_compatible`] for the exact rule.
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_accessor::{
//!     BindingKind, Declared, Introspect, MemberTable, Property, ValueType, resolve,
//! };
//!
//! #[derive(Default)]
//! struct MyObject {
//!     m_foo: i32,
//! }
//!
//! impl Introspect for MyObject {
//!     fn members(members: &mut MemberTable<Self>) {
//!         let int = ValueType::primitive::<i32>();
//!         members
//!             .field("mFoo", int, |o| &o.m_foo, |o| &mut o.m_foo)
//!             .getter("getFoo", int, |o| o.m_foo)
//!             .setter("setFoo", int, |o, v| o.m_foo = v);
//!     }
//! }
//!
//! let mut object = MyObject::default();
//!
//! // Finds `getFoo` and `setFoo`.
//! let foo = resolve::<MyObject, _>(Declared::<i32>::boxed(), "foo").unwrap();
//! assert_eq!(foo.binding_kind(), BindingKind::GetterSetter);
//! foo.set(&mut object, 100).unwrap();
//! assert_eq!(foo.get(&object).unwrap(), 100);
//!
//! // No `getMFoo` or `isMFoo`, so this finds the `mFoo` field.
//! let m_foo = resolve::<MyObject, _>(Declared::<i32>::boxed(), "mFoo").unwrap();
//! assert_eq!(m_foo.binding_kind(), BindingKind::Field);
//! m_foo.set(&mut object, 50).unwrap();
//! assert_eq!(foo.get(&object).unwrap(), 50);
//! ```
//!
//! ## Diagnostics
//!
//! Resolution emits `tracing` events: `debug` for each outcome and `trace` for
//! each member looked up. No subscriber is installed by this crate.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. The default `std` feature only
//! forwards to dependencies.

#![no_std]

extern crate alloc;

mod error;
mod host;
mod members;
mod property;
mod reflective;
mod value;
mod value_type;

pub use error::{AccessError, MemberError, ResolveError};
pub use host::Introspect;
pub use members::{Field, Getter, MemberTable, Setter};
pub use property::{FnProperty, Property, PropertyInfo};
pub use reflective::{Binding, BindingKind, ReflectiveProperty, resolve};
pub use value::ErasedValue;
pub use value_type::{Declared, Primitive, Scalar, ValueType, types_compatible};
