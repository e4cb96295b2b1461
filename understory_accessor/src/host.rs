// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host types.
//!
//! This module provides the [`Introspect`] trait, which a type implements to
//! publish the members its properties are resolved against.

use crate::members::MemberTable;

/// A type whose members can back properties.
///
/// Implementations list the type's exposed methods and fields. Properties are
/// then found by naming convention: `getX`/`isX` methods, a `setX` method, or
/// a field called `x`.
///
/// # Example
///
/// ```rust
/// use understory_accessor::{Introspect, MemberTable, ValueType};
///
/// struct Toggle {
///     on: bool,
/// }
///
/// impl Introspect for Toggle {
///     fn members(members: &mut MemberTable<Self>) {
///         members
///             .getter("isOn", ValueType::primitive::<bool>(), |t| t.on)
///             .setter("setOn", ValueType::primitive::<bool>(), |t, on| t.on = on);
///     }
/// }
///
/// let members = Toggle::member_table();
/// assert!(members.find_getter("isOn").is_some());
/// ```
pub trait Introspect: Sized + 'static {
    /// Registers this type's exposed members.
    fn members(members: &mut MemberTable<Self>);

    /// Builds a fresh table of this type's exposed members.
    #[must_use]
    fn member_table() -> MemberTable<Self> {
        let mut members = MemberTable::new();
        Self::members(&mut members);
        members
    }
}
