// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution and access errors.

use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::value_type::ValueType;

/// An error raised by a host member itself.
pub type MemberError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Why a property could not be resolved on a host type.
///
/// Resolution is all-or-nothing: when this is returned, no descriptor exists.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No `get` method, `is` method or field matches the property name.
    #[error("no accessor method or field found for property with name {name}")]
    NoSuchProperty {
        /// The requested property name.
        name: String,
    },
    /// A member matched by name, but its representation cannot back the
    /// declared value type.
    #[error("underlying type ({actual}) of {member} does not match property type ({declared})")]
    TypeMismatch {
        /// The requested property name.
        name: String,
        /// The member that was found.
        member: String,
        /// The representation the caller declared.
        declared: ValueType,
        /// The representation of the member.
        actual: ValueType,
    },
}

impl ResolveError {
    /// Returns the property name resolution was attempted for.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::NoSuchProperty { name } | Self::TypeMismatch { name, .. } => name,
        }
    }
}

/// Why a `get` or `set` on a resolved property failed.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The property has no setter and is not backed by a field.
    #[error("property {name} is read-only")]
    ReadOnly {
        /// The property name.
        name: String,
    },
    /// The bound member failed when invoked.
    #[error("invoking {member} failed")]
    Invocation {
        /// The member that failed.
        member: String,
        /// The member's own error.
        #[source]
        source: MemberError,
    },
}

impl AccessError {
    /// Returns `true` for [`AccessError::ReadOnly`].
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly { .. })
    }
}
