// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Convention-based property resolution.
//!
//! [`resolve`] searches a host's [`MemberTable`] for the members backing a
//! named property, in this order:
//!
//! 1. a zero-argument `get<Name>` method,
//! 2. a zero-argument `is<Name>` method,
//! 3. a field called exactly `<name>`.
//!
//! The first member found decides the outcome. A `get` method or field whose
//! representation does not fit the declared type fails with
//! [`ResolveError::TypeMismatch`] without trying later steps. When a method is
//! bound, a one-argument `set<Name>` method whose parameter has exactly the
//! method's return representation makes the property writable. Fields are
//! always writable.

use alloc::string::String;
use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;

use smallvec::SmallVec;

use crate::error::{AccessError, ResolveError};
use crate::host::Introspect;
use crate::members::{Field, Getter, MemberTable, Setter};
use crate::property::{Property, PropertyInfo, read_only};
use crate::value::ErasedValue;
use crate::value_type::{Declared, ValueType};

const PREFIX_GET: &str = "get";
const PREFIX_IS: &str = "is";
const PREFIX_SET: &str = "set";

/// The members a resolved property dispatches to.
pub enum Binding<T> {
    /// A `get`/`is` method, with a matching `set` method if one exists.
    GetterSetter {
        /// The zero-argument method.
        getter: Getter<T>,
        /// The one-argument method, or `None` for a read-only property.
        setter: Option<Setter<T>>,
    },
    /// A field, read and written in place.
    Field {
        /// The field.
        field: Field<T>,
    },
}

/// The shape of a [`Binding`], for diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BindingKind {
    /// A method without a matching setter.
    Getter,
    /// A method with a matching setter.
    GetterSetter,
    /// A field.
    Field,
}

impl<T> Binding<T> {
    /// Returns the shape of this binding.
    #[must_use]
    pub fn kind(&self) -> BindingKind {
        match self {
            Self::GetterSetter { setter: None, .. } => BindingKind::Getter,
            Self::GetterSetter {
                setter: Some(_), ..
            } => BindingKind::GetterSetter,
            Self::Field { .. } => BindingKind::Field,
        }
    }

    /// Returns the names of the bound members, getter first.
    #[must_use]
    pub fn member_names(&self) -> SmallVec<[&'static str; 2]> {
        let mut names = SmallVec::new();
        match self {
            Self::GetterSetter { getter, setter } => {
                names.push(getter.name());
                if let Some(setter) = setter {
                    names.push(setter.name());
                }
            }
            Self::Field { field } => names.push(field.name()),
        }
        names
    }

    /// Returns `true` if the binding cannot write.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::GetterSetter { setter: None, .. })
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        match self {
            Self::GetterSetter { getter, setter } => Self::GetterSetter {
                getter: getter.clone(),
                setter: setter.clone(),
            },
            Self::Field { field } => Self::Field {
                field: field.clone(),
            },
        }
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetterSetter { getter, setter } => f
                .debug_struct("GetterSetter")
                .field("getter", getter)
                .field("setter", setter)
                .finish(),
            Self::Field { field } => f.debug_struct("Field").field("field", field).finish(),
        }
    }
}

/// Uppercases the first character and keeps the rest.
///
/// The mapping is one character to one character: a first character whose
/// uppercase form is longer (such as `ß`) is kept as is.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    let mut out = String::with_capacity(name.len());
    if let Some(first) = chars.next() {
        let mut upper = first.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(single), None) => out.push(single),
            _ => out.push(first),
        }
        out.push_str(chars.as_str());
    }
    out
}

/// Resolves `name` against the members of host type `T`.
///
/// The property reads and writes values as `V`; `declared` is the
/// representation the caller expects, such as the boxed form of a scalar.
///
/// # Errors
///
/// Returns [`ResolveError::NoSuchProperty`] when no `get`/`is` method or field
/// matches (including for an empty name), and [`ResolveError::TypeMismatch`]
/// when the matched member cannot back `declared`.
///
/// # Example
///
/// ```rust
/// use understory_accessor::{Declared, Introspect, MemberTable, Property, ValueType, resolve};
///
/// struct Label {
///     text: String,
///     visible: bool,
/// }
///
/// impl Introspect for Label {
///     fn members(members: &mut MemberTable<Self>) {
///         members
///             .field("text", ValueType::of::<String>(), |l| &l.text, |l| &mut l.text)
///             .getter("isVisible", ValueType::primitive::<bool>(), |l| l.visible);
///     }
/// }
///
/// let mut label = Label { text: "hi".into(), visible: true };
///
/// let text = resolve::<Label, _>(Declared::<String>::of(), "text").unwrap();
/// text.set(&mut label, "bye".into()).unwrap();
/// assert_eq!(label.text, "bye");
///
/// let visible = resolve::<Label, _>(Declared::<bool>::boxed(), "visible").unwrap();
/// assert!(visible.get(&label).unwrap());
/// assert!(visible.is_read_only());
///
/// assert!(resolve::<Label, _>(Declared::<i32>::boxed(), "size").is_err());
/// ```
pub fn resolve<T, V>(
    declared: Declared<V>,
    name: &str,
) -> Result<ReflectiveProperty<T, V>, ResolveError>
where
    T: Introspect,
    V: 'static,
{
    ReflectiveProperty::new(declared, name)
}

/// A property bound to members of `T` found by naming convention.
///
/// Created by [`resolve`]. Resolution happens once, eagerly; `get` and `set`
/// only dispatch to the bound members.
pub struct ReflectiveProperty<T, V> {
    info: PropertyInfo,
    binding: Binding<T>,
    _marker: PhantomData<fn() -> V>,
}

impl<T: Introspect, V: 'static> ReflectiveProperty<T, V> {
    /// Resolves `name` against the members of `T`. See [`resolve`].
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn new(declared: Declared<V>, name: &str) -> Result<Self, ResolveError> {
        Self::from_table(&T::member_table(), declared, name)
    }
}

impl<T: 'static, V: 'static> ReflectiveProperty<T, V> {
    /// Resolves `name` against an explicit member table.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn from_table(
        members: &MemberTable<T>,
        declared: Declared<V>,
        name: &str,
    ) -> Result<Self, ResolveError> {
        let value_type = declared.value_type();
        match bind(members, value_type, name) {
            Ok(binding) => {
                tracing::debug!(
                    host = type_name::<T>(),
                    property = name,
                    kind = ?binding.kind(),
                    members = ?binding.member_names(),
                    "resolved property"
                );
                Ok(Self {
                    info: PropertyInfo::new(name, value_type),
                    binding,
                    _marker: PhantomData,
                })
            }
            Err(err) => {
                tracing::debug!(
                    host = type_name::<T>(),
                    property = name,
                    error = %err,
                    "failed to resolve property"
                );
                Err(err)
            }
        }
    }
}

impl<T, V> ReflectiveProperty<T, V> {
    /// Returns the members this property dispatches to.
    #[must_use]
    #[inline]
    pub fn binding(&self) -> &Binding<T> {
        &self.binding
    }

    /// Returns the shape of the binding.
    #[must_use]
    #[inline]
    pub fn binding_kind(&self) -> BindingKind {
        self.binding.kind()
    }

    /// Returns the names of the bound members, getter first.
    #[must_use]
    pub fn member_names(&self) -> SmallVec<[&'static str; 2]> {
        self.binding.member_names()
    }
}

fn bind<T: 'static>(
    members: &MemberTable<T>,
    value_type: ValueType,
    name: &str,
) -> Result<Binding<T>, ResolveError> {
    if name.is_empty() {
        return Err(no_such_property(name));
    }

    let suffix = capitalize(name);

    let get_name = [PREFIX_GET, suffix.as_str()].concat();
    tracing::trace!(member = get_name.as_str(), "looking for getter");
    let getter = match members.find_getter(&get_name) {
        Some(getter) => {
            check_type(name, getter.name(), value_type, getter.returns())?;
            Some(getter)
        }
        None => {
            let is_name = [PREFIX_IS, suffix.as_str()].concat();
            tracing::trace!(member = is_name.as_str(), "looking for getter");
            members.find_getter(&is_name)
        }
    };

    let Some(getter) = getter else {
        tracing::trace!(member = name, "looking for field");
        let field = members.find_field(name).ok_or_else(|| no_such_property(name))?;
        check_type(name, field.name(), value_type, field.ty())?;
        return Ok(Binding::Field {
            field: field.clone(),
        });
    };

    // An `is` getter is bound without the compatibility check, but values
    // still cross as the declared carrier, so that has to agree.
    check_carrier(name, getter.name(), value_type, getter.returns())?;

    let set_name = [PREFIX_SET, suffix.as_str()].concat();
    tracing::trace!(member = set_name.as_str(), "looking for setter");
    let setter = members.find_setter(&set_name, getter.returns()).cloned();

    Ok(Binding::GetterSetter {
        getter: getter.clone(),
        setter,
    })
}

fn check_type(
    name: &str,
    member: &str,
    declared: ValueType,
    actual: ValueType,
) -> Result<(), ResolveError> {
    if declared.accepts(actual) {
        Ok(())
    } else {
        Err(type_mismatch(name, member, declared, actual))
    }
}

fn check_carrier(
    name: &str,
    member: &str,
    declared: ValueType,
    actual: ValueType,
) -> Result<(), ResolveError> {
    if declared.carrier() == actual.carrier() {
        Ok(())
    } else {
        Err(type_mismatch(name, member, declared, actual))
    }
}

fn no_such_property(name: &str) -> ResolveError {
    ResolveError::NoSuchProperty { name: name.into() }
}

fn type_mismatch(name: &str, member: &str, declared: ValueType, actual: ValueType) -> ResolveError {
    ResolveError::TypeMismatch {
        name: name.into(),
        member: member.into(),
        declared,
        actual,
    }
}

/// Recovers a value produced by a bound member.
///
/// Resolution checks that the member's carrier is `V`, so this cannot fail
/// unless the member table itself is inconsistent.
fn expect_value<V: 'static>(member: &str, value: ErasedValue) -> V {
    match value.downcast::<V>() {
        Ok(value) => value,
        Err(value) => panic!(
            "member {member} produced {} where {} was resolved",
            value.type_name(),
            type_name::<V>()
        ),
    }
}

impl<T: 'static, V: 'static> Property<T, V> for ReflectiveProperty<T, V> {
    fn info(&self) -> &PropertyInfo {
        &self.info
    }

    fn get(&self, host: &T) -> Result<V, AccessError> {
        match &self.binding {
            Binding::GetterSetter { getter, .. } => {
                let value = getter.invoke(host).map_err(|source| {
                    tracing::trace!(member = getter.name(), "getter failed");
                    AccessError::Invocation {
                        member: getter.name().into(),
                        source,
                    }
                })?;
                Ok(expect_value(getter.name(), value))
            }
            Binding::Field { field } => Ok(expect_value(field.name(), field.read(host))),
        }
    }

    fn set(&self, host: &mut T, value: V) -> Result<(), AccessError> {
        match &self.binding {
            Binding::GetterSetter {
                setter: Some(setter),
                ..
            } => setter
                .invoke(host, ErasedValue::new(value))
                .map_err(|source| {
                    tracing::trace!(member = setter.name(), "setter failed");
                    AccessError::Invocation {
                        member: setter.name().into(),
                        source,
                    }
                }),
            Binding::GetterSetter { setter: None, .. } => Err(read_only(self.info.name())),
            Binding::Field { field } => {
                field.write(host, ErasedValue::new(value));
                Ok(())
            }
        }
    }

    fn is_read_only(&self) -> bool {
        self.binding.is_read_only()
    }
}

// Manual trait implementations to avoid requiring T: Clone, etc.

impl<T, V> Clone for ReflectiveProperty<T, V> {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            binding: self.binding.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, V> fmt::Debug for ReflectiveProperty<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflectiveProperty")
            .field("info", &self.info)
            .field("binding", &self.binding)
            .field("value", &type_name::<V>())
            .finish()
    }
}
