// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The property contract.
//!
//! This module provides the [`Property`] trait, the uniform get/set interface
//! over a named value held by a host, [`PropertyInfo`] for the name and
//! declared type every property carries, and [`FnProperty`] for properties
//! written by hand from closures.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::error::AccessError;
use crate::value_type::ValueType;

/// The identifying name and declared value type of a property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    name: String,
    value_type: ValueType,
}

impl PropertyInfo {
    /// Creates a new property description.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }

    /// Returns the property name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared value type.
    #[must_use]
    #[inline]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

/// A named value of type `V` held by hosts of type `T`.
///
/// A property records *how* to reach a host's value, never *which* host: the
/// host is borrowed for each call.
///
/// Only [`info`](Self::info) and [`get`](Self::get) are required. The provided
/// [`set`](Self::set) refuses with [`AccessError::ReadOnly`] and
/// [`is_read_only`](Self::is_read_only) reports `true`; writable properties
/// override both.
pub trait Property<T, V> {
    /// Returns the name and declared type of this property.
    fn info(&self) -> &PropertyInfo;

    /// Returns the current value of this property on `host`.
    fn get(&self, host: &T) -> Result<V, AccessError>;

    /// Sets the value of this property on `host`.
    fn set(&self, _host: &mut T, _value: V) -> Result<(), AccessError> {
        Err(read_only(self.name()))
    }

    /// Returns `true` if [`set`](Self::set) will refuse to write.
    fn is_read_only(&self) -> bool {
        true
    }

    /// Returns the property name.
    fn name(&self) -> &str {
        self.info().name()
    }

    /// Returns the declared value type.
    fn value_type(&self) -> ValueType {
        self.info().value_type()
    }
}

pub(crate) fn read_only(name: &str) -> AccessError {
    tracing::trace!(property = name, "refusing to set read-only property");
    AccessError::ReadOnly { name: name.into() }
}

type GetFn<T, V> = Box<dyn Fn(&T) -> V + Send + Sync>;
type SetFn<T, V> = Box<dyn Fn(&mut T, V) + Send + Sync>;

/// A property implemented directly with closures.
///
/// This is for hosts whose values are not reachable through the member naming
/// convention, such as derived or converted values.
///
/// # Example
///
/// ```rust
/// use understory_accessor::{FnProperty, Property, ValueType};
///
/// struct Rect {
///     width: f64,
///     height: f64,
/// }
///
/// let area = FnProperty::new("area", ValueType::boxed::<f64>(), |r: &Rect| r.width * r.height);
/// assert!(area.is_read_only());
///
/// let width = FnProperty::new("width", ValueType::boxed::<f64>(), |r: &Rect| r.width)
///     .with_setter(|r: &mut Rect, w| r.width = w);
///
/// let mut rect = Rect { width: 2.0, height: 3.0 };
/// width.set(&mut rect, 4.0).unwrap();
/// assert_eq!(area.get(&rect).unwrap(), 12.0);
/// assert!(area.set(&mut rect, 1.0).is_err());
/// ```
pub struct FnProperty<T, V> {
    info: PropertyInfo,
    get: GetFn<T, V>,
    set: Option<SetFn<T, V>>,
}

impl<T, V> FnProperty<T, V> {
    /// Creates a read-only property from a getter.
    #[must_use]
    pub fn new<G>(name: impl Into<String>, value_type: ValueType, get: G) -> Self
    where
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self {
            info: PropertyInfo::new(name, value_type),
            get: Box::new(get),
            set: None,
        }
    }

    /// Makes the property writable through `set`.
    #[must_use]
    pub fn with_setter<S>(mut self, set: S) -> Self
    where
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.set = Some(Box::new(set));
        self
    }
}

impl<T, V> Property<T, V> for FnProperty<T, V> {
    fn info(&self) -> &PropertyInfo {
        &self.info
    }

    fn get(&self, host: &T) -> Result<V, AccessError> {
        Ok((self.get)(host))
    }

    fn set(&self, host: &mut T, value: V) -> Result<(), AccessError> {
        match &self.set {
            Some(set) => {
                set(host, value);
                Ok(())
            }
            None => Err(read_only(self.name())),
        }
    }

    fn is_read_only(&self) -> bool {
        self.set.is_none()
    }
}

// Manual Debug impl since closures aren't Debug
impl<T, V> fmt::Debug for FnProperty<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProperty")
            .field("info", &self.info)
            .field("has_setter", &self.set.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    struct Celsius {
        degrees: f64,
    }

    /// Implements only the required methods.
    struct Fahrenheit {
        info: PropertyInfo,
    }

    impl Property<Celsius, f64> for Fahrenheit {
        fn info(&self) -> &PropertyInfo {
            &self.info
        }

        fn get(&self, host: &Celsius) -> Result<f64, AccessError> {
            Ok(host.degrees * 9.0 / 5.0 + 32.0)
        }
    }

    #[test]
    fn info_accessors() {
        let info = PropertyInfo::new("width", ValueType::boxed::<f64>());
        assert_eq!(info.name(), "width");
        assert_eq!(info.value_type(), ValueType::boxed::<f64>());
    }

    #[test]
    fn base_contract_is_read_only() {
        let prop = Fahrenheit {
            info: PropertyInfo::new("fahrenheit", ValueType::boxed::<f64>()),
        };
        let mut host = Celsius { degrees: 100.0 };

        assert_eq!(prop.name(), "fahrenheit");
        assert_eq!(prop.value_type(), ValueType::boxed::<f64>());
        assert!(prop.is_read_only());
        assert_eq!(prop.get(&host).unwrap(), 212.0);

        let err = prop.set(&mut host, 0.0).unwrap_err();
        assert!(matches!(err, AccessError::ReadOnly { ref name } if name == "fahrenheit"));
        assert_eq!(host.degrees, 100.0);
    }

    #[test]
    fn fn_property_without_setter() {
        let prop = FnProperty::new("degrees", ValueType::boxed::<f64>(), |c: &Celsius| c.degrees);
        let mut host = Celsius { degrees: 5.0 };

        assert!(prop.is_read_only());
        assert!(prop.set(&mut host, 6.0).unwrap_err().is_read_only());
        assert_eq!(prop.get(&host).unwrap(), 5.0);
    }

    #[test]
    fn fn_property_with_setter() {
        let prop = FnProperty::new("degrees", ValueType::boxed::<f64>(), |c: &Celsius| c.degrees)
            .with_setter(|c: &mut Celsius, v| c.degrees = v);
        let mut host = Celsius { degrees: 5.0 };

        assert!(!prop.is_read_only());
        prop.set(&mut host, -40.0).unwrap();
        assert_eq!(prop.get(&host).unwrap(), -40.0);
    }

    #[test]
    fn fn_property_debug() {
        let prop = FnProperty::new("degrees", ValueType::boxed::<f64>(), |c: &Celsius| c.degrees);
        let debug = format!("{:?}", prop);
        assert!(debug.contains("FnProperty"));
        assert!(debug.contains("degrees"));
        assert!(debug.contains("has_setter: false"));
    }
}
