// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_accessor` crate.
//!
//! These exercise resolution precedence, the primitive/boxed compatibility
//! rule, and get/set dispatch through every kind of binding.

use understory_accessor::{
    AccessError, BindingKind, Declared, Introspect, MemberTable, Property, ResolveError,
    ValueType, resolve, types_compatible,
};

/// A host with a field and a getter/setter pair over the same storage.
#[derive(Default)]
struct MyObject {
    m_foo: i32,
}

impl MyObject {
    fn get_foo(&self) -> i32 {
        self.m_foo
    }

    fn set_foo(&mut self, value: i32) {
        self.m_foo = value;
    }
}

impl Introspect for MyObject {
    fn members(members: &mut MemberTable<Self>) {
        let int = ValueType::primitive::<i32>();
        members
            .field("mFoo", int, |o| &o.m_foo, |o| &mut o.m_foo)
            .getter("getFoo", int, Self::get_foo)
            .setter("setFoo", int, Self::set_foo);
    }
}

/// A host exercising each step of the search.
#[derive(Default)]
struct Account {
    name: String,
    name_field: String,
    active: bool,
    foo: i32,
    bar: i64,
    count: i32,
    total: i64,
}

impl Introspect for Account {
    fn members(members: &mut MemberTable<Self>) {
        let string = ValueType::of::<String>();
        members
            // Getter and same-named field.
            .getter("getName", string, |a| a.name.clone())
            .setter("setName", string, |a, v| a.name = v)
            .field("name", string, |a| &a.name_field, |a| &mut a.name_field)
            // Only an `is` form.
            .getter("isActive", ValueType::primitive::<bool>(), |a| a.active)
            .setter("setActive", ValueType::primitive::<bool>(), |a, v| a.active = v)
            // A string getter shadowing a compatible int field.
            .getter("getFoo", string, |a| a.foo.to_string())
            .field("foo", ValueType::primitive::<i32>(), |a| &a.foo, |a| &mut a.foo)
            // Getter without setter.
            .getter("getBar", ValueType::primitive::<i64>(), |a| a.bar)
            // Field only.
            .field("count", ValueType::primitive::<i32>(), |a| &a.count, |a| &mut a.count)
            // Setter whose parameter differs from the getter's return.
            .getter("getTotal", ValueType::primitive::<i64>(), |a| a.total)
            .setter("setTotal", ValueType::boxed::<i64>(), |a, v| a.total = v);
    }
}

#[test]
fn getter_takes_precedence_over_field() {
    let prop = resolve::<Account, _>(Declared::<String>::of(), "name").unwrap();
    assert_eq!(prop.binding_kind(), BindingKind::GetterSetter);
    assert_eq!(prop.member_names().as_slice(), ["getName", "setName"]);

    let mut account = Account::default();
    prop.set(&mut account, "ada".into()).unwrap();
    assert_eq!(account.name, "ada");
    assert_eq!(account.name_field, "");
}

#[test]
fn is_prefix_fallback() {
    let prop = resolve::<Account, _>(Declared::<bool>::boxed(), "active").unwrap();
    assert_eq!(prop.member_names().as_slice(), ["isActive", "setActive"]);

    let mut account = Account::default();
    assert!(!prop.get(&account).unwrap());
    prop.set(&mut account, true).unwrap();
    assert!(account.active);
    assert!(prop.get(&account).unwrap());
}

#[test]
fn field_fallback_is_writable() {
    let prop = resolve::<Account, _>(Declared::<i32>::boxed(), "count").unwrap();
    assert_eq!(prop.binding_kind(), BindingKind::Field);
    assert!(!prop.is_read_only());

    let mut account = Account::default();
    prop.set(&mut account, 7).unwrap();
    assert_eq!(account.count, 7);
    assert_eq!(prop.get(&account).unwrap(), 7);
}

#[test]
fn mismatched_getter_does_not_fall_back() {
    let err = resolve::<Account, _>(Declared::<i32>::boxed(), "foo").unwrap_err();
    match err {
        ResolveError::TypeMismatch {
            name,
            member,
            declared,
            actual,
        } => {
            assert_eq!(name, "foo");
            assert_eq!(member, "getFoo");
            assert_eq!(declared, ValueType::boxed::<i32>());
            assert_eq!(actual, ValueType::of::<String>());
        }
        other => panic!("expected a type mismatch, got {other:?}"),
    }
}

#[test]
fn mismatched_field_is_rejected() {
    let err = resolve::<Account, _>(Declared::<i64>::boxed(), "count").unwrap_err();
    assert!(matches!(err, ResolveError::TypeMismatch { .. }));
}

#[test]
fn missing_setter_is_read_only() {
    let prop = resolve::<Account, _>(Declared::<i64>::boxed(), "bar").unwrap();
    assert_eq!(prop.binding_kind(), BindingKind::Getter);
    assert!(prop.is_read_only());

    let mut account = Account {
        bar: 3,
        ..Account::default()
    };
    let err = prop.set(&mut account, 4).unwrap_err();
    assert!(matches!(err, AccessError::ReadOnly { ref name } if name == "bar"));
    assert_eq!(err.to_string(), "property bar is read-only");
    assert_eq!(account.bar, 3);
    assert_eq!(prop.get(&account).unwrap(), 3);
}

#[test]
fn setter_must_match_getter_return_exactly() {
    // `setTotal` takes a boxed i64 while `getTotal` returns a primitive one.
    let prop = resolve::<Account, _>(Declared::<i64>::boxed(), "total").unwrap();
    assert!(prop.is_read_only());
    assert_eq!(prop.member_names().as_slice(), ["getTotal"]);
}

#[test]
fn unknown_property() {
    let err = resolve::<Account, _>(Declared::<i32>::boxed(), "missing").unwrap_err();
    assert!(matches!(err, ResolveError::NoSuchProperty { ref name } if name == "missing"));
    assert_eq!(
        err.to_string(),
        "no accessor method or field found for property with name missing"
    );
}

#[test]
fn writable_bindings_round_trip() {
    let mut object = MyObject::default();
    let via_methods = resolve::<MyObject, _>(Declared::<i32>::boxed(), "foo").unwrap();
    let via_field = resolve::<MyObject, _>(Declared::<i32>::boxed(), "mFoo").unwrap();

    for prop in [&via_methods, &via_field] {
        for value in [0, 1, -1, 42, i32::MIN, i32::MAX] {
            prop.set(&mut object, value).unwrap();
            assert_eq!(prop.get(&object).unwrap(), value);
        }
    }
}

#[test]
fn primitive_boxed_pairing_is_exact() {
    assert!(types_compatible(
        ValueType::boxed::<i32>(),
        ValueType::primitive::<i32>()
    ));
    assert!(!types_compatible(
        ValueType::boxed::<i64>(),
        ValueType::primitive::<i32>()
    ));
    assert!(!types_compatible(
        ValueType::boxed::<i32>(),
        ValueType::primitive::<i64>()
    ));
}

#[test]
fn my_object_end_to_end() {
    let mut object = MyObject::default();

    let foo = resolve::<MyObject, _>(Declared::<i32>::boxed(), "foo").unwrap();
    assert_eq!(foo.binding_kind(), BindingKind::GetterSetter);
    assert_eq!(foo.member_names().as_slice(), ["getFoo", "setFoo"]);
    assert_eq!(foo.name(), "foo");
    assert_eq!(foo.value_type(), ValueType::boxed::<i32>());
    foo.set(&mut object, 100).unwrap();
    assert_eq!(foo.get(&object).unwrap(), 100);

    let m_foo = resolve::<MyObject, _>(Declared::<i32>::boxed(), "mFoo").unwrap();
    assert_eq!(m_foo.binding_kind(), BindingKind::Field);
    assert_eq!(m_foo.member_names().as_slice(), ["mFoo"]);
    m_foo.set(&mut object, 50).unwrap();
    assert_eq!(m_foo.get(&object).unwrap(), 50);

    // Same underlying storage.
    assert_eq!(object.m_foo, 50);
    assert_eq!(object.get_foo(), 50);
    assert_eq!(foo.get(&object).unwrap(), 50);
}

#[test]
fn properties_are_usable_across_threads() {
    let prop = resolve::<MyObject, _>(Declared::<i32>::boxed(), "foo").unwrap();

    std::thread::scope(|scope| {
        for value in 0..4 {
            let prop = &prop;
            scope.spawn(move || {
                let mut object = MyObject::default();
                prop.set(&mut object, value).unwrap();
                assert_eq!(prop.get(&object).unwrap(), value);
            });
        }
    });
}

#[test]
fn properties_are_object_safe() {
    let props: Vec<Box<dyn Property<MyObject, i32>>> = vec![
        Box::new(resolve::<MyObject, _>(Declared::<i32>::boxed(), "foo").unwrap()),
        Box::new(resolve::<MyObject, _>(Declared::<i32>::boxed(), "mFoo").unwrap()),
    ];

    let mut object = MyObject::default();
    for (value, prop) in props.iter().enumerate() {
        let value = i32::try_from(value).unwrap();
        prop.set(&mut object, value).unwrap();
        assert_eq!(object.m_foo, value);
    }
}
