// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolves the same storage through a getter/setter pair and through a field.
//!
//! Run with `cargo run -p understory_accessor --example my_object`.

use understory_accessor::{Declared, Introspect, MemberTable, Property, ResolveError, ValueType};

/// An object with a primitive field and accessors over it.
#[derive(Debug, Default)]
struct MyObject {
    m_foo: i32,
}

impl MyObject {
    fn foo(&self) -> i32 {
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
            .getter("getFoo", int, Self::foo)
            .setter("setFoo", int, Self::set_foo);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut object = MyObject::default();

    // Finds `getFoo`/`setFoo`.
    let foo = understory_accessor::resolve::<MyObject, _>(Declared::<i32>::boxed(), "foo")?;
    foo.set(&mut object, 100)?;
    let hundred = foo.get(&object)?;

    // Finds the `mFoo` field.
    let m_foo = understory_accessor::resolve::<MyObject, _>(Declared::<i32>::boxed(), "mFoo")?;
    m_foo.set(&mut object, 50)?;
    let fifty = m_foo.get(&object)?;

    println!(
        "object.foo() was {hundred}, now object.m_foo == {fifty} ({:?}).",
        object
    );

    match understory_accessor::resolve::<MyObject, _>(Declared::<i64>::boxed(), "foo") {
        Err(err @ ResolveError::TypeMismatch { .. }) => println!("as i64: {err}"),
        other => println!("as i64: unexpected {other:?}"),
    }

    Ok(())
}
