use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use expect_test::expect;
use rflags::{Context, Flag, Slot};

use crate::{parse_err, parse_ok};

fn ctx_with(name: &str, slot: Slot) -> Context {
    let mut ctx = Context::new();
    ctx.add_flag(Flag::new(name, slot)).unwrap();
    ctx
}

#[test]
fn int64_round_trip() {
    let value = Rc::new(Cell::new(0i64));
    let ctx = ctx_with("n", Slot::Int64(Rc::clone(&value)));

    parse_ok(&ctx, "-n -42");
    assert_eq!(value.get(), -42);
    parse_ok(&ctx, "--n +99");
    assert_eq!(value.get(), 99);
    parse_ok(&ctx, "-n 9223372036854775807");
    assert_eq!(value.get(), i64::MAX);
    parse_ok(&ctx, "-n -9223372036854775808");
    assert_eq!(value.get(), i64::MIN);

    expect![[r#"i64 overflow for flag `n`: `9223372036854775808`"#]]
        .assert_eq(&parse_err(&ctx, "-n 9223372036854775808"));
}

#[test]
fn int8_boundaries() {
    let value = Rc::new(Cell::new(0i8));
    let ctx = ctx_with("n", Slot::Int8(Rc::clone(&value)));

    parse_ok(&ctx, "-n -128");
    assert_eq!(value.get(), -128);
    parse_ok(&ctx, "-n 127");
    assert_eq!(value.get(), 127);

    expect![[r#"i8 overflow for flag `n`: `128`"#]].assert_eq(&parse_err(&ctx, "-n 128"));
    expect![[r#"i8 overflow for flag `n`: `-129`"#]].assert_eq(&parse_err(&ctx, "-n -129"));
}

#[test]
fn int16_and_int32_boundaries() {
    let value = Rc::new(Cell::new(0i16));
    let ctx = ctx_with("n", Slot::Int16(Rc::clone(&value)));
    parse_ok(&ctx, "-n -32768");
    parse_ok(&ctx, "-n 32767");
    assert_eq!(value.get(), 32767);
    expect![[r#"i16 overflow for flag `n`: `32768`"#]].assert_eq(&parse_err(&ctx, "-n 32768"));

    let value = Rc::new(Cell::new(0i32));
    let ctx = ctx_with("n", Slot::Int32(Rc::clone(&value)));
    parse_ok(&ctx, "-n 2147483647");
    assert_eq!(value.get(), i32::MAX);
    expect![[r#"i32 overflow for flag `n`: `-2147483649`"#]]
        .assert_eq(&parse_err(&ctx, "-n -2147483649"));
}

#[test]
fn integer_lexical_check_runs_first() {
    let value = Rc::new(Cell::new(0i32));
    let ctx = ctx_with("n", Slot::Int(Rc::clone(&value)));

    expect![[r#"invalid i32 value for flag `n`: `abc`"#]].assert_eq(&parse_err(&ctx, "-n abc"));
    expect![[r#"invalid i32 value for flag `n`: `+`"#]].assert_eq(&parse_err(&ctx, "-n +"));
    expect![[r#"invalid i32 value for flag `n`: `12.5`"#]].assert_eq(&parse_err(&ctx, "-n 12.5"));
    expect![[r#"invalid i32 value for flag `n`: `1_000`"#]].assert_eq(&parse_err(&ctx, "-n 1_000"));
    assert_eq!(value.get(), 0);
}

#[test]
fn unsigned_boundaries() {
    let value = Rc::new(Cell::new(0u8));
    let ctx = ctx_with("n", Slot::UInt8(Rc::clone(&value)));
    parse_ok(&ctx, "-n 0");
    parse_ok(&ctx, "-n 255");
    assert_eq!(value.get(), 255);
    expect![[r#"u8 overflow for flag `n`: `256`"#]].assert_eq(&parse_err(&ctx, "-n 256"));
    expect![[r#"u8 overflow for flag `n`: `-1`"#]].assert_eq(&parse_err(&ctx, "-n -1"));

    let value = Rc::new(Cell::new(0u16));
    let ctx = ctx_with("n", Slot::UInt16(Rc::clone(&value)));
    parse_ok(&ctx, "-n 65535");
    assert_eq!(value.get(), u16::MAX);
    expect![[r#"u16 overflow for flag `n`: `65536`"#]].assert_eq(&parse_err(&ctx, "-n 65536"));

    let value = Rc::new(Cell::new(0u32));
    let ctx = ctx_with("n", Slot::UInt(Rc::clone(&value)));
    parse_ok(&ctx, "-n 4294967295");
    assert_eq!(value.get(), u32::MAX);
    expect![[r#"u32 overflow for flag `n`: `4294967296`"#]]
        .assert_eq(&parse_err(&ctx, "-n 4294967296"));

    let value = Rc::new(Cell::new(0u64));
    let ctx = ctx_with("n", Slot::UInt64(Rc::clone(&value)));
    parse_ok(&ctx, "-n 18446744073709551615");
    assert_eq!(value.get(), u64::MAX);
    expect![[r#"u64 overflow for flag `n`: `18446744073709551616`"#]]
        .assert_eq(&parse_err(&ctx, "-n 18446744073709551616"));
}

#[test]
fn size_and_pointer_width() {
    let value = Rc::new(Cell::new(0usize));
    let ctx = ctx_with("n", Slot::SizeT(Rc::clone(&value)));
    parse_ok(&ctx, "-n 4096");
    assert_eq!(value.get(), 4096);
    expect![[r#"usize overflow for flag `n`: `-1`"#]].assert_eq(&parse_err(&ctx, "-n -1"));

    let value = Rc::new(Cell::new(0usize));
    let ctx = ctx_with("p", Slot::UIntPtr(Rc::clone(&value)));
    parse_ok(&ctx, "-p 140737488355328");
    assert_eq!(value.get(), 140737488355328);
}

#[test]
fn floats() {
    let value = Rc::new(Cell::new(0f32));
    let ctx = ctx_with("x", Slot::Float32(Rc::clone(&value)));
    parse_ok(&ctx, "-x 3.5");
    assert_eq!(value.get(), 3.5);
    parse_ok(&ctx, "-x -inf");
    assert_eq!(value.get(), f32::NEG_INFINITY);
    expect![[r#"f32 overflow for flag `x`: `1e39`"#]].assert_eq(&parse_err(&ctx, "-x 1e39"));
    expect![[r#"invalid f32 value for flag `x`: `fast`"#]].assert_eq(&parse_err(&ctx, "-x fast"));

    let value = Rc::new(Cell::new(0f64));
    let ctx = ctx_with("x", Slot::Float64(Rc::clone(&value)));
    parse_ok(&ctx, "-x 2.5e300");
    assert_eq!(value.get(), 2.5e300);
    expect![[r#"f64 overflow for flag `x`: `1e309`"#]].assert_eq(&parse_err(&ctx, "-x 1e309"));
}

#[test]
fn bool_literals_are_case_insensitive() {
    let value = Rc::new(Cell::new(false));
    let ctx = ctx_with("v", Slot::Bool(Rc::clone(&value)));
    parse_ok(&ctx, "-v TRUE");
    assert!(value.get());
    parse_ok(&ctx, "-v False");
    assert!(!value.get());
}

#[test]
fn string_takes_next_token_verbatim() {
    let value = Rc::new(RefCell::new(String::new()));
    let ctx = ctx_with("name", Slot::String(Rc::clone(&value)));
    parse_ok(&ctx, "-name hello");
    assert_eq!(*value.borrow(), "hello");
    parse_ok(&ctx, "-name 127");
    assert_eq!(*value.borrow(), "127");
}
