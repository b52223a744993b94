use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use crate::{Error, Result};

/// The closed set of value types a flag can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagType {
    Bool,
    Int,
    SizeT,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UIntPtr,
    Float32,
    Float64,
    String,
}

impl FlagType {
    /// Canonical name used in help and error text.
    pub fn as_str(self) -> &'static str {
        match self {
            FlagType::Bool => "bool",
            FlagType::Int => "i32",
            FlagType::SizeT => "usize",
            FlagType::Int8 => "i8",
            FlagType::Int16 => "i16",
            FlagType::Int32 => "i32",
            FlagType::Int64 => "i64",
            FlagType::UInt => "u32",
            FlagType::UInt8 => "u8",
            FlagType::UInt16 => "u16",
            FlagType::UInt32 => "u32",
            FlagType::UInt64 => "u64",
            FlagType::UIntPtr => "usize",
            FlagType::Float32 => "f32",
            FlagType::Float64 => "f64",
            FlagType::String => "string",
        }
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed handle to caller-owned storage.
///
/// The parser writes matched values through the handle; the caller keeps its
/// own clone of the `Rc` and reads the result after parsing. `Int`/`Int32`
/// and friends are distinct tags for help text even where the Rust
/// representation coincides.
#[derive(Clone)]
pub enum Slot {
    Bool(Rc<Cell<bool>>),
    Int(Rc<Cell<i32>>),
    SizeT(Rc<Cell<usize>>),
    Int8(Rc<Cell<i8>>),
    Int16(Rc<Cell<i16>>),
    Int32(Rc<Cell<i32>>),
    Int64(Rc<Cell<i64>>),
    UInt(Rc<Cell<u32>>),
    UInt8(Rc<Cell<u8>>),
    UInt16(Rc<Cell<u16>>),
    UInt32(Rc<Cell<u32>>),
    UInt64(Rc<Cell<u64>>),
    UIntPtr(Rc<Cell<usize>>),
    Float32(Rc<Cell<f32>>),
    Float64(Rc<Cell<f64>>),
    String(Rc<RefCell<String>>),
}

impl Slot {
    pub fn ty(&self) -> FlagType {
        match self {
            Slot::Bool(_) => FlagType::Bool,
            Slot::Int(_) => FlagType::Int,
            Slot::SizeT(_) => FlagType::SizeT,
            Slot::Int8(_) => FlagType::Int8,
            Slot::Int16(_) => FlagType::Int16,
            Slot::Int32(_) => FlagType::Int32,
            Slot::Int64(_) => FlagType::Int64,
            Slot::UInt(_) => FlagType::UInt,
            Slot::UInt8(_) => FlagType::UInt8,
            Slot::UInt16(_) => FlagType::UInt16,
            Slot::UInt32(_) => FlagType::UInt32,
            Slot::UInt64(_) => FlagType::UInt64,
            Slot::UIntPtr(_) => FlagType::UIntPtr,
            Slot::Float32(_) => FlagType::Float32,
            Slot::Float64(_) => FlagType::Float64,
            Slot::String(_) => FlagType::String,
        }
    }

    /// Snapshot of the current stored value.
    pub fn get(&self) -> Value {
        match self {
            Slot::Bool(it) => Value::Bool(it.get()),
            Slot::Int(it) => Value::Int(it.get()),
            Slot::SizeT(it) => Value::SizeT(it.get()),
            Slot::Int8(it) => Value::Int8(it.get()),
            Slot::Int16(it) => Value::Int16(it.get()),
            Slot::Int32(it) => Value::Int32(it.get()),
            Slot::Int64(it) => Value::Int64(it.get()),
            Slot::UInt(it) => Value::UInt(it.get()),
            Slot::UInt8(it) => Value::UInt8(it.get()),
            Slot::UInt16(it) => Value::UInt16(it.get()),
            Slot::UInt32(it) => Value::UInt32(it.get()),
            Slot::UInt64(it) => Value::UInt64(it.get()),
            Slot::UIntPtr(it) => Value::UIntPtr(it.get()),
            Slot::Float32(it) => Value::Float32(it.get()),
            Slot::Float64(it) => Value::Float64(it.get()),
            Slot::String(it) => Value::String(it.borrow().clone()),
        }
    }

    /// Convert `token` per the slot's type and write it through.
    pub(crate) fn bind(&self, flag: &str, token: &str) -> Result<()> {
        match self {
            Slot::Bool(cell) => match parse_bool(token) {
                Some(value) => cell.set(value),
                None => return Err(invalid(flag, FlagType::Bool, token)),
            },
            Slot::Int(cell) => {
                cell.set(signed(flag, token, FlagType::Int, i32::MIN as i64, i32::MAX as i64)? as i32)
            }
            Slot::SizeT(cell) => {
                cell.set(unsigned(flag, token, FlagType::SizeT, usize::MAX as u64)? as usize)
            }
            Slot::Int8(cell) => {
                cell.set(signed(flag, token, FlagType::Int8, i8::MIN as i64, i8::MAX as i64)? as i8)
            }
            Slot::Int16(cell) => {
                cell.set(signed(flag, token, FlagType::Int16, i16::MIN as i64, i16::MAX as i64)? as i16)
            }
            Slot::Int32(cell) => {
                cell.set(signed(flag, token, FlagType::Int32, i32::MIN as i64, i32::MAX as i64)? as i32)
            }
            Slot::Int64(cell) => cell.set(signed(flag, token, FlagType::Int64, i64::MIN, i64::MAX)?),
            Slot::UInt(cell) => {
                cell.set(unsigned(flag, token, FlagType::UInt, u32::MAX as u64)? as u32)
            }
            Slot::UInt8(cell) => {
                cell.set(unsigned(flag, token, FlagType::UInt8, u8::MAX as u64)? as u8)
            }
            Slot::UInt16(cell) => {
                cell.set(unsigned(flag, token, FlagType::UInt16, u16::MAX as u64)? as u16)
            }
            Slot::UInt32(cell) => {
                cell.set(unsigned(flag, token, FlagType::UInt32, u32::MAX as u64)? as u32)
            }
            Slot::UInt64(cell) => cell.set(unsigned(flag, token, FlagType::UInt64, u64::MAX)?),
            Slot::UIntPtr(cell) => {
                cell.set(unsigned(flag, token, FlagType::UIntPtr, usize::MAX as u64)? as usize)
            }
            Slot::Float32(cell) => cell.set(float32(flag, token)?),
            Slot::Float64(cell) => cell.set(float64(flag, token)?),
            Slot::String(cell) => *cell.borrow_mut() = token.to_owned(),
        }
        Ok(())
    }
}

/// An owned snapshot of a bound value, as seen by validators and callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    SizeT(usize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt(u32),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    UIntPtr(usize),
    Float32(f32),
    Float64(f64),
    String(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(it) => Some(it),
            _ => None,
        }
    }

    /// Any signed integer variant, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(it) => Some(it.into()),
            Value::Int8(it) => Some(it.into()),
            Value::Int16(it) => Some(it.into()),
            Value::Int32(it) => Some(it.into()),
            Value::Int64(it) => Some(it),
            _ => None,
        }
    }

    /// Any unsigned integer variant, widened to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::SizeT(it) => Some(it as u64),
            Value::UInt(it) => Some(it.into()),
            Value::UInt8(it) => Some(it.into()),
            Value::UInt16(it) => Some(it.into()),
            Value::UInt32(it) => Some(it.into()),
            Value::UInt64(it) => Some(it),
            Value::UIntPtr(it) => Some(it as u64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float32(it) => Some(it.into()),
            Value::Float64(it) => Some(it),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(it) => Some(it),
            _ => None,
        }
    }
}

pub(crate) fn parse_bool(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Optional sign, then one or more ASCII digits. Checked before numeric
/// conversion so that a tolerant parser can't coerce garbage to 0.
fn is_decimal(token: &str) -> bool {
    let digits = token.strip_prefix(&['+', '-'][..]).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn signed(flag: &str, token: &str, ty: FlagType, min: i64, max: i64) -> Result<i64> {
    if !is_decimal(token) {
        return Err(invalid(flag, ty, token));
    }
    // A lexically valid literal that fails the wide parse is out of i64 range.
    let wide = token.parse::<i64>().map_err(|_| overflow(flag, ty, token))?;
    if wide < min || wide > max {
        return Err(overflow(flag, ty, token));
    }
    Ok(wide)
}

fn unsigned(flag: &str, token: &str, ty: FlagType, max: u64) -> Result<u64> {
    if !is_decimal(token) {
        return Err(invalid(flag, ty, token));
    }
    // Negative literals pass the lexical check and land here as overflow.
    let wide = token.parse::<u64>().map_err(|_| overflow(flag, ty, token))?;
    if wide > max {
        return Err(overflow(flag, ty, token));
    }
    Ok(wide)
}

fn float32(flag: &str, token: &str) -> Result<f32> {
    let value = token.parse::<f32>().map_err(|_| invalid(flag, FlagType::Float32, token))?;
    if value.is_infinite() && !is_infinity_literal(token) {
        return Err(overflow(flag, FlagType::Float32, token));
    }
    Ok(value)
}

fn float64(flag: &str, token: &str) -> Result<f64> {
    let value = token.parse::<f64>().map_err(|_| invalid(flag, FlagType::Float64, token))?;
    if value.is_infinite() && !is_infinity_literal(token) {
        return Err(overflow(flag, FlagType::Float64, token));
    }
    Ok(value)
}

fn is_infinity_literal(token: &str) -> bool {
    let body = token.strip_prefix(&['+', '-'][..]).unwrap_or(token);
    body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity")
}

fn invalid(flag: &str, ty: FlagType, token: &str) -> Error {
    Error::InvalidValue { flag: flag.to_owned(), ty, token: token.to_owned() }
}

fn overflow(flag: &str, ty: FlagType, token: &str) -> Error {
    Error::Overflow { flag: flag.to_owned(), ty, token: token.to_owned() }
}
