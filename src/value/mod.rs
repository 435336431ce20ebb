use crate::{resolve::CoreTypes, types::TypeDescription};
use std::sync::Arc;

pub mod object;

pub use object::ObjectRef;

/// A call argument or return value. Every variant except `Null` and `Missing`
/// carries a concrete runtime type.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    /// Stands in for an omitted optional argument (`Type.Missing`).
    Missing,
    Boolean(bool),
    Char(char),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    NativeInt(isize),
    NativeUInt(usize),
    Float32(f32),
    Float64(f64),
    String(Arc<str>),
    Object(ObjectRef),
}

impl Value {
    pub fn runtime_type(&self, core: &CoreTypes) -> Option<TypeDescription> {
        Some(match self {
            Value::Null | Value::Missing => return None,
            Value::Boolean(_) => core.boolean,
            Value::Char(_) => core.char,
            Value::Int8(_) => core.sbyte,
            Value::UInt8(_) => core.byte,
            Value::Int16(_) => core.int16,
            Value::UInt16(_) => core.uint16,
            Value::Int32(_) => core.int32,
            Value::UInt32(_) => core.uint32,
            Value::Int64(_) => core.int64,
            Value::UInt64(_) => core.uint64,
            Value::NativeInt(_) => core.intptr,
            Value::NativeUInt(_) => core.uintptr,
            Value::Float32(_) => core.single,
            Value::Float64(_) => core.double,
            Value::String(_) => core.string,
            Value::Object(o) => o.runtime_type(),
        })
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Boolean,
    char => Char,
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    isize => NativeInt,
    usize => NativeUInt,
    f32 => Float32,
    f64 => Float64,
    ObjectRef => Object,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}
