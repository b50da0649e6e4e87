use crate::commands::error::InternalError;
use rustc_hash::FxHashSet;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A parsed value of a type the engine does not know about, such as the
/// output of an aggregate parser.
#[derive(Clone)]
pub struct CustomValue {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl CustomValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: type_name::<T>(),
            value: Arc::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custom({})", self.type_name)
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Integer(i32),
    Float(f32),
    Boolean(bool),
    GreedyString(String),
    Flags(FxHashSet<String>),
    Custom(CustomValue),
}

impl Value {
    fn type_error(name: &str, expected: &str) -> InternalError {
        InternalError::WrongArgumentType {
            name: name.to_string(),
            expected: expected.to_string(),
        }
    }
}

/// Conversion between a Rust type and the engine's [`Value`].
///
/// `name` is the argument or component the value was parsed for and only
/// appears in errors.
///
/// The provided methods store the value type-erased in [`Value::Custom`], so
/// user types only need an empty impl:
///
/// ```
/// use cloud_core::commands::value::ArgumentValue;
///
/// #[derive(Clone)]
/// struct Point(i32, i32);
///
/// impl ArgumentValue for Point {}
/// ```
pub trait ArgumentValue: Clone + Send + Sync + 'static {
    fn from_value(name: &str, value: &Value) -> Result<Self, InternalError> {
        match value {
            Value::Custom(custom) => custom
                .downcast_ref::<Self>()
                .cloned()
                .ok_or_else(|| Value::type_error(name, type_name::<Self>())),
            _ => Err(Value::type_error(name, type_name::<Self>())),
        }
    }

    fn into_value(self) -> Value {
        Value::Custom(CustomValue::new(self))
    }
}

impl ArgumentValue for String {
    fn from_value(name: &str, value: &Value) -> Result<Self, InternalError> {
        match value {
            Value::String(s) | Value::GreedyString(s) => Ok(s.clone()),
            _ => Err(Value::type_error(name, "String")),
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl ArgumentValue for i32 {
    fn from_value(name: &str, value: &Value) -> Result<Self, InternalError> {
        match value {
            Value::Integer(i) => Ok(*i),
            _ => Err(Value::type_error(name, "Integer")),
        }
    }

    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl ArgumentValue for f32 {
    fn from_value(name: &str, value: &Value) -> Result<Self, InternalError> {
        match value {
            Value::Float(f) => Ok(*f),
            _ => Err(Value::type_error(name, "Float")),
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl ArgumentValue for bool {
    fn from_value(name: &str, value: &Value) -> Result<Self, InternalError> {
        match value {
            Value::Boolean(b) => Ok(*b),
            _ => Err(Value::type_error(name, "Boolean")),
        }
    }

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }
}

impl ArgumentValue for FxHashSet<String> {
    fn from_value(name: &str, value: &Value) -> Result<Self, InternalError> {
        match value {
            Value::Flags(f) => Ok(f.clone()),
            _ => Err(Value::type_error(name, "Flags")),
        }
    }

    fn into_value(self) -> Value {
        Value::Flags(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Point(i32, i32);

    impl ArgumentValue for Point {}

    #[test]
    fn custom_values_round_trip_through_value() {
        let value = Point(3, -4).into_value();
        assert!(matches!(&value, Value::Custom(c) if c.type_name().ends_with("Point")));
        assert_eq!(Point::from_value("point", &value).unwrap(), Point(3, -4));
    }

    #[test]
    fn wrong_type_is_an_internal_error() {
        let err = i32::from_value("count", &Value::Boolean(true)).unwrap_err();
        assert!(matches!(
            err,
            InternalError::WrongArgumentType { ref name, ref expected }
                if name == "count" && expected == "Integer"
        ));
        assert!(Point::from_value("point", &Value::Integer(1)).is_err());
    }

    #[test]
    fn greedy_strings_read_as_strings() {
        let value = Value::GreedyString("hello world".to_string());
        assert_eq!(String::from_value("text", &value).unwrap(), "hello world");
    }
}
