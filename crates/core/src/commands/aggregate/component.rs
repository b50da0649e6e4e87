use super::AggregateParser;
use crate::commands::{argument::ArgumentType, value::ArgumentValue};
use std::any::type_name;
use std::marker::PhantomData;

/// A named child of an aggregate, with its value type erased.
#[derive(Clone)]
pub struct ComponentSpec {
    name: String,
    arg_type: ArgumentType,
    value_type: &'static str,
}

impl ComponentSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arg_type(&self) -> &ArgumentType {
        &self.arg_type
    }

    pub fn value_type(&self) -> &'static str {
        self.value_type
    }
}

/// A named child of an aggregate that parses to a `T`.
///
/// The pairing of `T` with the argument type is checked when the value is
/// read back, not at construction.
pub struct TypedComponent<T> {
    spec: ComponentSpec,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ArgumentValue> TypedComponent<T> {
    pub fn new(name: impl Into<String>, arg_type: impl Into<ArgumentType>) -> Self {
        Self {
            spec: ComponentSpec {
                name: name.into(),
                arg_type: arg_type.into(),
                value_type: type_name::<T>(),
            },
            _marker: PhantomData,
        }
    }

    pub fn aggregate(name: impl Into<String>, parser: AggregateParser<T>) -> Self {
        Self::new(name, parser)
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn arg_type(&self) -> &ArgumentType {
        &self.spec.arg_type
    }
}

impl<T> Clone for TypedComponent<T> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> From<TypedComponent<T>> for ComponentSpec {
    fn from(component: TypedComponent<T>) -> Self {
        component.spec
    }
}

pub fn string(name: impl Into<String>) -> TypedComponent<String> {
    TypedComponent::new(name, ArgumentType::string())
}

pub fn integer(name: impl Into<String>, min: i32, max: i32) -> TypedComponent<i32> {
    TypedComponent::new(name, ArgumentType::integer(min, max))
}

pub fn float(name: impl Into<String>, min: f32, max: f32) -> TypedComponent<f32> {
    TypedComponent::new(name, ArgumentType::float(min, max))
}

pub fn boolean(name: impl Into<String>) -> TypedComponent<bool> {
    TypedComponent::new(name, ArgumentType::boolean())
}

pub fn choice<I, S>(name: impl Into<String>, choices: I) -> TypedComponent<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    TypedComponent::new(name, ArgumentType::choice(choices))
}
