use crate::commands::{
    error::{CommandResult, InternalError},
    value::{ArgumentValue, Value},
};
use rustc_hash::{FxHashMap, FxHashSet};

pub struct ArgumentSet {
    args: FxHashMap<String, Value>,
}

impl ArgumentSet {
    pub(crate) fn empty() -> Self {
        Self {
            args: FxHashMap::default(),
        }
    }

    pub(crate) fn new(args: Vec<(String, Value)>) -> Self {
        Self {
            args: args.into_iter().collect(),
        }
    }

    fn get_raw(&self, name: &str) -> CommandResult<&Value> {
        self.args.get(name).ok_or_else(|| {
            InternalError::MissingArgument {
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    /// Typed lookup, used for aggregate outputs and other custom values.
    pub fn get<T: ArgumentValue>(&self, name: &str) -> CommandResult<T> {
        Ok(T::from_value(name, self.get_raw(name)?)?)
    }

    pub fn get_string(&self, name: &str) -> CommandResult<String> {
        self.get(name)
    }

    pub fn get_integer(&self, name: &str) -> CommandResult<i32> {
        self.get(name)
    }

    pub fn get_float(&self, name: &str) -> CommandResult<f32> {
        self.get(name)
    }

    pub fn get_boolean(&self, name: &str) -> CommandResult<bool> {
        self.get(name)
    }

    pub fn get_greedy(&self, name: &str) -> CommandResult<String> {
        match self.get_raw(name)? {
            Value::GreedyString(s) => Ok(s.clone()),
            _ => Err(InternalError::WrongArgumentType {
                name: name.to_string(),
                expected: "Greedy".to_string(),
            }
            .into()),
        }
    }

    pub fn get_flags(&self, name: &str) -> CommandResult<FxHashSet<String>> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::error::CommandError;

    fn set() -> ArgumentSet {
        ArgumentSet::new(vec![
            ("count".to_string(), Value::Integer(3)),
            ("scale".to_string(), Value::Float(0.5)),
            ("loud".to_string(), Value::Boolean(true)),
            ("text".to_string(), Value::GreedyString("a b".to_string())),
        ])
    }

    #[test]
    fn typed_getters() {
        let args = set();
        assert!(args.contains("count"));
        assert_eq!(args.get_integer("count").unwrap(), 3);
        assert_eq!(args.get_float("scale").unwrap(), 0.5);
        assert!(args.get_boolean("loud").unwrap());
        assert_eq!(args.get_greedy("text").unwrap(), "a b");
        assert_eq!(args.get_string("text").unwrap(), "a b");
    }

    #[test]
    fn missing_and_mistyped_arguments_are_internal_errors() {
        let args = set();
        assert!(matches!(
            args.get_integer("nope"),
            Err(CommandError::Internal(InternalError::MissingArgument { .. }))
        ));
        assert!(matches!(
            args.get_boolean("count"),
            Err(CommandError::Internal(InternalError::WrongArgumentType { ref name, .. }))
                if name == "count"
        ));
        assert!(matches!(
            args.get_greedy("loud"),
            Err(CommandError::Internal(InternalError::WrongArgumentType { ref name, .. }))
                if name == "loud"
        ));
        assert!(!ArgumentSet::empty().contains("count"));
    }
}
