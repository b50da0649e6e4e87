use super::aggregate::{is_last_token, AggregateArgument};
use super::argument_parser::*;
use super::context::CommandContext;
use super::error::ArgumentParseError;
use super::value::Value;
use futures::future::{self, BoxFuture, FutureExt};
use std::sync::Arc;

#[derive(Clone)]
pub enum ArgumentType {
    String,
    Integer { min: i32, max: i32 },
    Float { min: f32, max: f32 },
    Boolean,
    Choice { choices: Vec<String> },
    GreedyString,
    Flags { flags: Vec<FlagSpec> },
    Aggregate(Arc<dyn AggregateArgument>),
}

#[derive(Default, Clone)]
pub struct ArgumentTypeFlagBuilder {
    flags: Vec<FlagSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlagSpec {
    pub(crate) short: Option<char>,
    pub(crate) long: String,
    pub(crate) description: Option<String>,
}

pub struct OptionChar(Option<char>);

pub struct OptionString(Option<String>);

impl ArgumentType {
    pub(crate) fn parse<'a>(
        &'a self,
        ctx: &'a CommandContext,
        input: &'a str,
    ) -> BoxFuture<'a, TokenParseResult<'a>> {
        let result = match self {
            ArgumentType::Aggregate(parser) => return parser.parse(ctx, input),
            ArgumentType::String => parse_string(input),
            ArgumentType::Integer { min, max } => parse_integer(input).and_then(|(value, rest)| {
                if let Value::Integer(value) = value {
                    if !(*min..=*max).contains(&value) {
                        return Err(out_of_range(value, min, max));
                    }
                }
                Ok((value, rest))
            }),
            ArgumentType::Float { min, max } => parse_float(input).and_then(|(value, rest)| {
                if let Value::Float(value) = value {
                    if !(*min..=*max).contains(&value) {
                        return Err(out_of_range(value, min, max));
                    }
                }
                Ok((value, rest))
            }),
            ArgumentType::Boolean => parse_boolean(input),
            ArgumentType::Choice { choices } => parse_choice(input, choices),
            ArgumentType::GreedyString => parse_greedy_string(input),
            ArgumentType::Flags { flags: specs } => parse_flags(input, specs),
        };
        future::ready(result).boxed()
    }

    /// Completions for the end of `input`, which starts at this argument.
    pub(crate) fn complete<'a>(
        &'a self,
        ctx: &'a CommandContext,
        input: &'a str,
    ) -> BoxFuture<'a, Vec<String>> {
        let suggestions = match self {
            ArgumentType::Aggregate(parser) => return parser.complete(ctx, input),
            _ if self.is_greedy() => {
                let token = input.rsplit(char::is_whitespace).next().unwrap_or_default();
                self.suggestions(token)
            }
            _ if is_last_token(input) => self.suggestions(input.trim_start()),
            _ => Vec::new(),
        };
        future::ready(suggestions).boxed()
    }

    /// Completions for the partially typed `token`.
    pub(crate) fn suggestions(&self, token: &str) -> Vec<String> {
        let candidates: Vec<String> = match self {
            ArgumentType::Boolean => vec!["true".to_string(), "false".to_string()],
            ArgumentType::Choice { choices } => choices.clone(),
            ArgumentType::Flags { flags } => flags.iter().map(|f| format!("--{}", f.long)).collect(),
            _ => Vec::new(),
        };
        let token = token.to_lowercase();
        candidates
            .into_iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&token))
            .collect()
    }

    /// Greedy arguments may match empty input and always end a command.
    pub(crate) fn is_greedy(&self) -> bool {
        matches!(self, ArgumentType::GreedyString | ArgumentType::Flags { .. })
    }

    pub fn string() -> Self {
        ArgumentType::String
    }

    pub fn integer(min: i32, max: i32) -> Self {
        ArgumentType::Integer { min, max }
    }

    pub fn float(min: f32, max: f32) -> Self {
        ArgumentType::Float { min, max }
    }

    pub fn boolean() -> Self {
        ArgumentType::Boolean
    }

    pub fn choice<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ArgumentType::Choice {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn greedy_string() -> Self {
        ArgumentType::GreedyString
    }

    pub fn flags() -> ArgumentTypeFlagBuilder {
        ArgumentTypeFlagBuilder::default()
    }
}

fn out_of_range<T: ToString>(value: T, min: &T, max: &T) -> ArgumentParseError {
    ArgumentParseError::OutOfRange {
        value: value.to_string(),
        min: min.to_string(),
        max: max.to_string(),
    }
}

impl ArgumentTypeFlagBuilder {
    pub fn add(
        mut self,
        short: impl Into<OptionChar>,
        long: &str,
        description: impl Into<OptionString>,
    ) -> Self {
        self.flags.push(FlagSpec {
            short: short.into().0,
            long: long.to_string(),
            description: description.into().0,
        });
        self
    }

    pub fn build(self) -> ArgumentType {
        ArgumentType::Flags { flags: self.flags }
    }
}

impl From<ArgumentTypeFlagBuilder> for ArgumentType {
    fn from(value: ArgumentTypeFlagBuilder) -> Self {
        value.build()
    }
}

impl From<char> for OptionChar {
    fn from(c: char) -> Self {
        OptionChar(Some(c))
    }
}

impl From<Option<char>> for OptionChar {
    fn from(o: Option<char>) -> Self {
        OptionChar(o)
    }
}

impl From<&str> for OptionString {
    fn from(s: &str) -> Self {
        OptionString(Some(s.to_string()))
    }
}

impl From<Option<&str>> for OptionString {
    fn from(o: Option<&str>) -> Self {
        OptionString(o.map(|s| s.to_string()))
    }
}
