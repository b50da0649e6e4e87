//! Aggregate arguments: several child components parsed in sequence and
//! fused into a single value by a mapper.
//!
//! ```
//! use cloud_core::commands::aggregate::{component, AggregateParserTripletBuilder};
//! use cloud_core::commands::node::CommandNode;
//!
//! let position = AggregateParserTripletBuilder::triplet(
//!     component::integer("x", i32::MIN, i32::MAX),
//!     component::integer("y", -64, 320),
//!     component::integer("z", i32::MIN, i32::MAX),
//! )
//! .build()
//! .unwrap();
//! let node = CommandNode::literal("goto").then(CommandNode::argument("position", position));
//! ```

pub mod component;
pub mod pair;
pub mod triplet;

pub use component::{ComponentSpec, TypedComponent};
pub use pair::AggregateParserPairBuilder;
pub use triplet::AggregateParserTripletBuilder;

use crate::commands::{
    argument::ArgumentType,
    argument_parser::{ArgumentParseResult, TokenParseResult},
    context::CommandContext,
    error::{ArgumentParseError, InternalError},
    value::{ArgumentValue, Value},
};
use futures::future::{self, BoxFuture, FutureExt};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Wraps an already known value in a completed parse result.
pub fn success_future<T: Send + 'static>(value: T) -> BoxFuture<'static, ArgumentParseResult<T>> {
    future::ready(Ok(value)).boxed()
}

pub fn failure_future<T: Send + 'static>(
    error: ArgumentParseError,
) -> BoxFuture<'static, ArgumentParseResult<T>> {
    future::ready(Err(error)).boxed()
}

/// Type descriptor for the value an aggregate parser produces.
pub struct OutputType<O>(PhantomData<fn() -> O>);

impl<O> OutputType<O> {
    pub fn new() -> Self {
        OutputType(PhantomData)
    }

    pub fn name(&self) -> &'static str {
        type_name::<O>()
    }
}

impl<O> Default for OutputType<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Clone for OutputType<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for OutputType<O> {}

impl<O> fmt::Debug for OutputType<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OutputType<{}>", self.name())
    }
}

/// Values parsed by the children of an aggregate, keyed by component name.
#[derive(Debug, Clone, Default)]
pub struct AggregateContext {
    values: IndexMap<String, Value>,
}

impl AggregateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get<T: ArgumentValue>(&self, name: &str) -> Result<T, InternalError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| InternalError::MissingArgument {
                name: name.to_string(),
            })?;
        T::from_value(name, value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Component names and values in parse order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl ArgumentValue for AggregateContext {}

/// Fuses the values of all children into the output of an aggregate.
pub trait AggregateResultMapper<O>: Send + Sync {
    fn map(
        &self,
        ctx: &CommandContext,
        aggregate: &AggregateContext,
    ) -> BoxFuture<'static, ArgumentParseResult<O>>;
}

impl<O, F> AggregateResultMapper<O> for F
where
    F: Fn(&CommandContext, &AggregateContext) -> BoxFuture<'static, ArgumentParseResult<O>>
        + Send
        + Sync,
{
    fn map(
        &self,
        ctx: &CommandContext,
        aggregate: &AggregateContext,
    ) -> BoxFuture<'static, ArgumentParseResult<O>> {
        self(ctx, aggregate)
    }
}

/// Adapts a mapper that cannot fail into one returning a parse result.
///
/// Implements the `Mapper` trait of every fixed-arity builder for which the
/// inner value is a matching `DirectSuccessMapper`.
pub struct DirectMapper<M>(pub(crate) M);

impl<M> DirectMapper<M> {
    pub fn get_ref(&self) -> &M {
        &self.0
    }

    pub fn into_inner(self) -> M {
        self.0
    }
}

/// Object-safe view of an aggregate parser, stored in [`ArgumentType::Aggregate`].
pub trait AggregateArgument: Send + Sync {
    fn components(&self) -> &[ComponentSpec];

    fn output_type_name(&self) -> &'static str;

    fn parse<'a>(
        &'a self,
        ctx: &'a CommandContext,
        input: &'a str,
    ) -> BoxFuture<'a, TokenParseResult<'a>>;

    /// Completions for whichever component the end of `input` falls into.
    fn complete<'a>(&'a self, ctx: &'a CommandContext, input: &'a str) -> BoxFuture<'a, Vec<String>> {
        async move {
            let mut remaining = input;
            for component in self.components() {
                if is_last_token(remaining) {
                    return component.arg_type().complete(ctx, remaining).await;
                }
                match component.arg_type().parse(ctx, remaining).await {
                    Ok((_, rest)) => remaining = rest,
                    Err(_) => return component.arg_type().complete(ctx, remaining).await,
                }
            }
            Vec::new()
        }
        .boxed()
    }
}

/// Whether `input` holds at most one token and no whitespace after it.
pub(crate) fn is_last_token(input: &str) -> bool {
    !input.trim_start().contains(char::is_whitespace)
}

pub struct AggregateParserBuilder<O> {
    components: Vec<ComponentSpec>,
    mapper: Arc<dyn AggregateResultMapper<O>>,
    output_type: OutputType<O>,
}

impl AggregateParserBuilder<AggregateContext> {
    /// Starts a builder whose mapper hands out the [`AggregateContext`] itself.
    pub fn new(components: Vec<ComponentSpec>) -> Self {
        Self {
            components,
            mapper: Arc::new(|_: &CommandContext, aggregate: &AggregateContext| {
                success_future(aggregate.clone())
            }),
            output_type: OutputType::new(),
        }
    }
}

impl<O: ArgumentValue> AggregateParserBuilder<O> {
    pub fn with_component(mut self, component: impl Into<ComponentSpec>) -> Self {
        self.components.push(component.into());
        self
    }

    pub fn with_mapper<O1: ArgumentValue>(
        self,
        output_type: OutputType<O1>,
        mapper: impl AggregateResultMapper<O1> + 'static,
    ) -> AggregateParserBuilder<O1> {
        AggregateParserBuilder {
            components: self.components,
            mapper: Arc::new(mapper),
            output_type,
        }
    }

    pub fn with_direct_mapper<O1, F>(
        self,
        output_type: OutputType<O1>,
        mapper: F,
    ) -> AggregateParserBuilder<O1>
    where
        O1: ArgumentValue,
        F: Fn(&CommandContext, &AggregateContext) -> O1 + Send + Sync + 'static,
    {
        self.with_mapper(
            output_type,
            move |ctx: &CommandContext, aggregate: &AggregateContext| {
                success_future(mapper(ctx, aggregate))
            },
        )
    }

    pub fn build(self) -> Result<AggregateParser<O>, InternalError> {
        if self.components.is_empty() {
            return Err(InternalError::EmptyAggregate);
        }
        let mut seen = FxHashSet::default();
        for component in &self.components {
            if !seen.insert(component.name()) {
                return Err(InternalError::DuplicateComponent {
                    name: component.name().to_string(),
                });
            }
        }
        Ok(AggregateParser {
            components: self.components,
            mapper: self.mapper,
            output_type: self.output_type,
        })
    }
}

/// Parses its components one after another, then maps their values to `O`.
pub struct AggregateParser<O> {
    components: Vec<ComponentSpec>,
    mapper: Arc<dyn AggregateResultMapper<O>>,
    output_type: OutputType<O>,
}

impl<O> Clone for AggregateParser<O> {
    fn clone(&self) -> Self {
        Self {
            components: self.components.clone(),
            mapper: Arc::clone(&self.mapper),
            output_type: self.output_type,
        }
    }
}

impl<O: ArgumentValue> AggregateParser<O> {
    pub fn components(&self) -> &[ComponentSpec] {
        &self.components
    }

    pub fn output_type(&self) -> OutputType<O> {
        self.output_type
    }

    /// Parses from the start of `input`, returning the output and the rest.
    pub async fn parse_value<'a>(
        &'a self,
        ctx: &'a CommandContext,
        input: &'a str,
    ) -> ArgumentParseResult<(O, &'a str)> {
        let mut aggregate = AggregateContext::new();
        let mut remaining = input;
        for component in &self.components {
            let (value, rest) = component.arg_type().parse(ctx, remaining).await?;
            aggregate.insert(component.name(), value);
            remaining = rest;
        }
        let output = self.mapper.map(ctx, &aggregate).await?;
        Ok((output, remaining))
    }
}

impl<O: ArgumentValue> AggregateArgument for AggregateParser<O> {
    fn components(&self) -> &[ComponentSpec] {
        &self.components
    }

    fn output_type_name(&self) -> &'static str {
        self.output_type.name()
    }

    fn parse<'a>(
        &'a self,
        ctx: &'a CommandContext,
        input: &'a str,
    ) -> BoxFuture<'a, TokenParseResult<'a>> {
        async move {
            let (output, rest) = self.parse_value(ctx, input).await?;
            Ok((output.into_value(), rest))
        }
        .boxed()
    }
}

impl<O: ArgumentValue> From<AggregateParser<O>> for ArgumentType {
    fn from(parser: AggregateParser<O>) -> Self {
        ArgumentType::Aggregate(Arc::new(parser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::CommandSender;

    fn ctx() -> CommandContext {
        CommandContext::new(CommandSender::Console, "")
    }

    #[tokio::test]
    async fn default_mapper_returns_the_context() {
        let parser = AggregateParserBuilder::new(vec![
            component::string("name").into(),
            component::integer("age", 0, 150).into(),
        ])
        .build()
        .unwrap();

        let ctx = ctx();
        let (aggregate, rest) = parser.parse_value(&ctx, "steve 31 tail").await.unwrap();
        assert_eq!(rest, " tail");
        assert_eq!(aggregate.get::<String>("name").unwrap(), "steve");
        assert_eq!(aggregate.get::<i32>("age").unwrap(), 31);
        let names: Vec<_> = aggregate.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["name", "age"]);
    }

    #[tokio::test]
    async fn child_failure_stops_before_mapping() {
        let parser = AggregateParserBuilder::new(vec![])
            .with_component(component::integer("a", 0, 10))
            .with_component(component::integer("b", 0, 10))
            .with_mapper(
                OutputType::<i32>::new(),
                |_: &CommandContext, _: &AggregateContext| -> BoxFuture<'static, ArgumentParseResult<i32>> {
                    panic!("mapper must not run")
                },
            )
            .build()
            .unwrap();

        let ctx = ctx();
        assert!(matches!(
            parser.parse_value(&ctx, "1 x").await,
            Err(ArgumentParseError::InvalidInteger { .. })
        ));
    }

    #[tokio::test]
    async fn mapper_failures_propagate() {
        let parser = AggregateParserBuilder::new(vec![component::integer("n", 0, 100).into()])
            .with_mapper(
                OutputType::<i32>::new(),
                |_: &CommandContext, aggregate: &AggregateContext| match aggregate.get::<i32>("n") {
                    Ok(n) if n % 2 == 0 => success_future(n / 2),
                    _ => failure_future(ArgumentParseError::failure("must be even")),
                },
            )
            .build()
            .unwrap();

        let ctx = ctx();
        assert_eq!(parser.parse_value(&ctx, "8").await.unwrap().0, 4);
        assert_eq!(
            parser.parse_value(&ctx, "7").await.unwrap_err(),
            ArgumentParseError::failure("must be even")
        );
    }

    #[test]
    fn build_rejects_empty_and_duplicate_components() {
        assert!(matches!(
            AggregateParserBuilder::new(vec![]).build(),
            Err(InternalError::EmptyAggregate)
        ));
        let duplicated = AggregateParserBuilder::new(vec![
            component::integer("x", 0, 1).into(),
            component::string("x").into(),
        ])
        .build();
        assert!(matches!(
            duplicated,
            Err(InternalError::DuplicateComponent { ref name }) if name == "x"
        ));
    }

    #[tokio::test]
    async fn completes_the_component_under_the_cursor() {
        let parser: ArgumentType = AggregateParserBuilder::new(vec![
            component::integer("count", 0, 64).into(),
            component::boolean("silent").into(),
            component::choice("side", ["left", "right"]).into(),
        ])
        .build()
        .unwrap()
        .into();

        let ctx = ctx();
        assert!(parser.complete(&ctx, "1").await.is_empty());
        assert_eq!(parser.complete(&ctx, "1 ").await, vec!["true", "false"]);
        assert_eq!(parser.complete(&ctx, "1 f").await, vec!["false"]);
        assert_eq!(parser.complete(&ctx, "1 true r").await, vec!["right"]);
        assert!(parser.complete(&ctx, "x true ").await.is_empty());
    }

    #[test]
    fn is_last_token_checks_trailing_whitespace() {
        assert!(is_last_token(""));
        assert!(is_last_token("  abc"));
        assert!(!is_last_token("abc "));
        assert!(!is_last_token("abc def"));
    }
}
