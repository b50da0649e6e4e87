use super::{
    failure_future, success_future, AggregateContext, AggregateParser, AggregateParserBuilder,
    DirectMapper, OutputType, TypedComponent,
};
use crate::commands::{
    argument_parser::ArgumentParseResult,
    context::CommandContext,
    error::InternalError,
    value::ArgumentValue,
};
use crate::tuple::Pair;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Fuses the values of two components into an `O`, possibly failing.
pub trait Mapper<U, V, O>: Send + Sync {
    fn map(&self, ctx: &CommandContext, first: U, second: V)
        -> BoxFuture<'static, ArgumentParseResult<O>>;
}

impl<U, V, O, F> Mapper<U, V, O> for F
where
    F: Fn(&CommandContext, U, V) -> BoxFuture<'static, ArgumentParseResult<O>> + Send + Sync,
{
    fn map(
        &self,
        ctx: &CommandContext,
        first: U,
        second: V,
    ) -> BoxFuture<'static, ArgumentParseResult<O>> {
        self(ctx, first, second)
    }
}

pub trait DirectSuccessMapper<U, V, O>: Send + Sync {
    fn map_success(&self, ctx: &CommandContext, first: U, second: V) -> O;
}

impl<U, V, O, F> DirectSuccessMapper<U, V, O> for F
where
    F: Fn(&CommandContext, U, V) -> O + Send + Sync,
{
    fn map_success(&self, ctx: &CommandContext, first: U, second: V) -> O {
        self(ctx, first, second)
    }
}

impl<U, V, O, M> Mapper<U, V, O> for DirectMapper<M>
where
    M: DirectSuccessMapper<U, V, O>,
    O: Send + 'static,
{
    fn map(
        &self,
        ctx: &CommandContext,
        first: U,
        second: V,
    ) -> BoxFuture<'static, ArgumentParseResult<O>> {
        success_future(self.0.map_success(ctx, first, second))
    }
}

pub fn default_mapper<U, V>() -> impl Mapper<U, V, Pair<U, V>>
where
    U: ArgumentValue,
    V: ArgumentValue,
{
    |_: &CommandContext, first: U, second: V| success_future(Pair::of(first, second))
}

pub fn direct_mapper<U, V, O, M>(mapper: M) -> DirectMapper<M>
where
    M: DirectSuccessMapper<U, V, O>,
{
    DirectMapper(mapper)
}

/// Two-component counterpart of
/// [`AggregateParserTripletBuilder`](super::AggregateParserTripletBuilder).
pub struct AggregateParserPairBuilder<U, V, O> {
    mapper: Arc<dyn Mapper<U, V, O>>,
    output_type: OutputType<O>,
    first: TypedComponent<U>,
    second: TypedComponent<V>,
}

impl<U, V, O> Clone for AggregateParserPairBuilder<U, V, O> {
    fn clone(&self) -> Self {
        Self {
            mapper: Arc::clone(&self.mapper),
            output_type: self.output_type,
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

impl<U, V> AggregateParserPairBuilder<U, V, Pair<U, V>>
where
    U: ArgumentValue,
    V: ArgumentValue,
{
    pub fn pair(first: TypedComponent<U>, second: TypedComponent<V>) -> Self {
        Self::new(first, second, default_mapper(), OutputType::new())
    }
}

impl<U, V, O> AggregateParserPairBuilder<U, V, O>
where
    U: ArgumentValue,
    V: ArgumentValue,
    O: ArgumentValue,
{
    pub fn new(
        first: TypedComponent<U>,
        second: TypedComponent<V>,
        mapper: impl Mapper<U, V, O> + 'static,
        output_type: OutputType<O>,
    ) -> Self {
        Self {
            mapper: Arc::new(mapper),
            output_type,
            first,
            second,
        }
    }

    pub fn with_mapper<O1: ArgumentValue>(
        &self,
        output_type: OutputType<O1>,
        mapper: impl Mapper<U, V, O1> + 'static,
    ) -> AggregateParserPairBuilder<U, V, O1> {
        AggregateParserPairBuilder::new(self.first.clone(), self.second.clone(), mapper, output_type)
    }

    pub fn with_direct_mapper<O1: ArgumentValue>(
        &self,
        output_type: OutputType<O1>,
        mapper: impl DirectSuccessMapper<U, V, O1> + 'static,
    ) -> AggregateParserPairBuilder<U, V, O1> {
        self.with_mapper(output_type, DirectMapper(mapper))
    }

    pub fn output_type(&self) -> OutputType<O> {
        self.output_type
    }

    pub fn build(&self) -> Result<AggregateParser<O>, InternalError> {
        let mapper = Arc::clone(&self.mapper);
        let first = self.first.name().to_string();
        let second = self.second.name().to_string();

        AggregateParserBuilder::new(vec![self.first.clone().into(), self.second.clone().into()])
            .with_mapper(
                self.output_type,
                move |ctx: &CommandContext, aggregate: &AggregateContext| {
                    let values = || -> Result<(U, V), InternalError> {
                        Ok((aggregate.get(&first)?, aggregate.get(&second)?))
                    };
                    match values() {
                        Ok((first, second)) => mapper.map(ctx, first, second),
                        Err(err) => failure_future(err.into()),
                    }
                },
            )
            .build()
    }
}
