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
use crate::tuple::Triplet;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Fuses the values of three components into an `O`, possibly failing.
pub trait Mapper<U, V, Z, O>: Send + Sync {
    fn map(
        &self,
        ctx: &CommandContext,
        first: U,
        second: V,
        third: Z,
    ) -> BoxFuture<'static, ArgumentParseResult<O>>;
}

impl<U, V, Z, O, F> Mapper<U, V, Z, O> for F
where
    F: Fn(&CommandContext, U, V, Z) -> BoxFuture<'static, ArgumentParseResult<O>> + Send + Sync,
{
    fn map(
        &self,
        ctx: &CommandContext,
        first: U,
        second: V,
        third: Z,
    ) -> BoxFuture<'static, ArgumentParseResult<O>> {
        self(ctx, first, second, third)
    }
}

/// A [`Mapper`] that always succeeds.
pub trait DirectSuccessMapper<U, V, Z, O>: Send + Sync {
    fn map_success(&self, ctx: &CommandContext, first: U, second: V, third: Z) -> O;
}

impl<U, V, Z, O, F> DirectSuccessMapper<U, V, Z, O> for F
where
    F: Fn(&CommandContext, U, V, Z) -> O + Send + Sync,
{
    fn map_success(&self, ctx: &CommandContext, first: U, second: V, third: Z) -> O {
        self(ctx, first, second, third)
    }
}

impl<U, V, Z, O, M> Mapper<U, V, Z, O> for DirectMapper<M>
where
    M: DirectSuccessMapper<U, V, Z, O>,
    O: Send + 'static,
{
    fn map(
        &self,
        ctx: &CommandContext,
        first: U,
        second: V,
        third: Z,
    ) -> BoxFuture<'static, ArgumentParseResult<O>> {
        success_future(self.0.map_success(ctx, first, second, third))
    }
}

/// Mapper bundling the three values into a [`Triplet`].
pub fn default_mapper<U, V, Z>() -> impl Mapper<U, V, Z, Triplet<U, V, Z>>
where
    U: ArgumentValue,
    V: ArgumentValue,
    Z: ArgumentValue,
{
    |_: &CommandContext, first: U, second: V, third: Z| {
        success_future(Triplet::of(first, second, third))
    }
}

/// Views a direct success mapper as a general [`Mapper`].
pub fn direct_mapper<U, V, Z, O, M>(mapper: M) -> DirectMapper<M>
where
    M: DirectSuccessMapper<U, V, Z, O>,
{
    DirectMapper(mapper)
}

/// Builds an aggregate parser out of exactly three components.
///
/// Every `with_*` method leaves `self` untouched and returns a new builder,
/// so one builder can be the base of several parsers.
pub struct AggregateParserTripletBuilder<U, V, Z, O> {
    mapper: Arc<dyn Mapper<U, V, Z, O>>,
    output_type: OutputType<O>,
    first: TypedComponent<U>,
    second: TypedComponent<V>,
    third: TypedComponent<Z>,
}

impl<U, V, Z, O> Clone for AggregateParserTripletBuilder<U, V, Z, O> {
    fn clone(&self) -> Self {
        Self {
            mapper: Arc::clone(&self.mapper),
            output_type: self.output_type,
            first: self.first.clone(),
            second: self.second.clone(),
            third: self.third.clone(),
        }
    }
}

impl<U, V, Z> AggregateParserTripletBuilder<U, V, Z, Triplet<U, V, Z>>
where
    U: ArgumentValue,
    V: ArgumentValue,
    Z: ArgumentValue,
{
    /// Starts from [`default_mapper`].
    pub fn triplet(
        first: TypedComponent<U>,
        second: TypedComponent<V>,
        third: TypedComponent<Z>,
    ) -> Self {
        Self::new(first, second, third, default_mapper(), OutputType::new())
    }
}

impl<U, V, Z, O> AggregateParserTripletBuilder<U, V, Z, O>
where
    U: ArgumentValue,
    V: ArgumentValue,
    Z: ArgumentValue,
    O: ArgumentValue,
{
    pub fn new(
        first: TypedComponent<U>,
        second: TypedComponent<V>,
        third: TypedComponent<Z>,
        mapper: impl Mapper<U, V, Z, O> + 'static,
        output_type: OutputType<O>,
    ) -> Self {
        Self {
            mapper: Arc::new(mapper),
            output_type,
            first,
            second,
            third,
        }
    }

    pub fn with_mapper<O1: ArgumentValue>(
        &self,
        output_type: OutputType<O1>,
        mapper: impl Mapper<U, V, Z, O1> + 'static,
    ) -> AggregateParserTripletBuilder<U, V, Z, O1> {
        AggregateParserTripletBuilder::new(
            self.first.clone(),
            self.second.clone(),
            self.third.clone(),
            mapper,
            output_type,
        )
    }

    pub fn with_direct_mapper<O1: ArgumentValue>(
        &self,
        output_type: OutputType<O1>,
        mapper: impl DirectSuccessMapper<U, V, Z, O1> + 'static,
    ) -> AggregateParserTripletBuilder<U, V, Z, O1> {
        self.with_mapper(output_type, DirectMapper(mapper))
    }

    pub fn output_type(&self) -> OutputType<O> {
        self.output_type
    }

    pub fn first(&self) -> &TypedComponent<U> {
        &self.first
    }

    pub fn second(&self) -> &TypedComponent<V> {
        &self.second
    }

    pub fn third(&self) -> &TypedComponent<Z> {
        &self.third
    }

    pub fn build(&self) -> Result<AggregateParser<O>, InternalError> {
        let mapper = Arc::clone(&self.mapper);
        let first = self.first.name().to_string();
        let second = self.second.name().to_string();
        let third = self.third.name().to_string();

        AggregateParserBuilder::new(vec![
            self.first.clone().into(),
            self.second.clone().into(),
            self.third.clone().into(),
        ])
        .with_mapper(
            self.output_type,
            move |ctx: &CommandContext, aggregate: &AggregateContext| {
                let values = || -> Result<(U, V, Z), InternalError> {
                    Ok((
                        aggregate.get(&first)?,
                        aggregate.get(&second)?,
                        aggregate.get(&third)?,
                    ))
                };
                match values() {
                    Ok((first, second, third)) => mapper.map(ctx, first, second, third),
                    Err(err) => failure_future(err.into()),
                }
            },
        )
        .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::error::ArgumentParseError;
    use crate::commands::aggregate::component;
    use crate::commands::context::CommandSender;

    impl ArgumentValue for i64 {}

    fn ctx() -> CommandContext {
        CommandContext::new(CommandSender::Console, "")
    }

    fn xyz() -> AggregateParserTripletBuilder<i32, i32, i32, Triplet<i32, i32, i32>> {
        AggregateParserTripletBuilder::triplet(
            component::integer("a", -1000, 1000),
            component::integer("b", -1000, 1000),
            component::integer("c", -1000, 1000),
        )
    }

    #[tokio::test]
    async fn default_mapper_keeps_component_order() {
        let parser = AggregateParserTripletBuilder::triplet(
            component::string("word"),
            component::integer("number", 0, 100),
            component::boolean("flag"),
        )
        .build()
        .unwrap();

        let ctx = ctx();
        let (triplet, rest) = parser.parse_value(&ctx, "hello 42 true").await.unwrap();
        assert_eq!(rest, "");
        assert_eq!(triplet.into_tuple(), ("hello".to_string(), 42, true));
    }

    #[tokio::test]
    async fn summing_mapper() {
        let parser = xyz()
            .with_mapper(
                OutputType::<i32>::new(),
                |_: &CommandContext, a: i32, b: i32, c: i32| success_future(a + b + c),
            )
            .build()
            .unwrap();

        let ctx = ctx();
        assert_eq!(parser.parse_value(&ctx, "1 2 3").await.unwrap().0, 6);
    }

    #[tokio::test]
    async fn replacing_the_mapper_leaves_the_original_usable() {
        let original = xyz();
        let product = original.with_direct_mapper(
            OutputType::<i64>::new(),
            |_: &CommandContext, a: i32, b: i32, c: i32| a as i64 * b as i64 * c as i64,
        );
        assert!(original.output_type().name().contains("Triplet"));
        assert_eq!(product.output_type().name(), "i64");

        let original = original.build().unwrap();
        let product = product.build().unwrap();

        let ctx = ctx();
        assert_eq!(
            original.parse_value(&ctx, "2 3 4").await.unwrap().0,
            Triplet::of(2, 3, 4)
        );
        assert_eq!(product.parse_value(&ctx, "2 3 4").await.unwrap().0, 24);
    }

    #[tokio::test]
    async fn direct_mapper_wraps_values_unchanged() {
        let to_string = direct_mapper(|_: &CommandContext, a: i32, b: i32, c: i32| {
            format!("{a}/{b}/{c}")
        });
        let ctx = ctx();
        let result = Mapper::map(&to_string, &ctx, 1, -2, 3).await;
        assert_eq!(result, Ok("1/-2/3".to_string()));

        let inner = to_string.into_inner();
        assert_eq!(inner(&ctx, 4, 5, 6), "4/5/6");
    }

    #[tokio::test]
    async fn mapper_sees_the_command_context() {
        let parser = xyz()
            .with_direct_mapper(
                OutputType::<String>::new(),
                |ctx: &CommandContext, a: i32, _: i32, _: i32| format!("{}:{}", ctx.sender().name(), a),
            )
            .build()
            .unwrap();

        let ctx = CommandContext::new(CommandSender::user("alex", Vec::<String>::new()), "");
        assert_eq!(parser.parse_value(&ctx, "7 8 9").await.unwrap().0, "alex:7");
    }

    #[tokio::test]
    async fn mapper_can_reject() {
        let parser = xyz()
            .with_mapper(
                OutputType::<i32>::new(),
                |_: &CommandContext, a: i32, b: i32, _: i32| {
                    if a < b {
                        success_future(b - a)
                    } else {
                        failure_future(ArgumentParseError::failure("a must be below b"))
                    }
                },
            )
            .build()
            .unwrap();

        let ctx = ctx();
        assert_eq!(parser.parse_value(&ctx, "1 5 0").await.unwrap().0, 4);
        assert_eq!(
            parser.parse_value(&ctx, "5 1 0").await.unwrap_err(),
            ArgumentParseError::failure("a must be below b")
        );
    }

    #[test]
    fn duplicate_names_fail_to_build() {
        let builder = AggregateParserTripletBuilder::triplet(
            component::integer("x", 0, 1),
            component::integer("x", 0, 1),
            component::integer("z", 0, 1),
        );
        assert!(matches!(
            builder.build(),
            Err(InternalError::DuplicateComponent { .. })
        ));
    }
}
