//! Commands available from the console.

use cloud_core::commands::aggregate::{
    component, failure_future, success_future, AggregateParserPairBuilder,
    AggregateParserTripletBuilder, OutputType,
};
use cloud_core::commands::value::ArgumentValue;
use cloud_core::commands::{
    ArgumentParseError, ArgumentType, CommandContext, CommandError, CommandNode, CommandRegistry,
    CommandResult, ExecutionContext, InternalError,
};
use cloud_core::tuple::Triplet;
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    x: f32,
    y: f32,
    z: f32,
}

impl ArgumentValue for Position {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Range {
    low: i32,
    high: i32,
}

impl ArgumentValue for Range {}

pub fn register_commands(registry: &mut CommandRegistry) -> Result<(), InternalError> {
    let numbers = AggregateParserTripletBuilder::triplet(
        component::integer("a", i32::MIN, i32::MAX),
        component::integer("b", i32::MIN, i32::MAX),
        component::integer("c", i32::MIN, i32::MAX),
    );
    let sum = numbers
        .with_mapper(
            OutputType::<i32>::new(),
            |_: &CommandContext, a: i32, b: i32, c: i32| match a
                .checked_add(b)
                .and_then(|ab| ab.checked_add(c))
            {
                Some(sum) => success_future(sum),
                None => failure_future(ArgumentParseError::failure("sum does not fit in 32 bits")),
            },
        )
        .build()?;

    let triple = AggregateParserTripletBuilder::triplet(
        component::string("word"),
        component::integer("number", i32::MIN, i32::MAX),
        component::boolean("flag"),
    )
    .build()?;

    let position = AggregateParserTripletBuilder::triplet(
        component::float("x", -30_000_000.0, 30_000_000.0),
        component::float("y", -64.0, 320.0),
        component::float("z", -30_000_000.0, 30_000_000.0),
    )
    .with_direct_mapper(
        OutputType::<Position>::new(),
        |_: &CommandContext, x: f32, y: f32, z: f32| Position { x, y, z },
    )
    .build()?;

    let range = AggregateParserPairBuilder::pair(
        component::integer("low", i32::MIN, i32::MAX),
        component::integer("high", i32::MIN, i32::MAX),
    )
    .with_mapper(
        OutputType::<Range>::new(),
        |_: &CommandContext, low: i32, high: i32| {
            if low <= high {
                success_future(Range { low, high })
            } else {
                failure_future(ArgumentParseError::failure(format!(
                    "{low} is greater than {high}"
                )))
            }
        },
    )
    .build()?;

    registry.register(
        CommandNode::literal("sum")
            .description("Adds three integers")
            .then(CommandNode::argument("numbers", sum).executes(exec_sum)),
    );
    registry.register(
        CommandNode::literal("triple")
            .description("Echoes a word, a number and a boolean")
            .then(CommandNode::argument("values", triple).executes(exec_triple)),
    );
    registry.register(
        CommandNode::literal("goto")
            .alias("tp")
            .description("Moves to a position")
            .require_permission("cloud.goto")
            .then(CommandNode::argument("position", position).executes(exec_goto)),
    );
    registry.register(
        CommandNode::literal("range")
            .description("Lists the integers of a range")
            .then(CommandNode::argument("range", range).executes(exec_range)),
    );
    registry.register(
        CommandNode::literal("echo")
            .description("Repeats a message")
            .then(CommandNode::argument("message", ArgumentType::greedy_string()).executes(exec_echo)),
    );
    registry.register(
        CommandNode::literal("whoami")
            .description("Shows the name of the sender")
            .executes(exec_whoami),
    );
    registry.register(
        CommandNode::literal("clear")
            .description("Clears the screen")
            .then(
                CommandNode::argument(
                    "flags",
                    ArgumentType::flags()
                        .add('a', "all", "Also clear the scrollback")
                        .add('q', "quiet", "Do not print a confirmation"),
                )
                .executes(exec_clear),
            ),
    );
    registry.register(
        CommandNode::literal("mode")
            .description("Switches the display mode")
            .then(
                CommandNode::argument("mode", ArgumentType::choice(["compact", "verbose"]))
                    .executes(exec_mode),
            ),
    );

    Ok(())
}

fn exec_sum(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let sum: i32 = ctx.args().get("numbers")?;
    ctx.reply(&format!("Sum: {sum}"))
}

fn exec_triple(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let values: Triplet<String, i32, bool> = ctx.args().get("values")?;
    let (word, number, flag) = values.into_tuple();
    ctx.reply(&format!("{word} {number} {flag}"))
}

fn exec_goto(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let Position { x, y, z } = ctx.args().get("position")?;
    ctx.reply(&format!("Moved to {x:.1}, {y:.1}, {z:.1}"))
}

fn exec_range(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let Range { low, high } = ctx.args().get("range")?;
    if high.abs_diff(low) > 10_000 {
        return Err(CommandError::runtime("That range is too large to list"));
    }
    let listed = (low..=high).take(20).join(", ");
    if high.abs_diff(low) >= 20 {
        ctx.reply(&format!("{listed}, ..."))
    } else {
        ctx.reply(&listed)
    }
}

fn exec_echo(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let message = ctx.args().get_greedy("message")?;
    ctx.reply(&message)
}

fn exec_whoami(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let name = ctx.require_user()?.to_string();
    ctx.reply(&format!("You are {name}"))
}

fn exec_clear(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let flags = ctx.args().get_flags("flags")?;
    if flags.contains("all") {
        ctx.reply("\x1b[3J")?;
    }
    ctx.reply("\x1b[2J\x1b[H")?;
    if !flags.contains("quiet") {
        ctx.reply("Screen cleared")?;
    }
    Ok(())
}

fn exec_mode(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let mode = ctx.args().get_string("mode")?;
    ctx.reply(&format!("Display mode set to {mode}"))
}
