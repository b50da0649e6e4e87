#![allow(dead_code)]

use cloud_core::commands::aggregate::{
    component, failure_future, success_future, AggregateParserTripletBuilder, OutputType,
};
use cloud_core::commands::{
    ArgumentParseError, ArgumentType, CommandContext, CommandNode, CommandRegistry,
    CommandResult, CommandSender, ExecutionContext, RecordingAudience,
};
use cloud_core::tuple::Triplet;

pub fn console() -> CommandSender {
    CommandSender::Console
}

pub fn user(name: &str, permissions: &[&str]) -> CommandSender {
    CommandSender::user(name, permissions.iter().copied())
}

fn exec_sum(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let sum: i32 = ctx.args().get("numbers")?;
    ctx.reply(&format!("{sum}"))
}

fn exec_triple(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let values: Triplet<String, i32, bool> = ctx.args().get("values")?;
    let (word, number, flag) = values.into_tuple();
    ctx.reply(&format!("{word}|{number}|{flag}"))
}

fn exec_tp_position(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let position: Triplet<i32, i32, i32> = ctx.args().get("position")?;
    let (x, y, z) = position.into_tuple();
    ctx.reply(&format!("tp {x} {y} {z}"))
}

fn exec_tp_player(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let player = ctx.args().get_string("player")?;
    ctx.reply(&format!("tp {player}"))
}

fn exec_echo(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let message = ctx.args().get_greedy("message")?;
    ctx.reply(&message)
}

fn exec_whoami(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let name = ctx.require_user()?.to_string();
    ctx.reply(&name)
}

fn exec_ordered(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let difference: i32 = ctx.args().get("values")?;
    ctx.reply(&format!("{difference}"))
}

/// A registry with a handful of commands covering every argument kind.
pub fn registry() -> CommandRegistry {
    let integers = AggregateParserTripletBuilder::triplet(
        component::integer("x", -1000, 1000),
        component::integer("y", -1000, 1000),
        component::integer("z", -1000, 1000),
    );
    let sum = integers
        .with_mapper(
            OutputType::<i32>::new(),
            |_: &CommandContext, a: i32, b: i32, c: i32| success_future(a + b + c),
        )
        .build()
        .unwrap();
    let ordered = integers
        .with_mapper(
            OutputType::<i32>::new(),
            |_: &CommandContext, a: i32, b: i32, c: i32| {
                if a <= b && b <= c {
                    success_future(c - a)
                } else {
                    failure_future(ArgumentParseError::failure("values must be ordered"))
                }
            },
        )
        .build()
        .unwrap();
    let triple = AggregateParserTripletBuilder::triplet(
        component::string("word"),
        component::integer("number", 0, 100),
        component::boolean("flag"),
    )
    .build()
    .unwrap();

    let mut registry = CommandRegistry::new();
    registry.register(
        CommandNode::literal("sum")
            .description("Adds three integers")
            .then(CommandNode::argument("numbers", sum).executes(exec_sum)),
    );
    registry.register(
        CommandNode::literal("ordered")
            .then(CommandNode::argument("values", ordered).executes(exec_ordered)),
    );
    registry.register(
        CommandNode::literal("triple")
            .then(CommandNode::argument("values", triple).executes(exec_triple)),
    );
    registry.register(
        CommandNode::literal("tp")
            .alias("teleport")
            .require_permission("cloud.tp")
            .then(CommandNode::argument("position", integers.build().unwrap()).executes(exec_tp_position))
            .then(CommandNode::argument("player", ArgumentType::string()).executes(exec_tp_player)),
    );
    registry.register(
        CommandNode::literal("echo")
            .then(CommandNode::argument("message", ArgumentType::greedy_string()).executes(exec_echo)),
    );
    registry.register(CommandNode::literal("whoami").executes(exec_whoami));
    cloud_core::commands::register_help(&mut registry);
    registry
}

pub async fn run(registry: &CommandRegistry, sender: CommandSender, line: &str) -> RecordingAudience {
    let mut audience = RecordingAudience::default();
    registry
        .execute(&mut audience, sender, line)
        .await
        .expect("command raised an internal error");
    audience
}
