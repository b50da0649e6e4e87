use crate::commands::{argument::FlagSpec, error::ArgumentParseError, value::Value};
use rustc_hash::FxHashSet;

/// Result of parsing a single argument: the value and the unconsumed input.
pub type TokenParseResult<'a> = Result<(Value, &'a str), ArgumentParseError>;

/// Outcome of an argument parser, possibly produced asynchronously.
pub type ArgumentParseResult<T> = Result<T, ArgumentParseError>;

fn skip_whitespace(input: &str) -> &str {
    input.trim_start()
}

pub fn consume_token(input: &str) -> Option<(&str, &str)> {
    let input = skip_whitespace(input);
    if input.is_empty() {
        return None;
    }

    let end = input.find(char::is_whitespace).unwrap_or(input.len());

    Some((&input[..end], &input[end..]))
}

pub fn parse_string(input: &str) -> TokenParseResult<'_> {
    let (token, rest) = consume_token(input).ok_or(ArgumentParseError::NoInput)?;
    Ok((Value::String(token.to_string()), rest))
}

pub fn parse_greedy_string(input: &str) -> TokenParseResult<'_> {
    let input = skip_whitespace(input);
    Ok((Value::GreedyString(input.to_string()), ""))
}

pub fn parse_flags<'a>(input: &'a str, flags_specs: &[FlagSpec]) -> TokenParseResult<'a> {
    let input = skip_whitespace(input);

    let mut flags = FxHashSet::default();
    let tokens = input.split_whitespace();

    for token in tokens {
        let unknown = || ArgumentParseError::UnknownFlag {
            flag: token.to_string(),
        };
        if let Some(long_name) = token.strip_prefix("--") {
            let spec = flags_specs
                .iter()
                .find(|s| s.long == long_name)
                .ok_or_else(unknown)?;
            flags.insert(spec.long.clone());
        } else if let Some(flag_chars) = token.strip_prefix('-') {
            for c in flag_chars.chars() {
                let spec = flags_specs
                    .iter()
                    .find(|s| s.short == Some(c))
                    .ok_or_else(unknown)?;
                flags.insert(spec.long.clone());
            }
        } else {
            return Err(unknown());
        }
    }

    Ok((Value::Flags(flags), ""))
}

pub fn parse_integer(input: &str) -> TokenParseResult<'_> {
    let (token, rest) = consume_token(input).ok_or(ArgumentParseError::NoInput)?;

    let value = token
        .parse::<i32>()
        .map_err(|_| ArgumentParseError::InvalidInteger {
            input: token.to_string(),
        })?;

    Ok((Value::Integer(value), rest))
}

pub fn parse_float(input: &str) -> TokenParseResult<'_> {
    let (token, rest) = consume_token(input).ok_or(ArgumentParseError::NoInput)?;

    let value = token
        .parse::<f32>()
        .map_err(|_| ArgumentParseError::InvalidFloat {
            input: token.to_string(),
        })?;

    Ok((Value::Float(value), rest))
}

pub fn parse_boolean(input: &str) -> TokenParseResult<'_> {
    let (token, rest) = consume_token(input).ok_or(ArgumentParseError::NoInput)?;

    let value = match token.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => true,
        "false" | "no" | "0" | "off" => false,
        _ => {
            return Err(ArgumentParseError::InvalidBoolean {
                input: token.to_string(),
            })
        }
    };

    Ok((Value::Boolean(value), rest))
}

pub fn parse_choice<'a>(input: &'a str, choices: &[String]) -> TokenParseResult<'a> {
    let (token, rest) = consume_token(input).ok_or(ArgumentParseError::NoInput)?;

    let choice = choices
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(token))
        .ok_or_else(|| ArgumentParseError::InvalidChoice {
            input: token.to_string(),
            choices: choices.join(", "),
        })?;

    Ok((Value::String(choice.clone()), rest))
}
