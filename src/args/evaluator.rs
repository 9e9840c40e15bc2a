// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Argument list evaluator using pest

use super::value::{binding_name, ArgMap, Value};
use crate::error::ArgError;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "args/args.pest"]
struct ArgParser;

/// Evaluate raw argument text into an [`ArgMap`].
///
/// Positional arguments are bound to `arg_0`, `arg_1`, ... and special
/// variables such as `$fn` to `_ss_fn`. A positional argument after a named
/// one, or a name bound twice, is rejected.
pub fn evaluate_args(text: &str) -> Result<ArgMap, ArgError> {
    let mut pairs = ArgParser::parse(Rule::arg_list, text).map_err(|e| ArgError::Syntax {
        text: text.to_string(),
        message: e.variant.message().to_string(),
    })?;

    let mut args = ArgMap::new();
    let mut seen_named = false;

    let Some(list) = pairs.next() else {
        return Ok(args);
    };

    for argument in list.into_inner() {
        if argument.as_rule() != Rule::argument {
            continue;
        }
        let inner = first_inner(argument)?;

        match inner.as_rule() {
            Rule::named => {
                let mut parts = inner.into_inner();
                let ident = parts.next().map(|p| p.as_str()).unwrap_or_default();
                let expr = parts.next().ok_or_else(|| syntax(text, "missing value"))?;
                let name = binding_name(ident);
                let value = evaluate_expr(expr)?;
                if !args.insert(name, value) {
                    return Err(ArgError::Duplicate {
                        name: ident.to_string(),
                        text: text.to_string(),
                    });
                }
                seen_named = true;
            }
            Rule::expr => {
                if seen_named {
                    return Err(ArgError::PositionalAfterNamed(text.to_string()));
                }
                args.push_positional(evaluate_expr(inner)?);
            }
            _ => return Err(syntax(text, "unexpected argument")),
        }
    }

    Ok(args)
}

fn evaluate_expr(pair: Pair<Rule>) -> Result<Value, ArgError> {
    let inner = first_inner(pair)?;

    match inner.as_rule() {
        Rule::number => {
            let literal = inner.as_str();
            literal
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| ArgError::Number(literal.to_string()))
        }
        Rule::string => {
            let raw = inner.into_inner().next().map(|p| p.as_str()).unwrap_or_default();
            Ok(Value::String(unescape(raw)))
        }
        Rule::boolean => Ok(Value::Bool(inner.as_str() == "true")),
        Rule::undef => Ok(Value::Undef),
        Rule::vector => inner
            .into_inner()
            .map(evaluate_expr)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Vector),
        _ => Err(syntax(inner.as_str(), "unexpected expression")),
    }
}

fn first_inner(pair: Pair<Rule>) -> Result<Pair<Rule>, ArgError> {
    let text = pair.as_str().to_string();
    pair.into_inner()
        .next()
        .ok_or_else(|| syntax(&text, "empty expression"))
}

fn syntax(text: &str, message: &str) -> ArgError {
    ArgError::Syntax {
        text: text.to_string(),
        message: message.to_string(),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
