// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CSG parser using pest

use crate::ast::CsgNode;
use crate::error::ParseError;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "io/csg.pest"]
struct CsgParser;

/// Parse CSG source into a tree wrapped in an implicit root `group()`
pub fn parse_csg(source: &str) -> Result<CsgNode, ParseError> {
    let file = CsgParser::parse(Rule::file, source)
        .map_err(|e| ParseError::Syntax(e.to_string()))?
        .next()
        .ok_or_else(|| ParseError::Syntax("empty parse".to_string()))?;

    let children = parse_statements(file.into_inner())?;
    Ok(CsgNode::new("group", "").with_children(children))
}

fn parse_statements(pairs: Pairs<Rule>) -> Result<Vec<CsgNode>, ParseError> {
    pairs
        .filter(|pair| pair.as_rule() == Rule::statement)
        .map(parse_statement)
        .collect()
}

fn parse_statement(pair: Pair<Rule>) -> Result<CsgNode, ParseError> {
    let mut node = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::call => node = Some(parse_call(inner)?),
            Rule::block => {
                if let Some(node) = node.as_mut() {
                    node.children = parse_statements(inner.into_inner())?;
                }
            }
            // Debug modifiers do not change the geometry
            _ => {}
        }
    }

    node.ok_or_else(|| ParseError::Syntax("statement without a call".to_string()))
}

fn parse_call(pair: Pair<Rule>) -> Result<CsgNode, ParseError> {
    let (line, _) = pair.as_span().start_pos().line_col();
    let mut inner = pair.into_inner();

    let name = inner
        .next()
        .ok_or_else(|| ParseError::Syntax(format!("line {}: missing operator name", line)))?
        .as_str();
    let args = inner.next().map(|p| p.as_str().trim()).unwrap_or("");

    Ok(CsgNode::new(name, args).at_line(line))
}
