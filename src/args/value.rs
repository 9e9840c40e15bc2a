// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Typed argument values

use ahash::AHashMap;
use serde::Serialize;

/// Prefix that replaces `$` in special variable names (`$fn` → `_ss_fn`)
pub const SPECIAL_PREFIX: &str = "_ss_";

/// Prefix of the synthetic names bound to positional arguments
pub const POSITIONAL_PREFIX: &str = "arg_";

/// Evaluated argument value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    String(String),
    Bool(bool),
    /// Flat or nested vector
    Vector(Vec<Value>),
    /// The `undef` sentinel
    Undef,
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_undef(&self) -> bool {
        matches!(self, Value::Undef)
    }

    /// Flat vector of numbers
    pub fn as_numbers(&self) -> Option<Vec<f64>> {
        match self {
            Value::Vector(items) => items.iter().map(Value::as_f64).collect(),
            _ => None,
        }
    }

    /// Vector of exactly `N` numbers
    pub fn as_array<const N: usize>(&self) -> Option<[f64; N]> {
        let numbers = self.as_numbers()?;
        numbers.try_into().ok()
    }

    /// Vector of `N`-number vectors, e.g. a point list
    pub fn as_rows<const N: usize>(&self) -> Option<Vec<[f64; N]>> {
        match self {
            Value::Vector(rows) => rows.iter().map(Value::as_array::<N>).collect(),
            _ => None,
        }
    }

    /// Row-major 4×4 matrix
    pub fn as_matrix4(&self) -> Option<[[f64; 4]; 4]> {
        let rows = self.as_rows::<4>()?;
        rows.try_into().ok()
    }

    /// Vector of non-negative integer vectors, e.g. face index rings
    pub fn as_index_lists(&self) -> Option<Vec<Vec<usize>>> {
        match self {
            Value::Vector(rows) => rows
                .iter()
                .map(|row| -> Option<Vec<usize>> {
                    row.as_numbers()?
                        .into_iter()
                        .map(|n| (n >= 0.0 && n.fract() == 0.0).then_some(n as usize))
                        .collect()
                })
                .collect(),
            _ => None,
        }
    }
}

/// Name → value mapping of one operator call's arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgMap {
    values: AHashMap<String, Value>,
    positional: usize,
}

impl ArgMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a value; returns false if the name was already bound
    pub fn insert(&mut self, name: String, value: Value) -> bool {
        if self.values.contains_key(&name) {
            return false;
        }
        self.values.insert(name, value);
        true
    }

    /// Binds the next positional argument to its synthetic ordinal name
    pub fn push_positional(&mut self, value: Value) {
        let name = positional_name(self.positional);
        self.positional += 1;
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Positional argument `index`
    pub fn positional(&self, index: usize) -> Option<&Value> {
        self.values.get(&positional_name(index))
    }

    pub fn positional_count(&self) -> usize {
        self.positional
    }

    /// Special variable such as `$fn`, looked up by its bare name (`"fn"`)
    pub fn special(&self, name: &str) -> Option<&Value> {
        self.values.get(&format!("{}{}", SPECIAL_PREFIX, name))
    }

    /// Named value, ignoring `undef`
    pub fn defined(&self, name: &str) -> Option<&Value> {
        self.get(name).filter(|v| !v.is_undef())
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Synthetic name of positional argument `index`
pub fn positional_name(index: usize) -> String {
    format!("{}{}", POSITIONAL_PREFIX, index)
}

/// Binding name of an identifier, with `$` replaced by [`SPECIAL_PREFIX`]
pub fn binding_name(ident: &str) -> String {
    match ident.strip_prefix('$') {
        Some(rest) => format!("{}{}", SPECIAL_PREFIX, rest),
        None => ident.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_name_substitutes_special_prefix() {
        assert_eq!(binding_name("$fn"), "_ss_fn");
        assert_eq!(binding_name("center"), "center");
    }

    #[test]
    fn test_matrix_requires_four_by_four() {
        let row = |v: [f64; 4]| Value::Vector(v.iter().map(|n| Value::Number(*n)).collect());
        let m = Value::Vector(vec![
            row([1.0, 0.0, 0.0, 5.0]),
            row([0.0, 1.0, 0.0, 0.0]),
            row([0.0, 0.0, 1.0, 0.0]),
            row([0.0, 0.0, 0.0, 1.0]),
        ]);
        assert_eq!(m.as_matrix4().unwrap()[0][3], 5.0);

        let short = Value::Vector(vec![row([1.0, 0.0, 0.0, 0.0])]);
        assert!(short.as_matrix4().is_none());
    }

    #[test]
    fn test_index_lists_reject_fractions() {
        let face = |v: &[f64]| Value::Vector(v.iter().map(|n| Value::Number(*n)).collect());
        let ok = Value::Vector(vec![face(&[0.0, 1.0, 2.0])]);
        assert_eq!(ok.as_index_lists(), Some(vec![vec![0, 1, 2]]));

        let bad = Value::Vector(vec![face(&[0.0, 1.5, 2.0])]);
        assert_eq!(bad.as_index_lists(), None);
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut args = ArgMap::new();
        assert!(args.insert("r".into(), Value::Number(1.0)));
        assert!(!args.insert("r".into(), Value::Number(2.0)));
        assert_eq!(args.number("r"), Some(1.0));
    }
}
