// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Typed argument lookup for one operator call

use crate::args::{ArgMap, Value};
use crate::config::CompilerConfig;
use crate::error::{CompileError, Result};
use crate::utils::math::fragments_from_r;

/// Arguments of one call, with the context needed to report bad ones
pub(crate) struct Params<'a> {
    pub operator: &'a str,
    pub line: usize,
    pub args: &'a ArgMap,
}

impl<'a> Params<'a> {
    pub fn new(operator: &'a str, line: usize, args: &'a ArgMap) -> Self {
        Self {
            operator,
            line,
            args,
        }
    }

    /// Error for argument `name` not matching `expected`
    pub fn invalid(&self, name: &str, expected: &'static str) -> CompileError {
        CompileError::InvalidArgument {
            operator: self.operator.to_string(),
            name: name.to_string(),
            expected,
            line: self.line,
        }
    }

    /// Named argument, else positional `index`; `undef` counts as absent
    fn lookup(&self, name: &str, index: Option<usize>) -> Option<&'a Value> {
        self.args
            .defined(name)
            .or_else(|| index.and_then(|i| self.args.positional(i)))
            .filter(|v| !v.is_undef())
    }

    /// Optional number; present but non-numeric is an error
    pub fn number(&self, name: &str, index: Option<usize>) -> Result<Option<f64>> {
        match self.lookup(name, index) {
            None => Ok(None),
            Some(v) => v.as_f64().map(Some).ok_or_else(|| self.invalid(name, "a number")),
        }
    }

    pub fn number_or(&self, name: &str, index: Option<usize>, default: f64) -> Result<f64> {
        Ok(self.number(name, index)?.unwrap_or(default))
    }

    /// Radius given as `r_name`, or as a diameter `d_name`
    pub fn radius(&self, r_name: &str, d_name: &str, index: Option<usize>) -> Result<Option<f64>> {
        if let Some(r) = self.number(r_name, index)? {
            return Ok(Some(r));
        }
        Ok(self.number(d_name, None)?.map(|d| d / 2.0))
    }

    pub fn flag(&self, name: &str, default: bool) -> Result<bool> {
        match self.args.defined(name) {
            None => Ok(default),
            Some(v) => v.as_bool().ok_or_else(|| self.invalid(name, "true or false")),
        }
    }

    /// Size vector: a scalar is repeated on every axis
    pub fn size<const N: usize>(
        &self,
        name: &str,
        index: Option<usize>,
        default: [f64; N],
        expected: &'static str,
    ) -> Result<[f64; N]> {
        match self.lookup(name, index) {
            None => Ok(default),
            Some(Value::Number(n)) => Ok([*n; N]),
            Some(v) => v.as_array::<N>().ok_or_else(|| self.invalid(name, expected)),
        }
    }

    pub fn string(&self, name: &str, index: Option<usize>) -> Result<&'a str> {
        self.lookup(name, index)
            .and_then(Value::as_str)
            .ok_or_else(|| self.invalid(name, "a string"))
    }

    pub fn value(&self, name: &str, index: Option<usize>) -> Option<&'a Value> {
        self.lookup(name, index)
    }

    /// Segment count for a circle of radius `r` from `$fn`, `$fa` and `$fs`
    pub fn fragments(&self, r: f64, config: &CompilerConfig) -> Result<i64> {
        let special = |name: &str| -> Result<Option<f64>> {
            match self.args.special(name).filter(|v| !v.is_undef()) {
                None => Ok(None),
                Some(v) => v
                    .as_f64()
                    .map(Some)
                    .ok_or_else(|| self.invalid(&format!("${}", name), "a number")),
            }
        };
        let fn_ = special("fn")?.unwrap_or(0.0);
        let fa = special("fa")?.unwrap_or(config.default_fa);
        let fs = special("fs")?.unwrap_or(config.default_fs);

        let count = fragments_from_r(r, fn_, fa, fs).min(config.max_fragments.max(3));
        Ok(i64::from(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::evaluate_args;

    #[test]
    fn test_scalar_size_is_uniform() {
        let args = evaluate_args("size = 3").unwrap();
        let params = Params::new("cube", 1, &args);
        assert_eq!(
            params.size("size", Some(0), [1.0; 3], "a 3-vector").unwrap(),
            [3.0, 3.0, 3.0]
        );
    }

    #[test]
    fn test_positional_fallback() {
        let args = evaluate_args("[2, 4, 6]").unwrap();
        let params = Params::new("cube", 1, &args);
        assert_eq!(
            params.size("size", Some(0), [1.0; 3], "a 3-vector").unwrap(),
            [2.0, 4.0, 6.0]
        );
    }

    #[test]
    fn test_wrong_shape_is_invalid() {
        let args = evaluate_args("size = [1, 2]").unwrap();
        let params = Params::new("cube", 9, &args);
        let err = params.size("size", None, [1.0; 3], "a 3-vector").unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidArgument {
                operator: "cube".into(),
                name: "size".into(),
                expected: "a 3-vector",
                line: 9,
            }
        );
    }

    #[test]
    fn test_diameter_fallback() {
        let args = evaluate_args("d = 8").unwrap();
        let params = Params::new("sphere", 1, &args);
        assert_eq!(params.radius("r", "d", None).unwrap(), Some(4.0));
    }

    #[test]
    fn test_undef_counts_as_absent() {
        let args = evaluate_args("r = undef, center = undef").unwrap();
        let params = Params::new("circle", 1, &args);
        assert_eq!(params.number_or("r", None, 1.0).unwrap(), 1.0);
        assert!(!params.flag("center", false).unwrap());
    }

    #[test]
    fn test_fragments_respect_cap() {
        let config = CompilerConfig {
            max_fragments: 8,
            ..CompilerConfig::default()
        };
        let args = evaluate_args("$fn = 64").unwrap();
        let params = Params::new("sphere", 1, &args);
        assert_eq!(params.fragments(1.0, &config).unwrap(), 8);

        let args = evaluate_args("$fn = 0, $fa = 12, $fs = 2").unwrap();
        let params = Params::new("sphere", 1, &args);
        assert_eq!(params.fragments(10.0, &CompilerConfig::default()).unwrap(), 30);
    }
}
