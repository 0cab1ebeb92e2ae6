//! Step argument declarations and binding
//!
//! A step declares the parameters it can be invoked with as a fixed list of
//! [`StepArgument`] value objects. The platform binds raw `key=value` pairs
//! against that list once, before the step runs; the result is an immutable
//! [`StepArgs`] with typed accessors.

use crate::error::{Result, StepError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Primitive type tag for a step argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgType {
    Bool,
    Int,
    Float,
    Str,
}

impl ArgType {
    pub fn name(&self) -> &'static str {
        match self {
            ArgType::Bool => "bool",
            ArgType::Int => "int",
            ArgType::Float => "float",
            ArgType::Str => "str",
        }
    }
}

/// A bound argument value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ArgValue {
    /// Parse a raw string into a value of the declared type
    pub fn parse(raw: &str, arg_type: ArgType) -> Result<Self> {
        let invalid = |reason: &str| {
            StepError::ArgumentError(format!(
                "cannot parse {raw:?} as {}: {reason}",
                arg_type.name()
            ))
        };

        match arg_type {
            ArgType::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(ArgValue::Bool(true)),
                "false" | "0" => Ok(ArgValue::Bool(false)),
                _ => Err(invalid("expected true/false")),
            },
            ArgType::Int => raw
                .parse::<i64>()
                .map(ArgValue::Int)
                .map_err(|_| invalid("expected an integer")),
            ArgType::Float => raw
                .parse::<f64>()
                .map(ArgValue::Float)
                .map_err(|_| invalid("expected a float")),
            ArgType::Str => Ok(ArgValue::Str(raw.to_string())),
        }
    }
}

/// Declaration of one CLI-bindable step parameter.
/// The set of declarations for a step is fixed at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepArgument {
    pub name: String,
    pub help: String,
    pub arg_type: ArgType,
    pub default: Option<ArgValue>,
    pub required: bool,
}

impl StepArgument {
    pub fn new(name: impl Into<String>, help: impl Into<String>, arg_type: ArgType) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            arg_type,
            default: None,
            required: false,
        }
    }

    pub fn with_default(mut self, default: ArgValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// The bound, typed argument set a step receives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepArgs {
    values: HashMap<String, ArgValue>,
}

impl StepArgs {
    /// Bind raw `(key, value)` pairs against a declaration list.
    ///
    /// Fails before the step runs on unknown keys, unparseable values,
    /// and missing required arguments without a default.
    pub fn bind(declarations: &[StepArgument], raw: &[(String, String)]) -> Result<Self> {
        let mut values = HashMap::new();

        for (key, value) in raw {
            let decl = declarations
                .iter()
                .find(|d| d.name == *key)
                .ok_or_else(|| StepError::ArgumentError(format!("unknown argument: {key}")))?;
            let parsed = ArgValue::parse(value, decl.arg_type)?;
            values.insert(decl.name.clone(), parsed);
        }

        for decl in declarations {
            if values.contains_key(&decl.name) {
                continue;
            }
            if let Some(default) = &decl.default {
                values.insert(decl.name.clone(), default.clone());
            } else if decl.required {
                return Err(StepError::ArgumentError(format!(
                    "missing required argument: {}",
                    decl.name
                )));
            }
        }

        Ok(Self { values })
    }

    /// Build directly from values, bypassing parsing. Test and library use.
    pub fn from_values(values: impl IntoIterator<Item = (String, ArgValue)>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    fn get(&self, name: &str) -> Result<&ArgValue> {
        self.values
            .get(name)
            .ok_or_else(|| StepError::ArgumentError(format!("argument not bound: {name}")))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        match self.get(name)? {
            ArgValue::Bool(v) => Ok(*v),
            other => Err(type_mismatch(name, "bool", other)),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<i64> {
        match self.get(name)? {
            ArgValue::Int(v) => Ok(*v),
            other => Err(type_mismatch(name, "int", other)),
        }
    }

    pub fn get_float(&self, name: &str) -> Result<f64> {
        match self.get(name)? {
            ArgValue::Float(v) => Ok(*v),
            // ints widen to float
            ArgValue::Int(v) => Ok(*v as f64),
            other => Err(type_mismatch(name, "float", other)),
        }
    }

    pub fn get_str(&self, name: &str) -> Result<&str> {
        match self.get(name)? {
            ArgValue::Str(v) => Ok(v.as_str()),
            other => Err(type_mismatch(name, "str", other)),
        }
    }
}

fn type_mismatch(name: &str, expected: &str, got: &ArgValue) -> StepError {
    StepError::ArgumentError(format!("argument {name}: expected {expected}, got {got:?}"))
}
