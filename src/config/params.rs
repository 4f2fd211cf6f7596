use crate::{Error, Result};
use std::collections::HashMap;

/// Runtime parameters passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    /// Create empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Parse from CLI args like "key=value".
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut params = Self::new();
        for arg in args {
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                Error::Config(format!("invalid param '{}', expected key=value", arg))
            })?;
            params.values.insert(key.to_string(), value.to_string());
        }
        Ok(params)
    }
}

/// Substitute `${var}` patterns in a string.
///
/// Params win over the process environment; unknown variables are left in
/// place so config validation can name them.
pub fn substitute(template: &str, params: &Params) -> String {
    let mut result = template.to_string();
    let mut start = 0;

    while let Some(offset) = result[start..].find("${") {
        let var_start = start + offset;
        let Some(end_offset) = result[var_start..].find('}') else {
            break;
        };
        let var_end = var_start + end_offset;

        let name = &result[var_start + 2..var_end];
        let value = params
            .get(name)
            .map(str::to_string)
            .or_else(|| std::env::var(name).ok());

        match value {
            Some(v) => {
                result.replace_range(var_start..=var_end, &v);
                start = var_start + v.len();
            }
            None => {
                start = var_end + 1;
            }
        }
    }

    result
}

/// Recursively substitute params in a serde_yaml::Value.
pub fn substitute_value(value: &mut serde_yaml::Value, params: &Params) {
    match value {
        serde_yaml::Value::String(s) => {
            *s = substitute(s, params);
        }
        serde_yaml::Value::Mapping(map) => {
            for (_, v) in map.iter_mut() {
                substitute_value(v, params);
            }
        }
        serde_yaml::Value::Sequence(seq) => {
            for v in seq.iter_mut() {
                substitute_value(v, params);
            }
        }
        _ => {}
    }
}
