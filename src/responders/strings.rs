//! The canned-strings table.
//!
//! A JSON object mapping keys to replies. A value may be:
//!
//! - a string, used as is
//! - a list, from which one element is picked at random per lookup
//! - an object of sub-keys, each itself a string or a list
//!
//! Templates use `{}` for positional and `{name}` for named arguments.

use std::path::Path;

use rand::seq::SliceRandom;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StringsError {
    #[error("failed to read strings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid strings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("strings file must contain a JSON object")]
    NotAnObject,
}

/// Reply strings keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Strings {
    table: Map<String, Value>,
}

impl Strings {
    pub fn load(path: &Path) -> Result<Self, StringsError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Top-level entry as a string, picking from a list.
    pub fn get(&self, key: &str) -> Option<String> {
        pick(self.table.get(key)?)
    }

    /// `key.sub` entry as a string, picking from a list.
    pub fn get_in(&self, key: &str, sub: &str) -> Option<String> {
        pick(self.table.get(key)?.get(sub)?)
    }

    /// Raw JSON value of a top-level entry.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.table.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl std::str::FromStr for Strings {
    type Err = StringsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match serde_json::from_str(s)? {
            Value::Object(table) => Ok(Self { table }),
            _ => Err(StringsError::NotAnObject),
        }
    }
}

fn pick(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items
            .choose(&mut rand::thread_rng())
            .and_then(|v| v.as_str())
            .map(str::to_owned),
        _ => None,
    }
}

/// Fill `{}` placeholders left to right with `args`.
///
/// Placeholders without a matching argument are left in place.
pub fn render(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

/// Replace `{name}` placeholders with the matching values.
pub fn render_named(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_owned(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}
