//! Declarative flag sets.
//!
//! A [`FlagSchema`] describes a registry as data so it can live in a JSON file
//! next to the program instead of in code:
//!
//! ```json
//! {
//!   "name": "tool",
//!   "description": "Does things",
//!   "flags": [{ "long": "verbose", "short": "v", "description": "Verbose output" }],
//!   "options": [{ "long": "output", "short": "o", "required": true }],
//!   "positionals": [{ "name": "input", "default": "-" }]
//! }
//! ```
//!
//! Building a schema is stricter than calling [`Flags::add_bool`] and friends
//! directly: names must be non-empty and unique, and aliases must be exactly
//! one character.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ParseError;
use crate::flags::Flags;
use crate::value::{BoolValue, StringValue};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read flag schema '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid flag schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} declared with an empty name")]
    EmptyName { kind: &'static str },

    #[error("'{0}' is declared more than once")]
    DuplicateName(String),

    #[error("short alias '{alias}' of --{flag} must be a single character")]
    InvalidAlias { flag: String, alias: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchDef {
    pub long: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDef {
    pub long: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionalDef {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<SwitchDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positionals: Vec<PositionalDef>,
}

/// Handle to a value registered from a schema.
#[derive(Debug, Clone)]
pub enum Binding {
    Bool(BoolValue),
    String(StringValue),
}

/// Handles for every entry of a built schema, keyed by name in declaration
/// order.
#[derive(Debug, Clone, Default)]
pub struct SchemaBindings {
    values: IndexMap<String, Binding>,
}

impl SchemaBindings {
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.values.get(name)
    }

    pub fn bool(&self, name: &str) -> Option<&BoolValue> {
        match self.values.get(name)? {
            Binding::Bool(v) => Some(v),
            Binding::String(_) => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&StringValue> {
        match self.values.get(name)? {
            Binding::String(v) => Some(v),
            Binding::Bool(_) => None,
        }
    }

    /// Current value of every entry as JSON.
    pub fn snapshot(&self) -> IndexMap<String, serde_json::Value> {
        self.values
            .iter()
            .map(|(name, binding)| {
                let value = match binding {
                    Binding::Bool(v) => serde_json::Value::Bool(v.get()),
                    Binding::String(v) => serde_json::Value::String(v.get()),
                };
                (name.clone(), value)
            })
            .collect()
    }
}

fn parse_alias(flag: &str, alias: Option<&str>) -> Result<Option<char>, SchemaError> {
    let Some(alias) = alias else {
        return Ok(None);
    };
    let mut chars = alias.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Some(c)),
        _ => Err(SchemaError::InvalidAlias {
            flag: flag.to_string(),
            alias: alias.to_string(),
        }),
    }
}

fn claim_name(
    seen: &mut HashSet<String>,
    kind: &'static str,
    name: &str,
) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::EmptyName { kind });
    }
    if !seen.insert(name.to_string()) {
        return Err(SchemaError::DuplicateName(name.to_string()));
    }
    Ok(())
}

impl FlagSchema {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Register every entry on a fresh registry: switches, then options, then
    /// positionals, each in declaration order.
    pub fn build(&self) -> Result<(Flags, SchemaBindings), SchemaError> {
        let mut flags = Flags::new();
        let mut bindings = SchemaBindings::default();
        let mut seen = HashSet::new();

        for def in &self.flags {
            claim_name(&mut seen, "flag", &def.long)?;
            let short = parse_alias(&def.long, def.short.as_deref())?;
            let value = flags.add_bool(def.long.as_str(), short, def.description.as_str());
            bindings.values.insert(def.long.clone(), Binding::Bool(value));
        }

        for def in &self.options {
            claim_name(&mut seen, "option", &def.long)?;
            let short = parse_alias(&def.long, def.short.as_deref())?;
            let value = flags.add_string(
                def.long.as_str(),
                short,
                def.required,
                def.default.as_str(),
                def.description.as_str(),
            );
            bindings.values.insert(def.long.clone(), Binding::String(value));
        }

        for def in &self.positionals {
            claim_name(&mut seen, "positional", &def.name)?;
            let value = flags.add_positional(
                def.name.as_str(),
                def.required,
                def.default.as_str(),
                def.description.as_str(),
            );
            bindings.values.insert(def.name.clone(), Binding::String(value));
        }

        tracing::debug!(
            schema = %self.name,
            entries = bindings.values.len(),
            "flag schema built"
        );
        Ok((flags, bindings))
    }

    /// Usage text for the registry this schema builds.
    pub fn usage(&self, flags: &Flags, err: Option<&ParseError>) -> String {
        flags.usage(&self.name, &self.description, err)
    }
}
