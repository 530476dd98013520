//! Query units: the operands of `and` / `or` / `where_`.

use super::Filler;
use super::logic::render_group;
use crate::error::{FillError, FillResult, reject};
use crate::ident::Ident;
use crate::placeholder::Placeholders;
use crate::value::Value;
use std::collections::HashMap;

/// The value half of a [`Unit::Pair`].
#[derive(Clone, Debug, PartialEq)]
pub enum Bind {
    /// Rendered as `prefix $n`.
    One(Value),
    /// Rendered as `prefix ( $n, $m, ... )`, for `IN` lists.
    Many(Vec<Value>),
}

/// One condition inside a boolean group.
#[derive(Clone, Debug)]
pub enum Unit {
    /// Raw SQL, passed through verbatim.
    Literal(String),

    /// An operator prefix such as `"age >"` followed by bound value(s).
    /// `value: None` renders nothing, which is how optional filters drop out.
    Pair { prefix: String, value: Option<Bind> },

    /// `key = value` per entry, ANDed together.
    Mapping(Mapping),

    /// A nested filler, usually another `and` / `or`.
    Fragment(Filler),
}

impl Unit {
    /// Raw SQL text.
    pub fn literal(sql: impl Into<String>) -> Self {
        Unit::Literal(sql.into())
    }

    /// `prefix $n` bound to `value`.
    pub fn pair(prefix: impl Into<String>, value: impl Into<Value>) -> Self {
        Unit::Pair {
            prefix: prefix.into(),
            value: Some(Bind::One(value.into())),
        }
    }

    /// Like [`Unit::pair`], but renders nothing when `value` is `None`.
    pub fn pair_opt<V: Into<Value>>(prefix: impl Into<String>, value: Option<V>) -> Self {
        Unit::Pair {
            prefix: prefix.into(),
            value: value.map(|v| Bind::One(v.into())),
        }
    }

    /// `prefix ( $n, $m, ... )` with one placeholder per element.
    ///
    /// An empty list renders `prefix ( NULL )`: valid SQL that matches no row.
    pub fn list<V, I>(prefix: impl Into<String>, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Unit::Pair {
            prefix: prefix.into(),
            value: Some(Bind::Many(values.into_iter().map(Into::into).collect())),
        }
    }

    /// A custom fragment.
    pub fn fragment<F>(f: F) -> Self
    where
        F: Fn(&mut Placeholders) -> String + Send + Sync + 'static,
    {
        Unit::Fragment(Filler::new(f))
    }

    /// Render this unit. `None` means it contributes nothing to its group.
    pub fn render(&self, placeholders: &mut Placeholders) -> Option<String> {
        let sql = match self {
            Unit::Literal(sql) => sql.clone(),
            Unit::Pair { value: None, .. } => return None,
            Unit::Pair {
                prefix,
                value: Some(Bind::One(value)),
            } => format!("{} {}", prefix, placeholders.bind(value.clone())),
            Unit::Pair {
                prefix,
                value: Some(Bind::Many(values)),
            } => {
                if values.is_empty() {
                    format!("{prefix} ( NULL )")
                } else {
                    let markers: Vec<String> =
                        values.iter().map(|v| placeholders.bind(v.clone())).collect();
                    format!("{} ( {} )", prefix, markers.join(", "))
                }
            }
            Unit::Mapping(mapping) => render_group(&mapping.to_units(), " AND ", placeholders),
            Unit::Fragment(filler) => filler.fill(placeholders),
        };
        (!sql.is_empty()).then_some(sql)
    }
}

impl From<&str> for Unit {
    fn from(sql: &str) -> Self {
        Unit::Literal(sql.to_string())
    }
}

impl From<String> for Unit {
    fn from(sql: String) -> Self {
        Unit::Literal(sql)
    }
}

impl From<Filler> for Unit {
    fn from(filler: Filler) -> Self {
        Unit::Fragment(filler)
    }
}

impl From<Mapping> for Unit {
    fn from(mapping: Mapping) -> Self {
        Unit::Mapping(mapping)
    }
}

/// Comparison operators accepted in a pair prefix built from JSON.
const JSON_OPERATORS: &[&str] = &[
    "=", "<>", "!=", "<", "<=", ">", ">=", "LIKE", "NOT LIKE", "ILIKE", "NOT ILIKE", "IN",
    "NOT IN", "IS", "IS NOT", "IS DISTINCT FROM", "IS NOT DISTINCT FROM",
];

/// Build a unit from untyped JSON, e.g. a filter sent by a client.
///
/// Nothing from the JSON reaches the SQL text unchecked:
///
/// - `["column op", value]` becomes a pair; `column` must be a valid
///   [`Ident`] and `op` one of the comparison operators (`=`, `<`, `IN`,
///   `ILIKE`, ...). An array value becomes a list.
/// - `{"column": value, ...}` becomes a mapping of scalars with validated keys.
///
/// Raw SQL strings are rejected; build [`Unit::Literal`] in code instead.
impl TryFrom<serde_json::Value> for Unit {
    type Error = FillError;

    fn try_from(json: serde_json::Value) -> FillResult<Self> {
        unit_from_json(json).or_else(reject)
    }
}

fn unit_from_json(json: serde_json::Value) -> FillResult<Unit> {
    use serde_json::Value as Json;

    match json {
        Json::Array(items) => {
            let pair: [Json; 2] = items.try_into().map_err(|items: Vec<Json>| {
                FillError::invalid_unit(format!(
                    "expected [prefix, value], got {}",
                    Json::Array(items)
                ))
            })?;
            let (prefix, value) = match pair {
                [Json::String(prefix), value] => (json_prefix(&prefix)?, value),
                [other, _] => {
                    return Err(FillError::invalid_unit(format!(
                        "pair prefix must be a string, got {other}"
                    )));
                }
            };
            let bind = match value {
                Json::Array(list) => Bind::Many(
                    list.into_iter()
                        .map(json_scalar)
                        .collect::<FillResult<Vec<_>>>()?,
                ),
                other => Bind::One(Value::from_json(other)),
            };
            Ok(Unit::Pair {
                prefix,
                value: Some(bind),
            })
        }
        Json::Object(map) => {
            let mut mapping = Mapping::new();
            for (key, value) in map {
                let column = json_column(&key)?;
                mapping.insert(column, Some(json_scalar(value)?));
            }
            Ok(Unit::Mapping(mapping))
        }
        Json::String(sql) => Err(FillError::invalid_unit(format!(
            "raw SQL is not accepted from JSON: {sql:?}"
        ))),
        other => Err(FillError::invalid_unit(other.to_string())),
    }
}

fn json_column(name: &str) -> FillResult<String> {
    Ident::parse(name)
        .map(|ident| ident.to_sql())
        .map_err(|err| FillError::invalid_unit(format!("column {name:?}: {err}")))
}

/// `"column op"` -> validated column plus a canonical operator.
fn json_prefix(prefix: &str) -> FillResult<String> {
    let prefix = prefix.trim();
    let Some((column, op)) = prefix.split_once(char::is_whitespace) else {
        return Err(FillError::invalid_unit(format!(
            "pair prefix {prefix:?} must be \"column operator\""
        )));
    };
    let op = op.split_whitespace().collect::<Vec<_>>().join(" ").to_ascii_uppercase();
    if !JSON_OPERATORS.contains(&op.as_str()) {
        return Err(FillError::invalid_unit(format!(
            "unsupported operator {op:?} in pair prefix"
        )));
    }
    Ok(format!("{} {}", json_column(column)?, op))
}

fn json_scalar(json: serde_json::Value) -> FillResult<Value> {
    if json.is_array() || json.is_object() {
        return Err(FillError::invalid_unit(format!("expected a scalar, got {json}")));
    }
    Ok(Value::from_json(json))
}

/// Column/value entries in insertion order.
///
/// Keys built in code are written into the SQL text as-is; only values are
/// bound. Mappings converted from JSON have validated keys.
/// A `None` value marks an absent entry: it is skipped when rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Option<Value>)>,
    index: HashMap<String, usize>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key = value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Add `key = value` only if `value` is present.
    pub fn with_opt<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert(key, value.map(Into::into));
        self
    }

    /// Set an entry. Re-inserting a key replaces its value but keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<Value>) -> &mut Self {
        let key = key.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
        self
    }

    /// Number of entries, including absent ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that have a value.
    pub fn defined(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }

    /// One `"key ="` pair per entry.
    pub fn to_units(&self) -> Vec<Unit> {
        self.entries
            .iter()
            .map(|(key, value)| Unit::Pair {
                prefix: format!("{key} ="),
                value: value.clone().map(Bind::One),
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, Some(v.into()));
        }
        mapping
    }
}
