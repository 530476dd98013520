//! Clause fillers: WHERE, VALUES, SELECT, SET, LIMIT, OFFSET.

use super::Filler;
use super::logic::and;
use super::unit::{Mapping, Unit};
use crate::error::{FillError, FillResult, reject};
use crate::ident::Ident;
use crate::value::Value;

/// `WHERE ...` over an implicit AND of `units`.
///
/// A single fragment (typically an [`and`] / [`or`] group) is used as-is and
/// a single mapping is expanded to `key = value` pairs. If every condition
/// drops out the filler renders nothing, so the query simply has no WHERE.
///
/// Fails if `units` is empty.
pub fn where_(units: impl IntoIterator<Item = Unit>) -> FillResult<Filler> {
    let mut units: Vec<Unit> = units.into_iter().collect();
    let inner = match units.len() {
        0 => return reject(FillError::EmptyWhere),
        1 => match units.remove(0) {
            Unit::Fragment(filler) => filler,
            other => and([other]),
        },
        _ => and(units),
    };

    Ok(Filler::new(move |p| {
        let condition = inner.fill(p);
        if condition.is_empty() {
            String::new()
        } else {
            format!("WHERE {condition}")
        }
    }))
}

/// `(col1, col2) VALUES ($1, $2)` in insertion order.
///
/// Absent entries are skipped. Fails if nothing remains to insert.
pub fn values(data: Mapping) -> FillResult<Filler> {
    let entries = defined_entries(&data);
    if entries.is_empty() {
        return reject(FillError::EmptyValues);
    }

    Ok(Filler::new(move |p| {
        let columns: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        let markers: Vec<String> = entries.iter().map(|(_, v)| p.bind(v.clone())).collect();
        format!("({}) VALUES ({})", columns.join(", "), markers.join(", "))
    }))
}

/// `SELECT col1, col2, ...`.
///
/// Columns are identifiers, so they are validated and written into the text
/// instead of being bound. `*` and `table.*` are accepted.
pub fn select<I, S>(columns: I) -> FillResult<Filler>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rendered = Vec::new();
    for column in columns {
        let column = column.as_ref();
        let sql = if column == "*" {
            column.to_string()
        } else if let Some(table) = column.strip_suffix(".*") {
            match Ident::parse(table) {
                Ok(ident) => format!("{}.*", ident.to_sql()),
                Err(err) => return reject(err),
            }
        } else {
            match Ident::parse(column) {
                Ok(ident) => ident.to_sql(),
                Err(err) => return reject(err),
            }
        };
        rendered.push(sql);
    }
    if rendered.is_empty() {
        return reject(FillError::invalid_ident("select list cannot be empty"));
    }

    let sql = format!("SELECT {}", rendered.join(", "));
    Ok(Filler::raw(sql))
}

/// `SET col1 = $1, col2 = $2` in insertion order.
///
/// Absent entries are skipped. Fails if nothing remains to set.
pub fn set(data: Mapping) -> FillResult<Filler> {
    let entries = defined_entries(&data);
    if entries.is_empty() {
        return reject(FillError::EmptySet);
    }

    Ok(Filler::new(move |p| {
        let assignments: Vec<String> = entries
            .iter()
            .map(|(k, v)| format!("{} = {}", k, p.bind(v.clone())))
            .collect();
        format!("SET {}", assignments.join(", "))
    }))
}

/// `LIMIT $n`, or nothing when `n` is `None` or `0`.
///
/// `LIMIT 0` cannot be expressed: zero is treated as "not provided".
pub fn limit(n: impl Into<Option<i64>>) -> Filler {
    keyword_bind("LIMIT", n.into())
}

/// `OFFSET $n`, or nothing when `n` is `None` or `0`.
pub fn offset(n: impl Into<Option<i64>>) -> Filler {
    keyword_bind("OFFSET", n.into())
}

fn keyword_bind(keyword: &'static str, n: Option<i64>) -> Filler {
    let n = n.filter(|v| *v != 0);
    Filler::new(move |p| match n {
        Some(v) => format!("{} {}", keyword, p.bind(v)),
        None => String::new(),
    })
}

fn defined_entries(data: &Mapping) -> Vec<(String, Value)> {
    data.defined()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
