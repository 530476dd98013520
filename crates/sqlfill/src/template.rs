//! Template assembly.
//!
//! A template is a list of text segments interleaved with fillers:
//! `text[0] filler[0] text[1] filler[1] ... text[n]`. Rendering walks it left
//! to right with a single [`Placeholders`] collector, so placeholder numbering
//! runs across the whole statement.
//!
//! # Example
//!
//! ```ignore
//! use sqlfill::{Template, and, limit, where_, Unit};
//!
//! let q = Template::new("SELECT * FROM users ")
//!     .fill(where_([and([Unit::pair("id =", 1), Unit::pair("name like", "apple")]).into()])?)
//!     .text(" ")
//!     .fill(limit(10i64))
//!     .psql()?;
//!
//! assert_eq!(q.sql, "SELECT * FROM users WHERE ( id = $1 AND name like $2 ) LIMIT $3");
//! # Ok::<(), sqlfill::FillError>(())
//! ```

use crate::error::{FillError, FillResult, reject};
use crate::fill::Filler;
use crate::placeholder::{PlaceholderStyle, Placeholders};
use crate::value::Value;
use serde::Serialize;
use tokio_postgres::types::ToSql;

/// Final SQL text and the values for its placeholders, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub sql: String,
    pub values: Vec<Value>,
}

impl Rendered {
    pub fn new(sql: String, values: Vec<Value>) -> Self {
        Self { sql, values }
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }

    /// Split into `(sql, values)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.values)
    }
}

/// Interleave `segments` and `fillers`, rendering each filler with `placeholders`.
///
/// Requires `segments.len() == fillers.len() + 1`.
pub fn render<S: AsRef<str>>(
    segments: &[S],
    fillers: &[Filler],
    mut placeholders: Placeholders,
) -> FillResult<Rendered> {
    if segments.len() != fillers.len() + 1 {
        return reject(FillError::SegmentMismatch {
            segments: segments.len(),
            fillers: fillers.len(),
        });
    }

    let mut out = String::from(segments[0].as_ref());
    for (filler, segment) in fillers.iter().zip(&segments[1..]) {
        out.push_str(&filler.fill(&mut placeholders));
        out.push_str(segment.as_ref());
    }
    Ok(Rendered::new(out, placeholders.into_values()))
}

/// [`render`] with `?` markers.
pub fn sql<S: AsRef<str>>(segments: &[S], fillers: &[Filler]) -> FillResult<Rendered> {
    render(segments, fillers, Placeholders::anonymous())
}

/// [`render`] with `$n` markers.
pub fn psql<S: AsRef<str>>(segments: &[S], fillers: &[Filler]) -> FillResult<Rendered> {
    render(segments, fillers, Placeholders::positional())
}

/// Builder that keeps text and fillers correctly interleaved.
#[derive(Clone, Debug, Default)]
pub struct Template {
    segments: Vec<String>,
    fillers: Vec<Filler>,
}

impl Template {
    /// Start a template with leading text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            segments: vec![text.into()],
            fillers: Vec::new(),
        }
    }

    /// Append literal SQL text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if self.segments.len() == self.fillers.len() {
            self.segments.push(text);
        } else if let Some(last) = self.segments.last_mut() {
            last.push_str(&text);
        }
        self
    }

    /// Append a filler.
    pub fn fill(mut self, filler: Filler) -> Self {
        if self.segments.len() == self.fillers.len() {
            self.segments.push(String::new());
        }
        self.fillers.push(filler);
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn fillers(&self) -> &[Filler] {
        &self.fillers
    }

    /// Render with the given marker style.
    pub fn render_with(&self, style: PlaceholderStyle) -> FillResult<Rendered> {
        if self.segments.len() == self.fillers.len() {
            let mut segments = self.segments.clone();
            segments.push(String::new());
            return render(&segments, &self.fillers, Placeholders::new(style));
        }
        render(&self.segments, &self.fillers, Placeholders::new(style))
    }

    /// Render with `?` markers.
    pub fn sql(&self) -> FillResult<Rendered> {
        self.render_with(PlaceholderStyle::Anonymous)
    }

    /// Render with `$n` markers.
    pub fn psql(&self) -> FillResult<Rendered> {
        self.render_with(PlaceholderStyle::Positional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::{limit, offset};

    #[test]
    fn render_interleaves_in_order() {
        let rendered = psql(&["A ", " B ", " C"], &[limit(5i64), offset(7i64)]).unwrap();
        assert_eq!(rendered.sql, "A LIMIT $1 B OFFSET $2 C");
        assert_eq!(rendered.values, vec![Value::Int(5), Value::Int(7)]);
    }

    #[test]
    fn render_without_fillers() {
        let rendered = sql(&["SELECT 1"], &[]).unwrap();
        assert_eq!(rendered.sql, "SELECT 1");
        assert!(rendered.values.is_empty());
    }

    #[test]
    fn render_rejects_mismatched_segments() {
        let err = sql(&["a", "b"], &[]).unwrap_err();
        assert_eq!(err, FillError::SegmentMismatch { segments: 2, fillers: 0 });
    }

    #[test]
    fn template_merges_text_and_pads_segments() {
        let t = Template::new("SELECT * FROM t")
            .text(" ")
            .fill(limit(3i64))
            .fill(Filler::raw(" -- tail"));
        assert_eq!(t.segments(), &["SELECT * FROM t ".to_string(), String::new()]);
        assert_eq!(t.fillers().len(), 2);

        let rendered = t.sql().unwrap();
        assert_eq!(rendered.sql, "SELECT * FROM t LIMIT ? -- tail");
        assert_eq!(rendered.values, vec![Value::Int(3)]);
    }

    #[test]
    fn template_text_takes_owned_strings() {
        let table = String::from("users");
        let rendered = Template::new(format!("SELECT * FROM {table} "))
            .fill(limit(1i64))
            .text(format!(" -- {table}"))
            .text(String::from("!"))
            .psql()
            .unwrap();
        assert_eq!(rendered.sql, "SELECT * FROM users LIMIT $1 -- users!");
    }

    #[test]
    fn params_ref_matches_values() {
        let rendered = psql(&["", ""], &[limit(9i64)]).unwrap();
        assert_eq!(rendered.params_ref().len(), 1);
        let (sql, values) = rendered.into_parts();
        assert_eq!(sql, "LIMIT $1");
        assert_eq!(values, vec![Value::Int(9)]);
    }
}
