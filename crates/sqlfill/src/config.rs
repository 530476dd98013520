//! Renderer configuration.

use crate::error::FillResult;
use crate::fill::Filler;
use crate::placeholder::{PlaceholderStyle, Placeholders};
use crate::template::{Rendered, Template, render};
use serde::{Deserialize, Serialize};

/// Configuration for a [`Renderer`].
///
/// Deserializable, so it can live in an application's config file:
///
/// ```toml
/// [sql]
/// style = "anonymous"
/// max_sql_length = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Placeholder marker style.
    pub style: PlaceholderStyle,
    /// Whether to emit a `tracing` event per render.
    pub trace: bool,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: PlaceholderStyle::Positional,
            trace: true,
            max_sql_length: Some(200),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder style.
    pub fn with_style(mut self, style: PlaceholderStyle) -> Self {
        self.style = style;
        self
    }

    /// Set maximum SQL length to log.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    /// Disable render logging.
    pub fn disable_trace(mut self) -> Self {
        self.trace = false;
        self
    }
}

/// Renders templates with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// A fresh collector in the configured style.
    pub fn placeholders(&self) -> Placeholders {
        Placeholders::new(self.config.style)
    }

    /// Render interleaved `segments` and `fillers`.
    pub fn render<S: AsRef<str>>(&self, segments: &[S], fillers: &[Filler]) -> FillResult<Rendered> {
        let rendered = render(segments, fillers, self.placeholders())?;
        self.trace(&rendered);
        Ok(rendered)
    }

    /// Render a [`Template`].
    pub fn render_template(&self, template: &Template) -> FillResult<Rendered> {
        let rendered = template.render_with(self.config.style)?;
        self.trace(&rendered);
        Ok(rendered)
    }

    /// Render a single filler on its own.
    pub fn render_filler(&self, filler: &Filler) -> Rendered {
        let rendered = filler.build(self.config.style);
        self.trace(&rendered);
        rendered
    }

    #[cfg(feature = "tracing")]
    fn trace(&self, rendered: &Rendered) {
        if !self.config.trace {
            return;
        }
        let sql = match self.config.max_sql_length {
            Some(max) if rendered.sql.len() > max => {
                format!("{}...", truncate_sql_bytes(&rendered.sql, max))
            }
            _ => rendered.sql.clone(),
        };
        tracing::debug!(
            target: "sqlfill.render",
            style = %self.config.style,
            param_count = rendered.values.len(),
            sql = %sql,
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn trace(&self, _rendered: &Rendered) {}
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::limit;
    use crate::value::Value;

    #[test]
    fn default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.style, PlaceholderStyle::Positional);
        assert!(config.trace);
        assert_eq!(config.max_sql_length, Some(200));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{"style": "?"}"#).unwrap();
        assert_eq!(config.style, PlaceholderStyle::Anonymous);
        assert_eq!(config.max_sql_length, Some(200));

        let err = serde_json::from_str::<RenderConfig>(r#"{"style": "named"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn config_round_trips_style_name() {
        let config = RenderConfig::new().with_style(PlaceholderStyle::Anonymous).no_truncate();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["style"], "anonymous");
        assert_eq!(json["max_sql_length"], serde_json::Value::Null);
    }

    #[test]
    fn renderer_uses_configured_style() {
        let renderer = Renderer::new(RenderConfig::new().with_style(PlaceholderStyle::Anonymous));
        let rendered = renderer.render(&["SELECT * FROM t ", ""], &[limit(4i64)]).unwrap();
        assert_eq!(rendered.sql, "SELECT * FROM t LIMIT ?");
        assert_eq!(rendered.values, vec![Value::Int(4)]);
    }

    #[test]
    fn renderer_renders_single_filler() {
        let renderer = Renderer::default();
        let rendered = renderer.render_filler(&limit(2i64));
        assert_eq!(rendered.sql, "LIMIT $1");
    }

    #[test]
    fn truncate_respects_char_boundary() {
        assert_eq!(truncate_sql_bytes("héllo", 2), "h");
        assert_eq!(truncate_sql_bytes("abc", 10), "abc");
    }
}
