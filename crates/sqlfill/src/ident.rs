//! SQL identifier validation.
//!
//! Identifiers cannot be bound as parameters, so columns named in a `SELECT`
//! list are written into the SQL text after passing through [`Ident::parse`].
//!
//! - Unquoted parts must match `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted parts allow any characters except NUL and escape `"` as `""`
//!
//! # Example
//! ```ignore
//! use sqlfill::Ident;
//!
//! let c = Ident::parse(r#"public."UserTable".id"#)?;
//! assert_eq!(c.to_sql(), r#"public."UserTable".id"#);
//! # Ok::<(), sqlfill::FillError>(())
//! ```

use crate::error::{FillError, FillResult};

/// A part of a SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    Unquoted(String),
    Quoted(String),
}

/// A dotted, optionally quoted, SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<IdentPart>,
}

impl Ident {
    /// Parse an identifier such as `users`, `u.name` or `"Odd Name".id`.
    pub fn parse(s: &str) -> FillResult<Self> {
        if s.is_empty() {
            return Err(FillError::invalid_ident("identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(FillError::invalid_ident(format!(
                "'{}' contains a NUL character",
                s.escape_debug()
            )));
        }

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while chars.peek().is_some() {
            if !parts.is_empty() {
                match chars.next() {
                    Some('.') if chars.peek().is_some() => {}
                    Some('.') => {
                        return Err(FillError::invalid_ident(format!("trailing '.' in '{s}'")));
                    }
                    Some(c) => {
                        return Err(FillError::invalid_ident(format!(
                            "expected '.' between parts of '{s}', got '{c}'"
                        )));
                    }
                    None => break,
                }
            }

            if chars.peek() == Some(&'"') {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                            name.push('"');
                        }
                        Some('"') => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(FillError::invalid_ident(format!(
                                "unclosed quote in '{s}'"
                            )));
                        }
                    }
                }
                if name.is_empty() {
                    return Err(FillError::invalid_ident(format!("empty quoted part in '{s}'")));
                }
                parts.push(IdentPart::Quoted(name));
                continue;
            }

            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                let ok = if name.is_empty() {
                    c == '_' || c.is_ascii_alphabetic()
                } else {
                    c == '_' || c == '$' || c.is_ascii_alphanumeric()
                };
                if !ok {
                    return Err(FillError::invalid_ident(format!(
                        "invalid character '{c}' in '{s}'"
                    )));
                }
                name.push(c);
                chars.next();
            }
            if name.is_empty() {
                return Err(FillError::invalid_ident(format!("empty part in '{s}'")));
            }
            parts.push(IdentPart::Unquoted(name));
        }

        Ok(Self { parts })
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match part {
                IdentPart::Unquoted(s) => out.push_str(s),
                IdentPart::Quoted(s) => {
                    out.push('"');
                    out.push_str(&s.replace('"', "\"\""));
                    out.push('"');
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        assert_eq!(Ident::parse("users").unwrap().to_sql(), "users");
    }

    #[test]
    fn ident_dotted() {
        assert_eq!(Ident::parse("u.name").unwrap().to_sql(), "u.name");
    }

    #[test]
    fn ident_quoted_with_escape() {
        let ident = Ident::parse(r#""has""quote""#).unwrap();
        assert_eq!(ident.parts, vec![IdentPart::Quoted("has\"quote".into())]);
        assert_eq!(ident.to_sql(), r#""has""quote""#);
    }

    #[test]
    fn ident_mixed() {
        let ident = Ident::parse(r#"public."UserTable".id"#).unwrap();
        assert_eq!(ident.to_sql(), r#"public."UserTable".id"#);
    }

    #[test]
    fn ident_rejects_injection() {
        let err = Ident::parse("name; DROP TABLE users").unwrap_err();
        assert!(matches!(err, FillError::InvalidIdent(_)));
    }

    #[test]
    fn ident_rejects_malformed() {
        for bad in ["", "1col", "a..b", "a.", r#""open"#, r#""""#] {
            assert!(Ident::parse(bad).is_err(), "{bad} should be rejected");
        }
    }
}
