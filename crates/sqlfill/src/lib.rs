//! # sqlfill
//!
//! Parameter-safe SQL composition from small, nestable fragments.
//!
//! ## Features
//!
//! - **Never interpolates values**: every value becomes a placeholder and is
//!   returned separately, ready for a driver's parameterized query API
//! - **Automatic numbering**: `$1, $2, ...` (or `?`) assigned in render order
//!   across the whole statement, however deeply conditions are nested
//! - **Optional filters**: a condition whose value is `None` simply drops out,
//!   and an empty group drops its `WHERE` entirely
//! - **No SQL parsing**: fragments are assembled as text; the caller supplies
//!   sound SQL around them
//!
//! ## Example
//!
//! ```ignore
//! use sqlfill::{Template, Unit, and, limit, offset, or, where_};
//!
//! let status: Option<&str> = None;
//! let q = Template::new("SELECT * FROM users ")
//!     .fill(where_([and([
//!         Unit::pair("name =", "aname"),
//!         or([Unit::list("id IN", ["aid", "bid"]), "address = 'somewhere'".into()]).into(),
//!         Unit::pair_opt("status =", status),
//!     ])
//!     .into()])?)
//!     .text(" ")
//!     .fill(limit(10i64))
//!     .text(" ")
//!     .fill(offset(20i64))
//!     .psql()?;
//!
//! // SELECT * FROM users WHERE ( name = $1 AND ( id IN ( $2, $3 ) OR address = 'somewhere' ) ) LIMIT $4 OFFSET $5
//! client.query(&q.sql, &q.params_ref()).await?;
//! ```

pub mod config;
pub mod error;
pub mod fill;
pub mod ident;
mod macros;
pub mod placeholder;
pub mod template;
pub mod value;

pub use config::{RenderConfig, Renderer};
pub use error::{FillError, FillResult};
pub use fill::{Bind, Filler, Mapping, Unit, and, limit, offset, or, select, set, values, where_};
pub use ident::{Ident, IdentPart};
pub use placeholder::{PlaceholderStyle, Placeholders};
pub use template::{Rendered, Template, psql, render, sql};
pub use value::Value;
