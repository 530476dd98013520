//! Composable SQL fragments ("fillers").
//!
//! A [`Filler`] renders one piece of SQL text against a shared
//! [`Placeholders`] collector. Fillers nest: any filler can be dropped into
//! [`and`] / [`or`] as a [`Unit::Fragment`], and the collector numbers
//! placeholders in the order the fragments are rendered (depth-first, left to
//! right), which matches the order they appear in the final text.
//!
//! # Example
//!
//! ```ignore
//! use sqlfill::{and, or, where_, Filler, Placeholders, Unit};
//!
//! let filter = where_([and([
//!     Unit::pair("name =", "aname"),
//!     or([Unit::list("id IN", ["aid", "bid"]), "address = 'somewhere'".into()]).into(),
//!     Unit::pair_opt("date =", None::<&str>),
//! ])
//! .into()])?;
//!
//! let mut p = Placeholders::positional();
//! assert_eq!(
//!     filter.fill(&mut p),
//!     "WHERE ( name = $1 AND ( id IN ( $2, $3 ) OR address = 'somewhere' ) )"
//! );
//! # Ok::<(), sqlfill::FillError>(())
//! ```

mod clause;
mod logic;
mod unit;

pub use clause::{limit, offset, select, set, values, where_};
pub use logic::{and, or};
pub use unit::{Bind, Mapping, Unit};

use crate::placeholder::{PlaceholderStyle, Placeholders};
use crate::template::Rendered;
use std::fmt;
use std::sync::Arc;

/// A function from the shared collector to rendered SQL text.
///
/// Cloning is cheap; the closure is shared.
#[derive(Clone)]
pub struct Filler(Arc<dyn Fn(&mut Placeholders) -> String + Send + Sync>);

impl Filler {
    /// Wrap a rendering closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Placeholders) -> String + Send + Sync + 'static,
    {
        Filler(Arc::new(f))
    }

    /// A filler that always renders `sql` and binds nothing.
    pub fn raw(sql: impl Into<String>) -> Self {
        let sql = sql.into();
        Filler::new(move |_| sql.clone())
    }

    /// Render against `placeholders`, recording any bound values there.
    pub fn fill(&self, placeholders: &mut Placeholders) -> String {
        (self.0)(placeholders)
    }

    /// Render on its own with a fresh collector.
    pub fn build(&self, style: PlaceholderStyle) -> Rendered {
        let mut placeholders = Placeholders::new(style);
        let sql = self.fill(&mut placeholders);
        Rendered::new(sql, placeholders.into_values())
    }
}

impl fmt::Debug for Filler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filler").field(&"<fn>").finish()
    }
}
