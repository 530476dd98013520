//! Variadic helpers.
//!
//! Each argument goes through `Unit::from`, so string literals, fillers and
//! mappings can be mixed with explicit `Unit::pair(..)` calls:
//!
//! ```ignore
//! let filter = sqlfill::where_![sqlfill::or![
//!     Unit::pair("role =", "admin"),
//!     "is_superuser",
//! ]]?;
//! ```

/// `and!(a, b, ...)` is `and([Unit::from(a), Unit::from(b), ...])`.
#[macro_export]
macro_rules! and {
    ($($unit:expr),* $(,)?) => {{
        let units: ::std::vec::Vec<$crate::Unit> = ::std::vec![$($crate::Unit::from($unit)),*];
        $crate::and(units)
    }};
}

/// `or!(a, b, ...)` is `or([Unit::from(a), Unit::from(b), ...])`.
#[macro_export]
macro_rules! or {
    ($($unit:expr),* $(,)?) => {{
        let units: ::std::vec::Vec<$crate::Unit> = ::std::vec![$($crate::Unit::from($unit)),*];
        $crate::or(units)
    }};
}

/// `where_!(a, b, ...)` is `where_([Unit::from(a), Unit::from(b), ...])`.
#[macro_export]
macro_rules! where_ {
    ($($unit:expr),* $(,)?) => {{
        let units: ::std::vec::Vec<$crate::Unit> = ::std::vec![$($crate::Unit::from($unit)),*];
        $crate::where_(units)
    }};
}

/// Build a [`Mapping`](crate::Mapping) in insertion order.
///
/// ```ignore
/// let data = sqlfill::mapping! { "name" => "a name", "age" => 30 };
/// ```
#[macro_export]
macro_rules! mapping {
    ($($key:expr => $value:expr),* $(,)?) => {
        $crate::Mapping::new()$(.with($key, $value))*
    };
}
