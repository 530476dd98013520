//! `AND` / `OR` groups.

use super::Filler;
use super::unit::Unit;
use crate::placeholder::Placeholders;

/// AND group: `( a AND b AND ... )`.
///
/// Units that render nothing are dropped; if none remain the group renders an
/// empty string. Mapping units are spliced in as one pair per entry.
pub fn and(units: impl IntoIterator<Item = Unit>) -> Filler {
    let units: Vec<Unit> = units
        .into_iter()
        .flat_map(|unit| match unit {
            Unit::Mapping(mapping) => mapping.to_units(),
            other => vec![other],
        })
        .collect();
    Filler::new(move |p| render_group(&units, " AND ", p))
}

/// OR group: `( a OR b OR ... )`.
///
/// Same omission rules as [`and`]. A mapping unit becomes a nested AND group.
pub fn or(units: impl IntoIterator<Item = Unit>) -> Filler {
    let units: Vec<Unit> = units.into_iter().collect();
    Filler::new(move |p| render_group(&units, " OR ", p))
}

/// Render units in order, skip the empty ones, join and parenthesize.
pub(super) fn render_group(units: &[Unit], separator: &str, p: &mut Placeholders) -> String {
    let parts: Vec<String> = units.iter().filter_map(|unit| unit.render(p)).collect();
    if parts.is_empty() {
        return String::new();
    }
    format!("( {} )", parts.join(separator))
}
