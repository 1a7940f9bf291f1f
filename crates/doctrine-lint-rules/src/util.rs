//! Helpers shared by the rules.

use doctrine_lint_core::{AttributeUsage, Property};

/// Formats property names as `$a, $b`.
pub(crate) fn property_list<'a>(props: impl IntoIterator<Item = &'a Property>) -> String {
    props
        .into_iter()
        .map(|p| format!("${}", p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The first `#[Column]` on `prop` together with its resolved DBAL type.
///
/// `None` when there is no column or its type is not written as a literal
/// or `Types::` constant.
pub(crate) fn column_type(prop: &Property) -> Option<(&AttributeUsage, String)> {
    let column = prop.attribute("Column")?;
    let ty = column.arg("type")?.as_column_type()?;
    Some((column, ty))
}
