use std::collections::BTreeSet;

/// Drop null, empty and whitespace-only entries, trimming the rest.
///
/// Applied identically to every set-valued eligibility dimension. No other
/// validation happens here; unknown values simply fail to match downstream.
pub fn normalize_values<'a, I>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values
        .into_iter()
        .flatten()
        .filter_map(normalize_scalar)
        .collect()
}

/// Trim a single optional value, mapping blank input to `None`
#[inline]
pub fn normalize_scalar(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalize a raw request list of nullable strings
pub fn normalize_list(values: &[Option<String>]) -> BTreeSet<String> {
    normalize_values(values.iter().map(|value| value.as_deref()))
}
