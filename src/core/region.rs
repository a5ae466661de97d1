use std::collections::{BTreeSet, HashMap};

/// Suffix that marks a province-wide region code
pub const PROVINCE_SUFFIX: &str = "000";

/// Width of a region code, in characters
pub const REGION_CODE_LEN: usize = 5;

/// Width of the province prefix inside a region code
pub const PROVINCE_PREFIX_LEN: usize = 2;

/// Read-only lookup from a 2-character province prefix to its district codes.
///
/// Built once at start-up and shared behind an `Arc`; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct RegionDirectory {
    districts: HashMap<String, BTreeSet<String>>,
}

impl RegionDirectory {
    /// Build a directory from a flat list of known region codes.
    ///
    /// Province-level codes are skipped; only district codes are grouped.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut districts: HashMap<String, BTreeSet<String>> = HashMap::new();

        for code in codes {
            let code = code.as_ref().trim();
            if code.chars().count() != REGION_CODE_LEN || is_province_code(code) {
                continue;
            }
            if let Some(prefix) = province_prefix(code) {
                districts
                    .entry(prefix.to_string())
                    .or_default()
                    .insert(code.to_string());
            }
        }

        Self { districts }
    }

    /// All district codes registered under `prefix`
    pub fn codes_by_prefix(&self, prefix: &str) -> Option<&BTreeSet<String>> {
        self.districts.get(prefix)
    }

    pub fn province_count(&self) -> usize {
        self.districts.len()
    }

    pub fn district_count(&self) -> usize {
        self.districts.values().map(BTreeSet::len).sum()
    }
}

/// Whether `code` denotes a whole province ("41000")
#[inline]
pub fn is_province_code(code: &str) -> bool {
    code.chars().count() == REGION_CODE_LEN && code.ends_with(PROVINCE_SUFFIX)
}

/// First two characters of `code`, or `None` for shorter codes
#[inline]
fn province_prefix(code: &str) -> Option<&str> {
    let mut boundaries = code.char_indices().map(|(i, _)| i).chain(std::iter::once(code.len()));
    boundaries
        .nth(PROVINCE_PREFIX_LEN)
        .map(|end| &code[..end])
}

/// Expand region codes into every code that should match them.
///
/// Each input code is kept. A province code pulls in all of its districts so
/// that district-registered policies match; any code with a 2-character
/// prefix also pulls in its province code so that province-wide policies
/// match. Empty input stays empty.
pub fn expand_region_codes(
    codes: &BTreeSet<String>,
    directory: &RegionDirectory,
) -> BTreeSet<String> {
    let mut expanded = BTreeSet::new();

    for code in codes {
        expanded.insert(code.clone());

        let Some(prefix) = province_prefix(code) else {
            continue;
        };

        if is_province_code(code) {
            if let Some(districts) = directory.codes_by_prefix(prefix) {
                expanded.extend(districts.iter().cloned());
            }
        }

        expanded.insert(format!("{prefix}{PROVINCE_SUFFIX}"));
    }

    expanded
}
