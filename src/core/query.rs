use crate::core::normalize::{normalize_list, normalize_scalar};
use crate::core::region::{expand_region_codes, RegionDirectory};
use crate::models::{EligibilityCriteria, SearchRequest};
use std::collections::BTreeSet;
use std::sync::Arc;

impl EligibilityCriteria {
    /// Normalize every dimension of a raw search request
    pub fn from_request(request: &SearchRequest) -> Self {
        Self {
            age: request.age,
            marital_status: request.marital_status.as_deref().and_then(normalize_scalar),
            income: request.income,
            regions: normalize_list(&request.regions),
            education_levels: normalize_list(&request.education_levels),
            employment_statuses: normalize_list(&request.employment_statuses),
            majors: normalize_list(&request.majors),
            special_conditions: normalize_list(&request.special_conditions),
            keywords: normalize_list(&request.keywords),
            free_text: request.free_text.as_deref().and_then(normalize_scalar),
        }
    }
}

/// Query contract handed to the policy store.
///
/// Only [`EligibilityQueryBuilder`] constructs it, so the region set has been
/// expanded exactly once and no member of any set is blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityQuery {
    age: Option<u32>,
    marital_status: Option<String>,
    income: Option<u64>,
    regions: BTreeSet<String>,
    education_levels: BTreeSet<String>,
    employment_statuses: BTreeSet<String>,
    majors: BTreeSet<String>,
    special_conditions: BTreeSet<String>,
    keywords: BTreeSet<String>,
    free_text: Option<String>,
}

impl EligibilityQuery {
    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn marital_status(&self) -> Option<&str> {
        self.marital_status.as_deref()
    }

    pub fn income(&self) -> Option<u64> {
        self.income
    }

    /// Region codes after hierarchical expansion
    pub fn regions(&self) -> &BTreeSet<String> {
        &self.regions
    }

    pub fn education_levels(&self) -> &BTreeSet<String> {
        &self.education_levels
    }

    pub fn employment_statuses(&self) -> &BTreeSet<String> {
        &self.employment_statuses
    }

    pub fn majors(&self) -> &BTreeSet<String> {
        &self.majors
    }

    pub fn special_conditions(&self) -> &BTreeSet<String> {
        &self.special_conditions
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    pub fn free_text(&self) -> Option<&str> {
        self.free_text.as_deref()
    }
}

/// Assembles normalized criteria into an [`EligibilityQuery`]
#[derive(Debug, Clone)]
pub struct EligibilityQueryBuilder {
    directory: Arc<RegionDirectory>,
}

impl EligibilityQueryBuilder {
    pub fn new(directory: Arc<RegionDirectory>) -> Self {
        Self { directory }
    }

    /// Build the store query from already-normalized criteria
    pub fn build(&self, criteria: EligibilityCriteria) -> EligibilityQuery {
        let regions = expand_region_codes(&criteria.regions, &self.directory);

        tracing::trace!(
            "Expanded {} region codes into {}",
            criteria.regions.len(),
            regions.len()
        );

        EligibilityQuery {
            age: criteria.age,
            marital_status: criteria.marital_status,
            income: criteria.income,
            regions,
            education_levels: criteria.education_levels,
            employment_statuses: criteria.employment_statuses,
            majors: criteria.majors,
            special_conditions: criteria.special_conditions,
            keywords: criteria.keywords,
            free_text: criteria.free_text,
        }
    }

    /// Normalize a raw request and build the store query in one step
    pub fn from_request(&self, request: &SearchRequest) -> EligibilityQuery {
        self.build(EligibilityCriteria::from_request(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> EligibilityQueryBuilder {
        EligibilityQueryBuilder::new(Arc::new(RegionDirectory::from_codes([
            "41111", "41117", "11110",
        ])))
    }

    fn opt(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn test_criteria_from_request_drops_blanks() {
        let request = SearchRequest {
            age: Some(27),
            marital_status: Some("  ".to_string()),
            regions: vec![Some(" 41117 ".to_string()), None, Some(String::new())],
            majors: opt(&["engineering", " "]),
            free_text: Some("  rent  ".to_string()),
            ..Default::default()
        };

        let criteria = EligibilityCriteria::from_request(&request);

        assert_eq!(criteria.age, Some(27));
        assert_eq!(criteria.marital_status, None);
        assert_eq!(criteria.regions.len(), 1);
        assert!(criteria.regions.contains("41117"));
        assert_eq!(criteria.majors.len(), 1);
        assert_eq!(criteria.free_text.as_deref(), Some("rent"));
    }

    #[test]
    fn test_build_expands_regions() {
        let request = SearchRequest {
            regions: opt(&["41000"]),
            ..Default::default()
        };

        let query = builder().from_request(&request);

        let regions: Vec<&str> = query.regions().iter().map(String::as_str).collect();
        assert_eq!(regions, vec!["41000", "41111", "41117"]);
    }

    #[test]
    fn test_other_sets_are_not_expanded() {
        let request = SearchRequest {
            education_levels: opt(&["university"]),
            employment_statuses: opt(&["unemployed"]),
            special_conditions: opt(&["single_parent"]),
            keywords: opt(&["housing"]),
            ..Default::default()
        };

        let query = builder().from_request(&request);

        assert_eq!(query.education_levels().len(), 1);
        assert_eq!(query.employment_statuses().len(), 1);
        assert_eq!(query.special_conditions().len(), 1);
        assert_eq!(query.keywords().len(), 1);
        assert!(query.regions().is_empty());
    }

    #[test]
    fn test_empty_request_is_unfiltered() {
        let criteria = EligibilityCriteria::from_request(&SearchRequest::default());
        assert!(criteria.is_unfiltered());

        let query = builder().build(criteria);
        assert!(query.regions().is_empty());
        assert_eq!(query.age(), None);
        assert_eq!(query.free_text(), None);
    }
}
