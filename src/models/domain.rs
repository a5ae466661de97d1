use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Three-component preference weighting: benefit amount, deadline proximity
/// and view popularity, in that order.
///
/// Every component is always present. Missing or `null` components coming
/// from storage or JSON are read as `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceVector {
    #[serde(rename = "benefitAmount", default, deserialize_with = "null_as_zero")]
    pub benefit_amount: f64,
    #[serde(rename = "deadlineProximity", default, deserialize_with = "null_as_zero")]
    pub deadline_proximity: f64,
    #[serde(rename = "viewPopularity", default, deserialize_with = "null_as_zero")]
    pub view_popularity: f64,
}

impl PreferenceVector {
    pub fn new(benefit_amount: f64, deadline_proximity: f64, view_popularity: f64) -> Self {
        Self {
            benefit_amount,
            deadline_proximity,
            view_popularity,
        }
    }

    /// Build a vector from nullable columns, substituting `0.0` for gaps
    pub fn from_parts(
        benefit_amount: Option<f64>,
        deadline_proximity: Option<f64>,
        view_popularity: Option<f64>,
    ) -> Self {
        Self::new(
            benefit_amount.unwrap_or(0.0),
            deadline_proximity.unwrap_or(0.0),
            view_popularity.unwrap_or(0.0),
        )
    }

    /// Components as `(benefit, deadline, view)`
    #[inline]
    pub fn to_components(&self) -> (f64, f64, f64) {
        (self.benefit_amount, self.deadline_proximity, self.view_popularity)
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// A policy returned by the store as satisfying the eligibility query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyCandidate {
    #[serde(rename = "policyId")]
    pub policy_id: i64,
    pub title: String,
    #[serde(rename = "benefitDescription", default)]
    pub benefit_description: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "benefitAmount", default)]
    pub benefit_amount: Option<i64>,
    /// Only attached for personalized search; never serialized to clients
    #[serde(skip_serializing, default)]
    pub vector: Option<PreferenceVector>,
}

/// A candidate plus its similarity score when the search was personalized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub candidate: PolicyCandidate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl RankedResult {
    pub fn unranked(candidate: PolicyCandidate) -> Self {
        Self {
            candidate,
            similarity: None,
        }
    }
}

/// Normalized eligibility attributes of a single search.
///
/// Set members are trimmed and never blank. Scalars are `None` when the
/// caller did not constrain them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityCriteria {
    pub age: Option<u32>,
    pub marital_status: Option<String>,
    pub income: Option<u64>,
    pub regions: BTreeSet<String>,
    pub education_levels: BTreeSet<String>,
    pub employment_statuses: BTreeSet<String>,
    pub majors: BTreeSet<String>,
    pub special_conditions: BTreeSet<String>,
    pub keywords: BTreeSet<String>,
    pub free_text: Option<String>,
}

impl EligibilityCriteria {
    /// Whether no dimension constrains the search
    pub fn is_unfiltered(&self) -> bool {
        self.age.is_none()
            && self.marital_status.is_none()
            && self.income.is_none()
            && self.regions.is_empty()
            && self.education_levels.is_empty()
            && self.employment_statuses.is_empty()
            && self.majors.is_empty()
            && self.special_conditions.is_empty()
            && self.keywords.is_empty()
            && self.free_text.is_none()
    }

    /// Search terms that count toward keyword popularity
    pub fn search_terms(&self) -> Vec<&str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .chain(self.free_text.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_missing_components_default_to_zero() {
        let vector: PreferenceVector =
            serde_json::from_str(r#"{"benefitAmount": 0.5, "viewPopularity": null}"#).unwrap();

        assert_eq!(vector.to_components(), (0.5, 0.0, 0.0));
    }

    #[test]
    fn test_vector_from_parts() {
        let vector = PreferenceVector::from_parts(Some(0.4), None, Some(0.2));
        assert_eq!(vector.to_components(), (0.4, 0.0, 0.2));
    }

    #[test]
    fn test_ranked_result_omits_missing_similarity() {
        let candidate = PolicyCandidate {
            policy_id: 7,
            title: "Youth rent support".to_string(),
            benefit_description: None,
            end_date: None,
            benefit_amount: Some(200_000),
            vector: Some(PreferenceVector::new(0.5, 0.3, 0.2)),
        };

        let json = serde_json::to_value(RankedResult::unranked(candidate)).unwrap();

        assert_eq!(json["policyId"], 7);
        assert!(json.get("similarity").is_none());
        assert!(json.get("vector").is_none());
    }

    #[test]
    fn test_search_terms_order() {
        let mut criteria = EligibilityCriteria::default();
        criteria.keywords.insert("housing".to_string());
        criteria.keywords.insert("employment".to_string());
        criteria.free_text = Some("rent support".to_string());

        assert_eq!(criteria.search_terms(), vec!["employment", "housing", "rent support"]);
    }
}
