use crate::models::{PolicyCandidate, PreferenceVector, RankedResult};
use std::cmp::Ordering;

#[inline]
fn dot_product(a: &PreferenceVector, b: &PreferenceVector) -> f64 {
    let (a1, a2, a3) = a.to_components();
    let (b1, b2, b3) = b.to_components();
    a1 * b1 + a2 * b2 + a3 * b3
}

/// Euclidean norm of a preference vector
#[inline]
pub fn magnitude(vector: &PreferenceVector) -> f64 {
    dot_product(vector, vector).sqrt()
}

/// Cosine similarity between two preference vectors, clamped to [0, 1].
///
/// Returns 0.0 when either side is absent, has zero magnitude, or produces a
/// non-finite result.
pub fn cosine_similarity(a: Option<&PreferenceVector>, b: Option<&PreferenceVector>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };

    let norm_a = magnitude(a);
    let norm_b = magnitude(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot_product(a, b) / (norm_a * norm_b);
    if !similarity.is_finite() {
        return 0.0;
    }

    similarity.clamp(0.0, 1.0)
}

/// Score every candidate against the user vector and order by similarity.
///
/// Highest similarity first. Equal scores keep the order the store returned
/// them in.
pub fn rank(user_vector: &PreferenceVector, candidates: Vec<PolicyCandidate>) -> Vec<RankedResult> {
    let mut scored: Vec<(usize, RankedResult)> = candidates
        .into_iter()
        .enumerate()
        .map(|(position, candidate)| {
            let similarity = cosine_similarity(Some(user_vector), candidate.vector.as_ref());
            (
                position,
                RankedResult {
                    candidate,
                    similarity: Some(similarity),
                },
            )
        })
        .collect();

    scored.sort_by(|(pos_a, a), (pos_b, b)| {
        let score_a = a.similarity.unwrap_or(0.0);
        let score_b = b.similarity.unwrap_or(0.0);
        score_b
            .partial_cmp(&score_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| pos_a.cmp(pos_b))
    });

    scored.into_iter().map(|(_, result)| result).collect()
}
