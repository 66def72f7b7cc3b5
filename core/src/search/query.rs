use {
    crate::search::{index_searcher::IndexSearcher, weight::Weight},
    std::{
        any::Any,
        fmt::{Debug, Display},
        hash::{Hash, Hasher},
        io::Result as IoResult,
    },
};

/// A query that can be weighted against an [IndexSearcher] and scored per segment.
///
/// Queries are immutable descriptions. Their [Display] form is the query string used in
/// descriptions and explanations; [Query::query_eq] and [Query::query_hash] provide value
/// semantics for trait objects.
pub trait Query: Debug + Display {
    /// Builds the segment-independent weight of this query. Callers normally go through
    /// [IndexSearcher::create_normalized_weight] instead.
    fn create_weight(&self, searcher: &IndexSearcher) -> IoResult<Box<dyn Weight>>;

    /// Returns the boost of this query.
    fn boost(&self) -> f32 {
        1.0
    }

    /// Returns `self` as [Any] so implementations can downcast in [Query::query_eq].
    fn as_any(&self) -> &dyn Any;

    /// Value equality with another query.
    fn query_eq(&self, other: &dyn Query) -> bool;

    /// Feeds the fields that take part in [Query::query_eq] to `state`.
    fn query_hash(&self, state: &mut dyn Hasher);
}

impl PartialEq for dyn Query {
    fn eq(&self, other: &Self) -> bool {
        self.query_eq(other)
    }
}

impl Eq for dyn Query {}

impl Hash for dyn Query {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.query_hash(state)
    }
}

/// Computes the query norm for a weight's [Weight::value_for_normalization].
///
/// Infinite or NaN norms (from a zero or degenerate sum) are replaced by `1.0`.
pub fn query_norm(sum_of_squared_weights: f32) -> f32 {
    let norm = 1.0 / sum_of_squared_weights.sqrt();
    if norm.is_finite() {
        norm
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use {super::query_norm, pretty_assertions::assert_eq, test_log::test};

    #[test]
    fn test_query_norm() {
        assert_eq!(query_norm(4.0), 0.5);
        assert_eq!(query_norm(0.0), 1.0);
        assert_eq!(query_norm(f32::NAN), 1.0);
    }
}
