use {
    crate::{
        index::{DocId, LeafReader},
        search::{explanation::Explanation, scorer::Scorer},
    },
    std::{fmt::Debug, io::Result as IoResult, sync::Arc},
};

/// The segment-independent, per-query state of a [Query][crate::search::Query].
///
/// A `Weight` is built once per query by [IndexSearcher::create_normalized_weight] and then asked
/// for one [Scorer] per segment.
///
/// [IndexSearcher::create_normalized_weight]: crate::search::IndexSearcher::create_normalized_weight
pub trait Weight: Debug {
    /// The value used to compute the query norm, usually the sum of the squared weights of the
    /// query's clauses.
    fn value_for_normalization(&self) -> f32 {
        1.0
    }

    /// Applies the query norm computed from [Weight::value_for_normalization].
    fn normalize(&mut self, _norm: f32) {}

    /// Returns a [Scorer] over `reader`, or `None` if the query matches no documents in it.
    ///
    /// # Errors
    /// Returns an I/O error if the segment cannot be read.
    fn scorer(&self, reader: &Arc<dyn LeafReader>) -> IoResult<Option<Box<dyn Scorer>>>;

    /// Explains the score `doc` of `reader` gets, or why it does not match.
    fn explain(&self, reader: &Arc<dyn LeafReader>, doc: DocId) -> IoResult<Explanation>;
}
