use {crate::search::doc_id_set_iterator::DocIdSetIterator, std::{fmt::Debug, io::Result as IoResult}};

/// Common scoring functionality for different types of queries.
///
/// A `Scorer` iterates over the documents matching a query in increasing order of doc id and
/// exposes the score of the document it is positioned on. Scorers are created per segment by a
/// [Weight][crate::search::Weight] and are single-pass.
pub trait Scorer: DocIdSetIterator + Debug {
    /// Returns the score of the current document.
    ///
    /// Only valid while positioned on a document, i.e. after [DocIdSetIterator::next_doc] or
    /// [DocIdSetIterator::advance] returned something other than
    /// [NO_MORE_DOCS][crate::search::NO_MORE_DOCS].
    fn score(&mut self) -> IoResult<f32>;
}
