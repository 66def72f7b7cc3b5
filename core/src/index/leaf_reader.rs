use {
    crate::index::{sorted_doc_values::SortedDocValues, DocId},
    std::{fmt::Debug, io::Result as IoResult, sync::Arc},
};

/// A reader over a single, immutable segment.
///
/// Everything the function layer needs from storage goes through this trait: the document count,
/// deletions, and the per-field term ordinal tables. Document ids passed to a `LeafReader` are
/// relative to the segment.
pub trait LeafReader: Debug {
    /// Returns one greater than the largest possible document number in this segment.
    fn max_doc(&self) -> DocId;

    /// Returns the number of live (non-deleted) documents.
    fn num_docs(&self) -> DocId;

    /// Returns `true` if any documents in this segment have been deleted.
    fn has_deletions(&self) -> bool {
        self.num_docs() < self.max_doc()
    }

    /// Returns `true` if `doc` has been deleted.
    fn is_deleted(&self, doc: DocId) -> bool;

    /// Returns the term ordinal table for `field`, or `None` if no document in this segment has a
    /// value for it.
    ///
    /// # Errors
    /// Returns an I/O error if the table cannot be loaded.
    fn get_sorted_doc_values(&self, field: &str) -> IoResult<Option<Arc<dyn SortedDocValues>>>;
}
