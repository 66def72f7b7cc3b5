use {crate::index::DocId, std::io::Result as IoResult};

/// Sentinel returned by a [DocIdSetIterator] once it is exhausted.
///
/// Set to `i32::MAX` so that it compares greater than every valid document id.
pub const NO_MORE_DOCS: DocId = i32::MAX;

/// Iterates over a set of non-decreasing doc ids.
///
/// Iterators start unpositioned ([DocIdSetIterator::doc_id] returns `-1`), move forward only, and
/// report [NO_MORE_DOCS] once exhausted.
pub trait DocIdSetIterator {
    /// Returns the following:
    ///
    /// * `-1` if [DocIdSetIterator::next_doc] or [DocIdSetIterator::advance] were not called yet.
    /// * [NO_MORE_DOCS] if the iterator has exhausted.
    /// * Otherwise the doc ID it is currently on.
    fn doc_id(&self) -> DocId;

    /// Advances to the next document in the set and returns the doc it is currently on, or
    /// [NO_MORE_DOCS] if there are no more docs in the set.
    ///
    /// # Note
    /// After the iterator has exhausted you should not call this method, as it may result in
    /// unpredicted behavior.
    fn next_doc(&mut self) -> IoResult<DocId>;

    /// Advances to the first document whose number is greater than or equal to `target`, and
    /// returns it. Exhausts the iterator and returns [NO_MORE_DOCS] if `target` is greater than the
    /// highest document number in the set.
    ///
    /// The behavior of this method is **undefined** when called with `target <= current`, or after
    /// the iterator has exhausted.
    ///
    /// When `target > current` it behaves as if written:
    ///
    /// ```ignore
    /// let mut doc = self.next_doc()?;
    /// while doc < target {
    ///     doc = self.next_doc()?;
    /// }
    /// Ok(doc)
    /// ```
    ///
    /// Some implementations are considerably more efficient than that.
    fn advance(&mut self, target: DocId) -> IoResult<DocId>;

    /// Slow (linear) implementation of [DocIdSetIterator::advance] relying on
    /// [DocIdSetIterator::next_doc] to advance beyond the target position.
    fn slow_advance(&mut self, target: DocId) -> IoResult<DocId> {
        debug_assert!(self.doc_id() < target);

        loop {
            let doc = self.next_doc()?;
            if doc >= target {
                return Ok(doc);
            }
        }
    }

    /// Returns the estimated cost of this [DocIdSetIterator].
    ///
    /// This is generally an upper bound of the number of documents this iterator might match, but
    /// may be a rough heuristic, hardcoded value, or otherwise completely inaccurate.
    fn cost(&self) -> u64;
}
