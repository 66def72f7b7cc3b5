use {
    crate::{
        error::{FunctionError, FunctionResult},
        index::{DocId, LeafReaderContext},
        search::field_value::FieldValue,
    },
    std::{cmp::Ordering, fmt::Debug},
};

/// A FieldComparator compares hits so as to determine their sort order when collecting the top
/// results with a [TopFieldCollector][crate::search::TopFieldCollector].
///
/// Whenever a hit is competitive, it's enrolled into a virtual slot, which is an index ranging
/// from 0 to _num_hits_ - 1. The collector drives a comparator with the following calls:
///
/// * [FieldComparator::set_next_reader]: once per segment, before any other call for that
///   segment's documents.
/// * [FieldComparator::compare]: Compare a hit at 'slot a' with hit 'slot b'.
/// * [FieldComparator::set_bottom]: Notify the comparator of the current weakest ("bottom") slot.
///   Always called before [FieldComparator::compare_bottom].
/// * [FieldComparator::compare_bottom]: Compare a new hit (docID) against the "weakest" (bottom)
///   entry in the queue.
/// * [FieldComparator::copy]: Installs a new hit into the priority queue.
/// * [FieldComparator::value]: Return the sort value stored in the specified slot. This is only
///   called at the end of the search, in order to populate the returned hits.
///
/// The document IDs passed to these methods must only move forwards within a segment.
/// Comparators always sort ascending; reversing is up to the collector.
pub trait FieldComparator: Debug {
    /// Compare hit at `slot1` with hit at `slot2`.
    fn compare(&self, slot1: usize, slot2: usize) -> FunctionResult<Ordering>;

    /// Set the bottom slot, ie the "weakest" (sorted last) entry in the queue.
    fn set_bottom(&mut self, slot: usize) -> FunctionResult<()>;

    /// Compare the bottom of the queue with this doc. This should return the same result as
    /// [FieldComparator::compare] as if bottom were slot1 and the new document were slot 2.
    ///
    /// For a search that hits many results, this method will be the hotspot (invoked by far the
    /// most frequently).
    fn compare_bottom(&mut self, doc: DocId) -> FunctionResult<Ordering>;

    /// This method is called when a new hit is competitive. You should copy any state associated
    /// with this document that will be required for future comparisons, into the specified slot.
    fn copy(&mut self, slot: usize, doc: DocId) -> FunctionResult<()>;

    /// Binds the comparator to the next segment. `doc` arguments of subsequent calls are relative
    /// to this segment.
    fn set_next_reader(&mut self, leaf: &LeafReaderContext) -> FunctionResult<()>;

    /// Whether the comparator needs the score of each hit through [FieldComparator::set_score].
    fn needs_scores(&self) -> bool {
        false
    }

    /// Receives the score of the hit that is about to be passed to
    /// [FieldComparator::compare_bottom] or [FieldComparator::copy].
    fn set_score(&mut self, _score: f32) {}

    /// Return the actual value in the slot.
    fn value(&self, slot: usize) -> FieldValue;
}

/// Three-way comparison of two doubles with a total order.
///
/// All NaNs are equal to each other and sort after every other value, including infinity.
/// `-0.0` and `0.0` are equal.
#[inline]
pub fn compare_doubles(first: f64, second: f64) -> Ordering {
    match (first.is_nan(), second.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => first.partial_cmp(&second).unwrap_or(Ordering::Equal),
    }
}

/// Sorts by descending relevance score.
#[derive(Debug)]
pub struct RelevanceComparator {
    scores: Vec<f32>,
    bottom: f32,
    score: f32,
}

impl RelevanceComparator {
    /// Creates a comparator with `num_hits` slots.
    pub fn new(num_hits: usize) -> Self {
        Self {
            scores: vec![0.0; num_hits],
            bottom: 0.0,
            score: 0.0,
        }
    }
}

impl FieldComparator for RelevanceComparator {
    fn compare(&self, slot1: usize, slot2: usize) -> FunctionResult<Ordering> {
        Ok(compare_doubles(self.scores[slot2] as f64, self.scores[slot1] as f64))
    }

    fn set_bottom(&mut self, slot: usize) -> FunctionResult<()> {
        self.bottom = self.scores[slot];
        Ok(())
    }

    fn compare_bottom(&mut self, _doc: DocId) -> FunctionResult<Ordering> {
        Ok(compare_doubles(self.score as f64, self.bottom as f64))
    }

    fn copy(&mut self, slot: usize, _doc: DocId) -> FunctionResult<()> {
        self.scores[slot] = self.score;
        Ok(())
    }

    fn set_next_reader(&mut self, _leaf: &LeafReaderContext) -> FunctionResult<()> {
        Ok(())
    }

    fn needs_scores(&self) -> bool {
        true
    }

    fn set_score(&mut self, score: f32) {
        self.score = score;
    }

    fn value(&self, slot: usize) -> FieldValue {
        FieldValue::Float(self.scores[slot])
    }
}

/// Sorts by ascending global document id (index order).
#[derive(Debug)]
pub struct DocComparator {
    docs: Vec<DocId>,
    bottom: DocId,
    doc_base: Option<DocId>,
}

impl DocComparator {
    /// Creates a comparator with `num_hits` slots.
    pub fn new(num_hits: usize) -> Self {
        Self {
            docs: vec![0; num_hits],
            bottom: 0,
            doc_base: None,
        }
    }

    fn doc_base(&self) -> FunctionResult<DocId> {
        self.doc_base.ok_or_else(|| {
            FunctionError::IllegalState("DocComparator used before set_next_reader".to_string())
        })
    }
}

impl FieldComparator for DocComparator {
    fn compare(&self, slot1: usize, slot2: usize) -> FunctionResult<Ordering> {
        Ok(self.docs[slot1].cmp(&self.docs[slot2]))
    }

    fn set_bottom(&mut self, slot: usize) -> FunctionResult<()> {
        self.bottom = self.docs[slot];
        Ok(())
    }

    fn compare_bottom(&mut self, doc: DocId) -> FunctionResult<Ordering> {
        Ok(self.bottom.cmp(&(self.doc_base()? + doc)))
    }

    fn copy(&mut self, slot: usize, doc: DocId) -> FunctionResult<()> {
        self.docs[slot] = self.doc_base()? + doc;
        Ok(())
    }

    fn set_next_reader(&mut self, leaf: &LeafReaderContext) -> FunctionResult<()> {
        self.doc_base = Some(leaf.doc_base);
        Ok(())
    }

    fn value(&self, slot: usize) -> FieldValue {
        FieldValue::Int(self.docs[slot])
    }
}
