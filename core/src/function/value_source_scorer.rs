use {
    crate::{
        error::FunctionResult,
        function::doc_values::DocValues,
        index::{DocId, LeafReader},
        search::{DocIdSetIterator, Explanation, Scorer, NO_MORE_DOCS},
    },
    std::{fmt::Debug, io::Result as IoResult, sync::Arc},
};

/// Decides which documents a [ValueSourceScorer] matches, given their values.
pub trait ValueFilter: Debug {
    /// Whether `doc` matches, judged by its entry in `values`.
    fn matches_value(&self, values: &mut dyn DocValues, doc: DocId) -> FunctionResult<bool>;
}

/// Matches every document.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl ValueFilter for AcceptAll {
    fn matches_value(&self, _values: &mut dyn DocValues, _doc: DocId) -> FunctionResult<bool> {
        Ok(true)
    }
}

/// Matches documents whose float value lies in a range. An unset bound is open.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeFilter {
    /// The lower bound, if any.
    pub lower: Option<f32>,

    /// The upper bound, if any.
    pub upper: Option<f32>,

    /// Whether a value equal to `lower` matches.
    pub include_lower: bool,

    /// Whether a value equal to `upper` matches.
    pub include_upper: bool,
}

impl RangeFilter {
    /// Whether `value` lies in the range. NaN is never in range.
    pub fn contains(&self, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }

        let above_lower = match self.lower {
            None => true,
            Some(lower) if self.include_lower => value >= lower,
            Some(lower) => value > lower,
        };

        let below_upper = match self.upper {
            None => true,
            Some(upper) if self.include_upper => value <= upper,
            Some(upper) => value < upper,
        };

        above_lower && below_upper
    }
}

impl ValueFilter for RangeFilter {
    fn matches_value(&self, values: &mut dyn DocValues, doc: DocId) -> FunctionResult<bool> {
        Ok(self.contains(values.float_val(doc)?))
    }
}

/// A [Scorer] which iterates over the documents of a segment whose value passes a [ValueFilter].
///
/// The scorer walks the segment one document at a time, so its cost is the segment size. The
/// score of a match is its float value.
///
/// Deleted documents are skipped while the reader has deletions; see
/// [ValueSourceScorer::set_check_deletes].
#[derive(Debug)]
pub struct ValueSourceScorer<F: ValueFilter = AcceptAll> {
    reader: Arc<dyn LeafReader>,
    values: Box<dyn DocValues>,
    filter: F,
    max_doc: DocId,
    doc: DocId,
    check_deletes: bool,
}

impl ValueSourceScorer<AcceptAll> {
    /// Creates a scorer matching every live document of `reader`.
    pub fn new(reader: Arc<dyn LeafReader>, values: Box<dyn DocValues>) -> Self {
        Self::with_filter(reader, values, AcceptAll)
    }
}

impl ValueSourceScorer<RangeFilter> {
    /// Creates a scorer matching the live documents of `reader` whose value is in `range`.
    pub fn range(reader: Arc<dyn LeafReader>, values: Box<dyn DocValues>, range: RangeFilter) -> Self {
        Self::with_filter(reader, values, range)
    }
}

impl<F: ValueFilter> ValueSourceScorer<F> {
    /// Creates a scorer matching the live documents of `reader` accepted by `filter`.
    pub fn with_filter(reader: Arc<dyn LeafReader>, values: Box<dyn DocValues>, filter: F) -> Self {
        let max_doc = reader.max_doc();
        let check_deletes = reader.has_deletions();
        Self {
            reader,
            values,
            filter,
            max_doc,
            doc: -1,
            check_deletes,
        }
    }

    /// The segment reader.
    #[inline]
    pub fn reader(&self) -> &Arc<dyn LeafReader> {
        &self.reader
    }

    /// Turns the deleted-document check off (or back on). The check is never enabled for a reader
    /// without deletions.
    pub fn set_check_deletes(&mut self, check_deletes: bool) {
        self.check_deletes = check_deletes && self.reader.has_deletions();
    }

    /// Whether `doc` is live (when deletes are checked) and accepted by the filter.
    pub fn matches(&mut self, doc: DocId) -> FunctionResult<bool> {
        if self.check_deletes && self.reader.is_deleted(doc) {
            return Ok(false);
        }
        self.matches_value(doc)
    }

    /// Whether the filter accepts the value of `doc`, ignoring deletions.
    pub fn matches_value(&mut self, doc: DocId) -> FunctionResult<bool> {
        self.filter.matches_value(self.values.as_mut(), doc)
    }

    /// Explains the value of `doc`.
    pub fn explain(&mut self, doc: DocId) -> FunctionResult<Explanation> {
        self.values.explain(doc)
    }

    /// The value of the current document.
    pub(crate) fn value(&mut self) -> FunctionResult<f32> {
        self.values.float_val(self.doc)
    }
}

impl<F: ValueFilter> DocIdSetIterator for ValueSourceScorer<F> {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> IoResult<DocId> {
        loop {
            if self.doc == NO_MORE_DOCS {
                return Ok(NO_MORE_DOCS);
            }

            self.doc += 1;
            if self.doc >= self.max_doc {
                self.doc = NO_MORE_DOCS;
                return Ok(NO_MORE_DOCS);
            }

            if self.matches(self.doc)? {
                return Ok(self.doc);
            }
        }
    }

    fn advance(&mut self, target: DocId) -> IoResult<DocId> {
        // also works fine when target == NO_MORE_DOCS
        self.doc = target - 1;
        self.next_doc()
    }

    fn cost(&self) -> u64 {
        self.max_doc as u64
    }
}

impl<F: ValueFilter> Scorer for ValueSourceScorer<F> {
    fn score(&mut self) -> IoResult<f32> {
        Ok(self.value()?)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{RangeFilter, ValueSourceScorer},
        crate::{
            function::{Context, OrdFieldSource, ValueSource},
            index::{LeafReader, MemoryLeafReader},
            search::{DocIdSetIterator, Scorer, NO_MORE_DOCS},
        },
        pretty_assertions::assert_eq,
        std::sync::Arc,
        test_log::test,
    };

    // ords: a=1 b=2 c=3 d=4; doc 3 has no value
    fn reader(delete: Option<i32>) -> Arc<dyn LeafReader> {
        let mut builder = MemoryLeafReader::builder()
            .add_document([("f", "c")])
            .add_document([("f", "a")])
            .add_document([("f", "d")])
            .add_document([("g", "x")])
            .add_document([("f", "b")]);
        if let Some(doc) = delete {
            builder = builder.delete_document(doc);
        }
        Arc::new(builder.build())
    }

    fn collect(scorer: &mut dyn Scorer) -> Vec<(i32, f32)> {
        let mut hits = vec![];
        loop {
            let doc = scorer.next_doc().unwrap();
            if doc == NO_MORE_DOCS {
                return hits;
            }
            hits.push((doc, scorer.score().unwrap()));
        }
    }

    #[test]
    fn test_accept_all() {
        let reader = reader(None);
        let values = OrdFieldSource::new("f").get_values(&Context::new(), &reader).unwrap();
        let mut scorer = ValueSourceScorer::new(reader, values);
        assert_eq!(scorer.cost(), 5);
        assert_eq!(collect(&mut scorer), vec![(0, 3.0), (1, 1.0), (2, 4.0), (3, 0.0), (4, 2.0)]);
        assert_eq!(scorer.doc_id(), NO_MORE_DOCS);
        assert_eq!(scorer.next_doc().unwrap(), NO_MORE_DOCS);
    }

    #[test]
    fn test_range() {
        let reader = reader(None);
        let values = OrdFieldSource::new("f").get_values(&Context::new(), &reader).unwrap();
        let range = RangeFilter {
            lower: Some(2.0),
            upper: Some(4.0),
            include_lower: true,
            include_upper: false,
        };
        let mut scorer = ValueSourceScorer::range(reader, values, range);
        assert_eq!(collect(&mut scorer), vec![(0, 3.0), (4, 2.0)]);
    }

    #[test]
    fn test_range_contains() {
        let open = RangeFilter {
            lower: None,
            upper: Some(1.0),
            include_lower: false,
            include_upper: true,
        };
        assert!(open.contains(f32::NEG_INFINITY));
        assert!(open.contains(1.0));
        assert!(!open.contains(1.5));
        assert!(!open.contains(f32::NAN));
    }

    #[test]
    fn test_deletions() {
        let reader = reader(Some(1));
        let values = OrdFieldSource::new("f").get_values(&Context::new(), &reader).unwrap();
        let mut scorer = ValueSourceScorer::new(reader.clone(), values);
        assert!(!scorer.matches(1).unwrap());
        assert!(scorer.matches_value(1).unwrap());
        assert_eq!(collect(&mut scorer).iter().map(|hit| hit.0).collect::<Vec<_>>(), vec![0, 2, 3, 4]);

        let values = OrdFieldSource::new("f").get_values(&Context::new(), &reader).unwrap();
        let mut scorer = ValueSourceScorer::new(reader, values);
        scorer.set_check_deletes(false);
        assert!(scorer.matches(1).unwrap());
        assert_eq!(collect(&mut scorer).len(), 5);
    }

    #[test]
    fn test_check_deletes_stays_off_without_deletions() {
        let reader = reader(None);
        let values = OrdFieldSource::new("f").get_values(&Context::new(), &reader).unwrap();
        let mut scorer = ValueSourceScorer::new(reader, values);
        scorer.set_check_deletes(true);
        assert!(scorer.matches(2).unwrap());
    }

    #[test]
    fn test_advance() {
        let reader = reader(None);
        let values = OrdFieldSource::new("f").get_values(&Context::new(), &reader).unwrap();
        let range = RangeFilter {
            lower: Some(3.0),
            upper: None,
            include_lower: true,
            include_upper: false,
        };
        let mut scorer = ValueSourceScorer::range(reader, values, range);
        assert_eq!(scorer.advance(1).unwrap(), 2);
        assert_eq!(scorer.score().unwrap(), 4.0);
        assert_eq!(scorer.advance(NO_MORE_DOCS).unwrap(), NO_MORE_DOCS);
    }

    #[test]
    fn test_explain() {
        let reader = reader(None);
        let values = OrdFieldSource::new("f").get_values(&Context::new(), &reader).unwrap();
        let mut scorer = ValueSourceScorer::new(reader, values);
        assert_eq!(scorer.explain(2).unwrap().summary(), "4 = ord(f)=4");
    }
}
