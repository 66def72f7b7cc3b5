use {
    crate::{
        error::{FunctionError, FunctionResult},
        function::{
            context::Context,
            doc_values::{format_float, DocValues},
            value_source::ValueSource,
        },
        id::SourceId,
        index::{DocId, LeafReader},
        search::{DocIdSetIterator, IndexSearcher, Query, Scorer, Weight},
    },
    log::{debug, error},
    std::{any::Any, hash::Hasher, io::Result as IoResult, sync::Arc},
};

/// `QueryValueSource` returns the relevance score of the query.
///
/// Documents the query does not match get the default value.
#[derive(Debug)]
pub struct QueryValueSource {
    id: SourceId,
    query: Arc<dyn Query>,
    def_val: f32,
}

impl QueryValueSource {
    /// Creates a source scoring documents with `query`, and `def_val` for non-matching documents.
    pub fn new(query: Arc<dyn Query>, def_val: f32) -> Self {
        Self {
            id: SourceId::random_id(),
            query,
            def_val,
        }
    }

    /// The sub-query.
    #[inline]
    pub fn get_query(&self) -> &Arc<dyn Query> {
        &self.query
    }

    /// The value used for documents the sub-query does not match.
    #[inline]
    pub fn get_default_value(&self) -> f32 {
        self.def_val
    }
}

impl ValueSource for QueryValueSource {
    fn id(&self) -> SourceId {
        self.id
    }

    fn description(&self) -> String {
        format!("query({},def={})", self.query, format_float(self.def_val))
    }

    fn get_values(&self, context: &Context, reader: &Arc<dyn LeafReader>) -> FunctionResult<Box<dyn DocValues>> {
        let weight = match context.get_weight(self) {
            Some(weight) => weight.clone(),
            None => {
                debug!("No weight for {} in context; creating one for this segment", self.description());
                IndexSearcher::for_leaf(reader.clone()).create_normalized_weight(&*self.query)?
            }
        };

        Ok(Box::new(QueryDocValues::new(
            reader.clone(),
            self.query.to_string(),
            self.description(),
            weight,
            self.def_val,
        )))
    }

    fn create_weight(&self, context: &mut Context, searcher: &IndexSearcher) -> FunctionResult<()> {
        let weight = searcher.create_normalized_weight(&*self.query)?;
        context.put_weight(self, weight);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn source_eq(&self, other: &dyn ValueSource) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .map_or(false, |other| self.query.query_eq(&*other.query) && self.def_val.to_bits() == other.def_val.to_bits())
    }

    fn source_hash(&self, state: &mut dyn Hasher) {
        state.write(b"query");
        self.query.query_hash(state);
        state.write_u32(self.def_val.to_bits());
    }
}

/// The per-segment values of a [QueryValueSource].
///
/// The sub-query's scorer is created lazily on the first request and then advanced forward only.
/// Requesting a document lower than the previous request starts over with a fresh scorer. Once the
/// weight reports that the query matches nothing in the segment, every later request returns the
/// default value without touching the weight again.
#[derive(Debug)]
pub struct QueryDocValues {
    reader: Arc<dyn LeafReader>,
    query: String,
    description: String,
    weight: Arc<dyn Weight>,
    def_val: f32,

    scorer: Option<Box<dyn Scorer>>,

    // the document the scorer is on
    scorer_doc: DocId,
    no_matches: bool,

    // Starts high so that the first request creates the scorer.
    last_doc_requested: DocId,
}

impl QueryDocValues {
    fn new(
        reader: Arc<dyn LeafReader>,
        query: String,
        description: String,
        weight: Arc<dyn Weight>,
        def_val: f32,
    ) -> Self {
        Self {
            reader,
            query,
            description,
            weight,
            def_val,
            scorer: None,
            scorer_doc: -1,
            no_matches: false,
            last_doc_requested: DocId::MAX,
        }
    }

    fn score_at(&mut self, doc: DocId) -> IoResult<f32> {
        if doc < self.last_doc_requested {
            if self.no_matches {
                return Ok(self.def_val);
            }

            match self.weight.scorer(&self.reader)? {
                None => {
                    debug!("Query {} matches no documents in this segment", self.query);
                    self.scorer = None;
                    self.no_matches = true;
                    return Ok(self.def_val);
                }
                Some(scorer) => {
                    self.scorer = Some(scorer);
                    self.scorer_doc = -1;
                }
            }
        }

        self.last_doc_requested = doc;

        let Some(scorer) = self.scorer.as_mut() else {
            return Ok(self.def_val);
        };

        if self.scorer_doc < doc {
            self.scorer_doc = scorer.advance(doc)?;
        }

        if self.scorer_doc > doc {
            // query doesn't match this document... either because we hit the
            // end, or because the next doc is after this doc.
            return Ok(self.def_val);
        }

        scorer.score()
    }
}

impl DocValues for QueryDocValues {
    fn float_val(&mut self, doc: DocId) -> FunctionResult<f32> {
        self.score_at(doc).map_err(|e| {
            error!("Failed to score doc {doc} with query {}: {e}", self.query);
            FunctionError::evaluation(self.query.clone(), doc, e)
        })
    }

    fn to_string(&mut self, doc: DocId) -> FunctionResult<String> {
        let value = self.float_val(doc)?;
        Ok(format!("{}={}", self.description, format_float(value)))
    }
}
