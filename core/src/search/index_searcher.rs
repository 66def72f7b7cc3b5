use {
    crate::{
        error::{FunctionError, FunctionResult},
        index::{IndexReader, LeafReader},
        search::{
            doc_id_set_iterator::{DocIdSetIterator, NO_MORE_DOCS},
            query::{query_norm, Query},
            scorer::Scorer,
            sort::Sort,
            top_field_collector::{TopFieldCollector, TopFieldDocs},
            weight::Weight,
        },
    },
    log::debug,
    std::{io::Result as IoResult, sync::Arc},
};

/// Implements search over a single [IndexReader].
///
/// A searcher is cheap to create; the per-query state it hands out ([Weight]s and sort field
/// contexts) is never stored in the searcher itself.
#[derive(Clone, Debug)]
pub struct IndexSearcher {
    reader: IndexReader,
}

impl IndexSearcher {
    /// Creates a searcher over `reader`.
    pub fn new(reader: IndexReader) -> Self {
        Self {
            reader,
        }
    }

    /// Creates a searcher over a single segment.
    pub fn for_leaf(reader: Arc<dyn LeafReader>) -> Self {
        Self::new(IndexReader::from(reader))
    }

    /// Returns the reader this searcher searches.
    #[inline]
    pub fn get_index_reader(&self) -> &IndexReader {
        &self.reader
    }

    /// Creates a normalized weight for `query`: the weight is built, its
    /// [Weight::value_for_normalization] turned into a query norm, and the norm applied.
    pub fn create_normalized_weight(&self, query: &dyn Query) -> IoResult<Arc<dyn Weight>> {
        let mut weight = query.create_weight(self)?;
        let norm = query_norm(weight.value_for_normalization());
        weight.normalize(norm);
        Ok(Arc::from(weight))
    }

    /// Finds the top `num_hits` hits for `query`, sorted by `sort`.
    ///
    /// The sort is rewritten first, so sort fields built from value sources are weighted for this
    /// search only.
    ///
    /// # Errors
    /// * [FunctionError::InvalidArgument] if `num_hits` is zero.
    /// * Any error raised while scoring or comparing documents.
    pub fn search(&self, query: &dyn Query, num_hits: usize, sort: &Sort) -> FunctionResult<TopFieldDocs> {
        if num_hits == 0 {
            return Err(FunctionError::InvalidArgument("num_hits must be > 0".to_string()));
        }

        let sort = sort.rewrite(self)?;
        let weight = self.create_normalized_weight(query)?;
        let mut collector = TopFieldCollector::create(&sort, num_hits)?;
        let needs_scores = collector.needs_scores();

        for leaf in self.reader.leaves() {
            collector.set_next_reader(leaf)?;

            let Some(mut scorer) = weight.scorer(leaf.reader())? else {
                continue;
            };

            loop {
                let doc = scorer.next_doc()?;
                if doc == NO_MORE_DOCS {
                    break;
                }

                let score = if needs_scores {
                    scorer.score()?
                } else {
                    f32::NAN
                };
                collector.collect(doc, score)?;
            }
        }

        let top_docs = collector.top_docs();
        debug!("Search for {query} sorted by {sort} found {} hits", top_docs.total_hits);
        Ok(top_docs)
    }
}
