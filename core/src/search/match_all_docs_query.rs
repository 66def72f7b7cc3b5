use {
    crate::{
        index::{DocId, LeafReader},
        search::{
            doc_id_set_iterator::{DocIdSetIterator, NO_MORE_DOCS},
            explanation::Explanation,
            index_searcher::IndexSearcher,
            query::Query,
            scorer::Scorer,
            weight::Weight,
        },
    },
    std::{
        any::Any,
        fmt::{Display, Formatter, Result as FmtResult},
        hash::Hasher,
        io::Result as IoResult,
        sync::Arc,
    },
};

/// A query that matches all live documents, each with a constant score.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchAllDocsQuery {
    boost: f32,
}

impl MatchAllDocsQuery {
    /// Creates the query with a boost of `1.0`.
    pub fn new() -> Self {
        Self {
            boost: 1.0,
        }
    }

    /// Sets the boost, which becomes the (unnormalized) score of every document.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

impl Default for MatchAllDocsQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MatchAllDocsQuery {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "*:*")?;
        if self.boost != 1.0 {
            write!(f, "^{}", self.boost)?;
        }
        Ok(())
    }
}

impl Query for MatchAllDocsQuery {
    fn create_weight(&self, _searcher: &IndexSearcher) -> IoResult<Box<dyn Weight>> {
        Ok(Box::new(MatchAllWeight {
            boost: self.boost,
            query_norm: 1.0,
        }))
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn query_eq(&self, other: &dyn Query) -> bool {
        other.as_any().downcast_ref::<Self>().map_or(false, |other| self.boost.to_bits() == other.boost.to_bits())
    }

    fn query_hash(&self, state: &mut dyn Hasher) {
        state.write(b"*:*");
        state.write_u32(self.boost.to_bits());
    }
}

#[derive(Debug)]
struct MatchAllWeight {
    boost: f32,
    query_norm: f32,
}

impl Weight for MatchAllWeight {
    fn value_for_normalization(&self) -> f32 {
        self.boost * self.boost
    }

    fn normalize(&mut self, norm: f32) {
        self.query_norm = norm;
    }

    fn scorer(&self, reader: &Arc<dyn LeafReader>) -> IoResult<Option<Box<dyn Scorer>>> {
        Ok(Some(Box::new(MatchAllScorer {
            reader: reader.clone(),
            max_doc: reader.max_doc(),
            doc: -1,
            score: self.boost * self.query_norm,
        })))
    }

    fn explain(&self, reader: &Arc<dyn LeafReader>, doc: DocId) -> IoResult<Explanation> {
        if doc < 0 || doc >= reader.max_doc() || reader.is_deleted(doc) {
            return Ok(Explanation::no_match("not a live document", vec![]));
        }

        Ok(Explanation::matched(
            self.boost * self.query_norm,
            "*:*, product of:",
            vec![
                Explanation::matched(self.boost, "boost", vec![]),
                Explanation::matched(self.query_norm, "queryNorm", vec![]),
            ],
        ))
    }
}

#[derive(Debug)]
struct MatchAllScorer {
    reader: Arc<dyn LeafReader>,
    max_doc: DocId,
    doc: DocId,
    score: f32,
}

impl DocIdSetIterator for MatchAllScorer {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> IoResult<DocId> {
        loop {
            self.doc += 1;
            if self.doc >= self.max_doc {
                self.doc = NO_MORE_DOCS;
                return Ok(self.doc);
            }
            if !self.reader.is_deleted(self.doc) {
                return Ok(self.doc);
            }
        }
    }

    fn advance(&mut self, target: DocId) -> IoResult<DocId> {
        if target >= self.max_doc {
            self.doc = NO_MORE_DOCS;
            return Ok(self.doc);
        }
        self.doc = target - 1;
        self.next_doc()
    }

    fn cost(&self) -> u64 {
        self.max_doc as u64
    }
}

impl Scorer for MatchAllScorer {
    fn score(&mut self) -> IoResult<f32> {
        Ok(self.score)
    }
}
