#![allow(dead_code)]

use {
    lucene_function::{
        index::{DocId, LeafReader, MemoryLeafReader},
        search::{DocIdSetIterator, Explanation, IndexSearcher, Query, Scorer, Weight, NO_MORE_DOCS},
    },
    std::{
        any::Any,
        fmt::{Display, Formatter, Result as FmtResult},
        hash::Hasher,
        io::{Error as IoError, ErrorKind as IoErrorKind, Result as IoResult},
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    },
};

/// A query with a fixed list of `(doc, score)` hits in every segment.
///
/// The scorer fails with an I/O error once it is moved to or past `fail_at`. Every scorer the
/// weight creates (including the `None` for a query without hits) bumps `scorers_created`; every
/// weight bumps `weights_created`.
#[derive(Debug)]
pub struct ScriptedQuery {
    pub name: String,
    pub hits: Vec<(DocId, f32)>,
    pub fail_at: Option<DocId>,
    pub scorers_created: Arc<AtomicUsize>,
    pub weights_created: Arc<AtomicUsize>,
}

impl ScriptedQuery {
    pub fn new(name: &str, hits: &[(DocId, f32)]) -> Self {
        Self {
            name: name.to_string(),
            hits: hits.to_vec(),
            fail_at: None,
            scorers_created: Arc::new(AtomicUsize::new(0)),
            weights_created: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_at(mut self, doc: DocId) -> Self {
        self.fail_at = Some(doc);
        self
    }

    pub fn scorers_created(&self) -> usize {
        self.scorers_created.load(Ordering::SeqCst)
    }

    pub fn weights_created(&self) -> usize {
        self.weights_created.load(Ordering::SeqCst)
    }
}

impl Display for ScriptedQuery {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "scripted:{}", self.name)
    }
}

impl Query for ScriptedQuery {
    fn create_weight(&self, _searcher: &IndexSearcher) -> IoResult<Box<dyn Weight>> {
        self.weights_created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedWeight {
            hits: self.hits.clone(),
            fail_at: self.fail_at,
            scorers_created: self.scorers_created.clone(),
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn query_eq(&self, other: &dyn Query) -> bool {
        other.as_any().downcast_ref::<Self>().map_or(false, |other| self.name == other.name)
    }

    fn query_hash(&self, state: &mut dyn Hasher) {
        state.write(self.name.as_bytes());
    }
}

#[derive(Debug)]
struct ScriptedWeight {
    hits: Vec<(DocId, f32)>,
    fail_at: Option<DocId>,
    scorers_created: Arc<AtomicUsize>,
}

impl Weight for ScriptedWeight {
    fn scorer(&self, _reader: &Arc<dyn LeafReader>) -> IoResult<Option<Box<dyn Scorer>>> {
        self.scorers_created.fetch_add(1, Ordering::SeqCst);
        if self.hits.is_empty() {
            return Ok(None);
        }

        Ok(Some(Box::new(ScriptedScorer {
            hits: self.hits.clone(),
            fail_at: self.fail_at,
            pos: None,
            doc: -1,
        })))
    }

    fn explain(&self, _reader: &Arc<dyn LeafReader>, doc: DocId) -> IoResult<Explanation> {
        Ok(match self.hits.iter().find(|hit| hit.0 == doc) {
            Some(&(_, score)) => Explanation::matched(score, "scripted hit", vec![]),
            None => Explanation::no_match("not scripted", vec![]),
        })
    }
}

#[derive(Debug)]
struct ScriptedScorer {
    hits: Vec<(DocId, f32)>,
    fail_at: Option<DocId>,
    pos: Option<usize>,
    doc: DocId,
}

impl ScriptedScorer {
    fn check(&self, target: DocId) -> IoResult<()> {
        match self.fail_at {
            Some(fail_at) if target >= fail_at => {
                Err(IoError::new(IoErrorKind::Other, format!("scripted failure at doc {target}")))
            }
            _ => Ok(()),
        }
    }

    fn move_to(&mut self, pos: usize) -> DocId {
        self.pos = Some(pos);
        self.doc = self.hits.get(pos).map_or(NO_MORE_DOCS, |hit| hit.0);
        self.doc
    }
}

impl DocIdSetIterator for ScriptedScorer {
    fn doc_id(&self) -> DocId {
        self.doc
    }

    fn next_doc(&mut self) -> IoResult<DocId> {
        let pos = self.pos.map_or(0, |pos| pos + 1);
        let doc = self.hits.get(pos).map_or(NO_MORE_DOCS, |hit| hit.0);
        self.check(doc)?;
        Ok(self.move_to(pos))
    }

    fn advance(&mut self, target: DocId) -> IoResult<DocId> {
        self.check(target)?;
        let start = self.pos.map_or(0, |pos| pos + 1);
        let pos = start + self.hits[start.min(self.hits.len())..].iter().take_while(|hit| hit.0 < target).count();
        Ok(self.move_to(pos))
    }

    fn cost(&self) -> u64 {
        self.hits.len() as u64
    }
}

impl Scorer for ScriptedScorer {
    fn score(&mut self) -> IoResult<f32> {
        Ok(self.pos.and_then(|pos| self.hits.get(pos)).map_or(0.0, |hit| hit.1))
    }
}

/// A segment whose document `i` has `values[i]` in field `f`, or nothing for `None`.
pub fn segment(values: &[Option<&str>]) -> Arc<dyn LeafReader> {
    let mut builder = MemoryLeafReader::builder();
    for value in values {
        builder = match value {
            Some(value) => builder.add_document([("f", *value)]),
            None => builder.add_document(Vec::<(&str, &str)>::new()),
        };
    }
    Arc::new(builder.build())
}
