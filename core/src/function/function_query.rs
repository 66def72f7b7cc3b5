use {
    crate::{
        error::FunctionResult,
        function::{context::Context, value_source::ValueSource, value_source_scorer::ValueSourceScorer},
        index::{DocId, LeafReader},
        search::{DocIdSetIterator, Explanation, IndexSearcher, Query, Scorer, Weight},
    },
    log::debug,
    std::{
        any::Any,
        fmt::{Display, Formatter, Result as FmtResult},
        hash::Hasher,
        io::Result as IoResult,
        sync::Arc,
    },
};

/// Returns a score for each document based on a [ValueSource], often some function of the value
/// of a field.
///
/// Every live document matches; its score is the value of the source times the normalized boost.
#[derive(Debug)]
pub struct FunctionQuery {
    func: Arc<dyn ValueSource>,
    boost: f32,
}

impl FunctionQuery {
    /// Creates a query scoring every document with `func`.
    pub fn new(func: Arc<dyn ValueSource>) -> Self {
        Self {
            func,
            boost: 1.0,
        }
    }

    /// Sets the boost of the query.
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    /// The underlying value source that this query uses to score documents.
    #[inline]
    pub fn get_value_source(&self) -> &Arc<dyn ValueSource> {
        &self.func
    }
}

impl Display for FunctionQuery {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "FunctionQuery({})", self.func.description())?;
        if self.boost != 1.0 {
            write!(f, "^{}", self.boost)?;
        }
        Ok(())
    }
}

impl Query for FunctionQuery {
    fn create_weight(&self, searcher: &IndexSearcher) -> IoResult<Box<dyn Weight>> {
        let mut context = Context::new();
        self.func.create_weight(&mut context, searcher)?;
        debug!("Created weight for {self} with {} value source weights", context.len());

        Ok(Box::new(FunctionWeight {
            func: self.func.clone(),
            context,
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
        other
            .as_any()
            .downcast_ref::<Self>()
            .map_or(false, |other| self.boost.to_bits() == other.boost.to_bits() && *self.func == *other.func)
    }

    fn query_hash(&self, state: &mut dyn Hasher) {
        state.write(b"FunctionQuery");
        self.func.source_hash(state);
        state.write_u32(self.boost.to_bits());
    }
}

#[derive(Debug)]
struct FunctionWeight {
    func: Arc<dyn ValueSource>,
    context: Context,
    boost: f32,
    query_norm: f32,
}

impl FunctionWeight {
    fn query_weight(&self) -> f32 {
        self.boost * self.query_norm
    }
}

impl Weight for FunctionWeight {
    fn value_for_normalization(&self) -> f32 {
        self.boost * self.boost
    }

    fn normalize(&mut self, norm: f32) {
        self.query_norm = norm;
    }

    fn scorer(&self, reader: &Arc<dyn LeafReader>) -> IoResult<Option<Box<dyn Scorer>>> {
        let values = self.func.get_values(&self.context, reader)?;
        Ok(Some(Box::new(FunctionScorer {
            inner: ValueSourceScorer::new(reader.clone(), values),
            query_weight: self.query_weight(),
        })))
    }

    fn explain(&self, reader: &Arc<dyn LeafReader>, doc: DocId) -> IoResult<Explanation> {
        let values = self.func.get_values(&self.context, reader)?;
        let mut scorer = ValueSourceScorer::new(reader.clone(), values);
        Ok(explain_function(&mut scorer, self, doc)?)
    }
}

fn explain_function(
    scorer: &mut ValueSourceScorer,
    weight: &FunctionWeight,
    doc: DocId,
) -> FunctionResult<Explanation> {
    if !scorer.matches(doc)? {
        return Ok(Explanation::no_match("deleted document", vec![]));
    }

    let value = scorer.explain(doc)?;
    let score = weight.query_weight() * value.value();
    Ok(Explanation::matched(
        score,
        format!("FunctionQuery({}), product of:", weight.func.description()),
        vec![
            value,
            Explanation::matched(weight.boost, "boost", vec![]),
            Explanation::matched(weight.query_norm, "queryNorm", vec![]),
        ],
    ))
}

/// Scores every live document with the value of the function.
#[derive(Debug)]
struct FunctionScorer {
    inner: ValueSourceScorer,
    query_weight: f32,
}

impl DocIdSetIterator for FunctionScorer {
    fn doc_id(&self) -> DocId {
        self.inner.doc_id()
    }

    fn next_doc(&mut self) -> IoResult<DocId> {
        self.inner.next_doc()
    }

    fn advance(&mut self, target: DocId) -> IoResult<DocId> {
        self.inner.advance(target)
    }

    fn cost(&self) -> u64 {
        self.inner.cost()
    }
}

impl Scorer for FunctionScorer {
    fn score(&mut self) -> IoResult<f32> {
        let value = self.inner.value()?;
        Ok(self.query_weight * value)
    }
}
