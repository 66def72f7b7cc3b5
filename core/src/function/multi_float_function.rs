use {
    crate::{
        error::{FunctionError, FunctionResult},
        function::{context::Context, doc_values::DocValues, value_source::ValueSource},
        id::SourceId,
        index::{DocId, LeafReader},
        search::{Explanation, IndexSearcher},
    },
    std::{any::Any, hash::Hasher, sync::Arc},
};

/// The combination applied by a [MultiFloatFunction].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FloatOp {
    /// The sum of the values.
    Sum,

    /// The product of the values.
    Product,

    /// The largest value.
    Max,

    /// The smallest value.
    Min,
}

impl FloatOp {
    /// The function name used in descriptions.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Max => "max",
            Self::Min => "min",
        }
    }

    fn apply(self, acc: f32, value: f32) -> f32 {
        match self {
            Self::Sum => acc + value,
            Self::Product => acc * value,
            Self::Max => acc.max(value),
            Self::Min => acc.min(value),
        }
    }
}

/// Combines the float values of several sources into one.
#[derive(Debug)]
pub struct MultiFloatFunction {
    id: SourceId,
    op: FloatOp,
    sources: Vec<Arc<dyn ValueSource>>,
}

impl MultiFloatFunction {
    /// Creates a function applying `op` to the values of `sources`, left to right.
    ///
    /// # Errors
    /// [FunctionError::InvalidArgument] if `sources` is empty.
    pub fn new(op: FloatOp, sources: Vec<Arc<dyn ValueSource>>) -> FunctionResult<Self> {
        if sources.is_empty() {
            return Err(FunctionError::InvalidArgument(format!("{} needs at least one value source", op.name())));
        }

        Ok(Self {
            id: SourceId::random_id(),
            op,
            sources,
        })
    }

    /// The combination applied.
    #[inline]
    pub fn op(&self) -> FloatOp {
        self.op
    }

    /// The combined sources.
    #[inline]
    pub fn sources(&self) -> &[Arc<dyn ValueSource>] {
        &self.sources
    }
}

impl ValueSource for MultiFloatFunction {
    fn id(&self) -> SourceId {
        self.id
    }

    fn description(&self) -> String {
        let children: Vec<String> = self.sources.iter().map(|source| source.description()).collect();
        format!("{}({})", self.op.name(), children.join(","))
    }

    fn get_values(&self, context: &Context, reader: &Arc<dyn LeafReader>) -> FunctionResult<Box<dyn DocValues>> {
        let values = self
            .sources
            .iter()
            .map(|source| source.get_values(context, reader))
            .collect::<FunctionResult<Vec<_>>>()?;

        Ok(Box::new(MultiFloatDocValues {
            op: self.op,
            values,
        }))
    }

    fn create_weight(&self, context: &mut Context, searcher: &IndexSearcher) -> FunctionResult<()> {
        for source in &self.sources {
            source.create_weight(context, searcher)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn source_eq(&self, other: &dyn ValueSource) -> bool {
        other.as_any().downcast_ref::<Self>().map_or(false, |other| {
            self.op == other.op
                && self.sources.len() == other.sources.len()
                && self.sources.iter().zip(&other.sources).all(|(a, b)| a.source_eq(b.as_ref()))
        })
    }

    fn source_hash(&self, state: &mut dyn Hasher) {
        state.write(self.op.name().as_bytes());
        for source in &self.sources {
            source.source_hash(state);
        }
    }
}

#[derive(Debug)]
struct MultiFloatDocValues {
    op: FloatOp,
    values: Vec<Box<dyn DocValues>>,
}

impl DocValues for MultiFloatDocValues {
    fn float_val(&mut self, doc: DocId) -> FunctionResult<f32> {
        let mut result: Option<f32> = None;
        for values in self.values.iter_mut() {
            let value = values.float_val(doc)?;
            result = Some(match result {
                None => value,
                Some(acc) => self.op.apply(acc, value),
            });
        }

        Ok(result.unwrap_or_default())
    }

    fn to_string(&mut self, doc: DocId) -> FunctionResult<String> {
        let children =
            self.values.iter_mut().map(|values| values.to_string(doc)).collect::<FunctionResult<Vec<_>>>()?;
        Ok(format!("{}({})", self.op.name(), children.join(",")))
    }

    fn explain(&mut self, doc: DocId) -> FunctionResult<Explanation> {
        let details =
            self.values.iter_mut().map(|values| values.explain(doc)).collect::<FunctionResult<Vec<_>>>()?;
        let value = self.float_val(doc)?;
        Ok(Explanation::matched(value, format!("{}, computed from:", self.op.name()), details))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{FloatOp, MultiFloatFunction},
        crate::{
            error::FunctionError,
            function::{ConstValueSource, Context, OrdFieldSource, QueryValueSource, ValueSource},
            index::{LeafReader, MemoryLeafReader},
            search::{IndexSearcher, MatchAllDocsQuery},
        },
        pretty_assertions::assert_eq,
        std::sync::Arc,
        test_log::test,
    };

    fn reader() -> Arc<dyn LeafReader> {
        Arc::new(MemoryLeafReader::builder().add_document([("f", "b")]).add_document([("f", "a")]).build())
    }

    fn sources() -> Vec<Arc<dyn ValueSource>> {
        let constant: Arc<dyn ValueSource> = Arc::new(ConstValueSource::new(1.5));
        let ord: Arc<dyn ValueSource> = Arc::new(OrdFieldSource::new("f"));
        vec![constant, ord]
    }

    #[test]
    fn test_ops() {
        let reader = reader();
        let expected = [
            (FloatOp::Sum, [3.5, 2.5]),
            (FloatOp::Product, [3.0, 1.5]),
            (FloatOp::Max, [2.0, 1.5]),
            (FloatOp::Min, [1.5, 1.0]),
        ];

        for (op, values) in expected {
            let function = MultiFloatFunction::new(op, sources()).unwrap();
            let mut dv = function.get_values(&Context::new(), &reader).unwrap();
            assert_eq!([dv.float_val(0).unwrap(), dv.float_val(1).unwrap()], values);
        }
    }

    #[test]
    fn test_description_and_explain() {
        let function = MultiFloatFunction::new(FloatOp::Sum, sources()).unwrap();
        assert_eq!(function.description(), "sum(const(1.5),ord(f))");

        let mut dv = function.get_values(&Context::new(), &reader()).unwrap();
        assert_eq!(dv.to_string(0).unwrap(), "sum(const(1.5),ord(f)=2)");
        assert_eq!(
            dv.explain(0).unwrap().to_string(),
            "3.5 = sum, computed from:\n  1.5 = const(1.5)\n  2 = ord(f)=2\n"
        );
    }

    #[test]
    fn test_create_weight_reaches_every_child() {
        let reader = reader();
        let first: Arc<dyn ValueSource> = Arc::new(QueryValueSource::new(Arc::new(MatchAllDocsQuery::new()), 0.0));
        let second: Arc<dyn ValueSource> = Arc::new(QueryValueSource::new(Arc::new(MatchAllDocsQuery::new()), 0.0));
        let constant: Arc<dyn ValueSource> = Arc::new(ConstValueSource::new(0.0));
        let function = MultiFloatFunction::new(FloatOp::Max, vec![first.clone(), constant, second.clone()]).unwrap();

        let mut context = Context::new();
        function.create_weight(&mut context, &IndexSearcher::for_leaf(reader)).unwrap();
        assert_eq!(context.len(), 2);
        assert!(context.get_weight(first.as_ref()).is_some());
        assert!(context.get_weight(second.as_ref()).is_some());
    }

    #[test]
    fn test_equality() {
        let a = MultiFloatFunction::new(FloatOp::Sum, sources()).unwrap();
        assert!(a.source_eq(&MultiFloatFunction::new(FloatOp::Sum, sources()).unwrap()));
        assert!(!a.source_eq(&MultiFloatFunction::new(FloatOp::Min, sources()).unwrap()));

        let mut reversed = sources();
        reversed.reverse();
        assert!(!a.source_eq(&MultiFloatFunction::new(FloatOp::Sum, reversed).unwrap()));
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(matches!(MultiFloatFunction::new(FloatOp::Sum, vec![]), Err(FunctionError::InvalidArgument(_))));
    }
}
