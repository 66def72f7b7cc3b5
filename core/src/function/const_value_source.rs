use {
    crate::{
        error::FunctionResult,
        function::{
            context::Context,
            doc_values::{format_float, DocValues},
            value_source::ValueSource,
        },
        id::SourceId,
        index::{DocId, LeafReader},
    },
    std::{any::Any, hash::Hasher, sync::Arc},
};

/// A constant value for every document.
#[derive(Debug)]
pub struct ConstValueSource {
    id: SourceId,
    constant: f32,
}

impl ConstValueSource {
    /// Creates a source returning `constant` for every document.
    pub fn new(constant: f32) -> Self {
        Self {
            id: SourceId::random_id(),
            constant,
        }
    }

    /// The constant.
    #[inline]
    pub fn get_float(&self) -> f32 {
        self.constant
    }
}

impl ValueSource for ConstValueSource {
    fn id(&self) -> SourceId {
        self.id
    }

    fn description(&self) -> String {
        format!("const({})", format_float(self.constant))
    }

    fn get_values(&self, _context: &Context, _reader: &Arc<dyn LeafReader>) -> FunctionResult<Box<dyn DocValues>> {
        Ok(Box::new(ConstDocValues {
            description: self.description(),
            constant: self.constant,
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn source_eq(&self, other: &dyn ValueSource) -> bool {
        other.as_any().downcast_ref::<Self>().map_or(false, |other| self.constant.to_bits() == other.constant.to_bits())
    }

    fn source_hash(&self, state: &mut dyn Hasher) {
        state.write(b"const");
        state.write_u32(self.constant.to_bits());
    }
}

#[derive(Debug)]
struct ConstDocValues {
    description: String,
    constant: f32,
}

impl DocValues for ConstDocValues {
    fn float_val(&mut self, _doc: DocId) -> FunctionResult<f32> {
        Ok(self.constant)
    }

    fn to_string(&mut self, _doc: DocId) -> FunctionResult<String> {
        Ok(self.description.clone())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::ConstValueSource,
        crate::{
            function::{Context, ValueSource},
            index::{LeafReader, MemoryLeafReader},
        },
        pretty_assertions::assert_eq,
        std::sync::Arc,
        test_log::test,
    };

    #[test]
    fn test_constant() {
        let reader: Arc<dyn LeafReader> = Arc::new(MemoryLeafReader::builder().add_document([("a", "b")]).build());
        let source = ConstValueSource::new(2.5);
        assert_eq!(source.description(), "const(2.5)");

        let mut values = source.get_values(&Context::new(), &reader).unwrap();
        assert_eq!(values.float_val(0).unwrap(), 2.5);
        assert_eq!(values.int_val(0).unwrap(), 2);
        assert_eq!(values.to_string(0).unwrap(), "const(2.5)");

        assert!(source.source_eq(&ConstValueSource::new(2.5)));
        assert!(!source.source_eq(&ConstValueSource::new(-2.5)));
    }
}
