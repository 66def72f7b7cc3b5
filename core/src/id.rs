use {
    rand::{rngs::StdRng, RngCore, SeedableRng},
    std::fmt::{Debug, Display, Formatter, Result as FmtResult},
};

/// The length of source identifiers.
pub const SOURCE_ID_LENGTH: usize = 16;

/// Opaque identity token of a value source instance.
///
/// Two value sources that describe the same computation compare equal through
/// [ValueSource::source_eq][crate::function::ValueSource::source_eq], but each instance still gets
/// its own `SourceId`. Per-query state such as weights is keyed by this token, so it tracks the
/// instance rather than the value.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SourceId {
    id: [u8; SOURCE_ID_LENGTH],
}

impl Debug for SourceId {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "SourceId({self})")
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for b in self.id {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl SourceId {
    /// Generate a new random id.
    pub fn random_id() -> Self {
        let mut id = [0u8; SOURCE_ID_LENGTH];
        StdRng::from_entropy().fill_bytes(&mut id);
        Self {
            id,
        }
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::random_id()
    }
}
