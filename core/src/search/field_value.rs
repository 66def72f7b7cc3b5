/// The sort value a comparator reports for a slot.
///
/// Lucene exposes these as boxed objects; here the possible kinds are spelled out.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Represents a string value.
    String(String),
    /// Represents an integer value.
    Int(i32),
    /// Represents a float value.
    Float(f32),
    /// Represents a long value.
    Long(i64),
    /// Represents a double value.
    Double(f64),
}
