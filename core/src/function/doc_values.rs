use {
    crate::{error::FunctionResult, index::DocId, search::Explanation},
    std::fmt::Debug,
};

/// Represents field values as different types for the documents of one segment.
///
/// A `DocValues` is bound to one ([ValueSource][crate::function::ValueSource], segment) pair and
/// may keep cursor state between calls. Callers must request document ids in non-decreasing order;
/// asking for the same document again returns the same value.
///
/// Only [DocValues::float_val] and [DocValues::to_string] are required; the other accessors
/// convert the float value.
pub trait DocValues: Debug {
    /// The value of `doc` as a float.
    fn float_val(&mut self, doc: DocId) -> FunctionResult<f32>;

    /// The value of `doc` as an int (saturating, NaN becomes `0`).
    fn int_val(&mut self, doc: DocId) -> FunctionResult<i32> {
        Ok(self.float_val(doc)? as i32)
    }

    /// The value of `doc` as a long (saturating, NaN becomes `0`).
    fn long_val(&mut self, doc: DocId) -> FunctionResult<i64> {
        Ok(self.float_val(doc)? as i64)
    }

    /// The value of `doc` as a double.
    fn double_val(&mut self, doc: DocId) -> FunctionResult<f64> {
        Ok(self.float_val(doc)? as f64)
    }

    /// The value of `doc` as decimal text.
    fn str_val(&mut self, doc: DocId) -> FunctionResult<String> {
        Ok(format_float(self.float_val(doc)?))
    }

    /// `"<description>=<value>"` for debugging.
    fn to_string(&mut self, doc: DocId) -> FunctionResult<String>;

    /// Explains the value of `doc`.
    fn explain(&mut self, doc: DocId) -> FunctionResult<Explanation> {
        let value = self.float_val(doc)?;
        Ok(Explanation::matched(value, self.to_string(doc)?, vec![]))
    }
}

/// Formats a float the way descriptions print them: plain decimal with a fractional part for
/// magnitudes in `[1e-3, 1e7)` (`1.0`, `0.5`), scientific notation otherwise (`1.0E20`, `2.5E-4`).
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    if value.is_infinite() {
        return if value > 0.0 {
            "Infinity"
        } else {
            "-Infinity"
        }
        .to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{value:?}");
    }

    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => scientific,
    }
}
