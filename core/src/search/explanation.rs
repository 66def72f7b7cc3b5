use std::fmt::{Display, Formatter, Result as FmtResult, Write};

/// Describes how the value of a document was computed.
#[derive(Clone, Debug, PartialEq)]
pub struct Explanation {
    is_match: bool,
    value: f32,
    description: String,
    details: Vec<Explanation>,
}

impl Explanation {
    /// Creates an explanation for a matching document.
    pub fn matched(value: f32, description: impl Into<String>, details: Vec<Explanation>) -> Self {
        Self {
            is_match: true,
            value,
            description: description.into(),
            details,
        }
    }

    /// Creates an explanation for a document that does not match; its value is `0`.
    pub fn no_match(description: impl Into<String>, details: Vec<Explanation>) -> Self {
        Self {
            is_match: false,
            value: 0.0,
            description: description.into(),
            details,
        }
    }

    /// Whether the document matched.
    #[inline]
    pub fn is_match(&self) -> bool {
        self.is_match
    }

    /// The explained value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// What the value means.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sub-explanations.
    #[inline]
    pub fn details(&self) -> &[Explanation] {
        &self.details
    }

    /// `"<value> = <description>"`
    pub fn summary(&self) -> String {
        format!("{} = {}", self.value, self.description)
    }

    fn write_indented(&self, out: &mut String, depth: usize) -> FmtResult {
        for _ in 0..depth {
            out.push_str("  ");
        }
        writeln!(out, "{}", self.summary())?;
        for detail in &self.details {
            detail.write_indented(out, depth + 1)?;
        }
        Ok(())
    }
}

impl Display for Explanation {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let mut out = String::new();
        self.write_indented(&mut out, 0)?;
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use {super::Explanation, pretty_assertions::assert_eq, test_log::test};

    #[test]
    fn test_display_nests_details() {
        let e = Explanation::matched(
            3.0,
            "sum of:",
            vec![Explanation::matched(1.0, "ord(a)=1", vec![]), Explanation::matched(2.0, "ord(b)=2", vec![])],
        );
        assert_eq!(e.to_string(), "3 = sum of:\n  1 = ord(a)=1\n  2 = ord(b)=2\n");

        let e = Explanation::no_match("no value", vec![]);
        assert!(!e.is_match());
        assert_eq!(e.value(), 0.0);
    }
}
