//! Per-dump options
//!
//! A [`DumpOptions`] value is built once, then passed down the walk by shared
//! reference. Nothing in the walk mutates it.

use super::error::{DumpError, Result};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

type FieldPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Show composites as bare headers; only structural children
    /// (collection elements, error chains) are rendered.
    pub no_fields: bool,
    /// Deepest level whose children are expanded. The root is depth 0.
    pub max_depth: Option<usize>,
    pub field_filter: FieldFilter,
    /// Type names matching any of these render as opaque leaves.
    pub opaque_types: Vec<Regex>,
}

impl DumpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_fields(mut self) -> Self {
        self.no_fields = true;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Only render composite fields whose name matches `pattern`. Repeated
    /// calls widen the set.
    pub fn include_fields(mut self, pattern: &str) -> Result<Self> {
        self.field_filter.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Skip composite fields whose name matches `pattern`.
    pub fn exclude_fields(mut self, pattern: &str) -> Result<Self> {
        self.field_filter.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Skip composite fields for which `predicate` returns false.
    pub fn field_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.field_filter.predicate = Some(Arc::new(predicate));
        self
    }

    /// Render types whose name matches `pattern` as opaque leaves.
    pub fn opaque_type(mut self, pattern: &str) -> Result<Self> {
        self.opaque_types.push(compile(pattern)?);
        Ok(self)
    }

    pub fn is_opaque_type(&self, type_name: &str) -> bool {
        self.opaque_types.iter().any(|re| re.is_match(type_name))
    }

    /// Whether `depth` lies beyond the configured limit.
    pub fn exceeds_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth > max)
    }
}

/// Which composite fields get rendered. Collection elements and error
/// chains are never filtered.
#[derive(Clone, Default)]
pub struct FieldFilter {
    pub include: Vec<Regex>,
    pub exclude: Vec<Regex>,
    pub predicate: Option<FieldPredicate>,
}

impl FieldFilter {
    pub fn allows(&self, name: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|re| re.is_match(name)) {
            return false;
        }
        if self.exclude.iter().any(|re| re.is_match(name)) {
            return false;
        }
        self.predicate.as_ref().map_or(true, |keep| keep(name))
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty() && self.predicate.is_none()
    }
}

impl fmt::Debug for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldFilter")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| DumpError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_unbounded_with_fields() {
        let options = DumpOptions::default();
        assert!(!options.no_fields);
        assert_eq!(options.max_depth, None);
        assert!(options.field_filter.is_empty());
        assert!(!options.exceeds_depth(usize::MAX));
    }

    #[test]
    fn depth_limit_is_inclusive() {
        let options = DumpOptions::new().with_max_depth(2);
        assert!(!options.exceeds_depth(2));
        assert!(options.exceeds_depth(3));
    }

    #[rstest(
        name,
        expected,
        case("name", true),
        case("secret_key", false),
        case("size", false)
    )]
    fn include_then_exclude(name: &str, expected: bool) {
        let options = DumpOptions::new()
            .include_fields("^(name|secret_.*)$")
            .and_then(|o| o.exclude_fields("^secret_"))
            .expect("valid patterns");
        assert_eq!(options.field_filter.allows(name), expected);
    }

    #[test]
    fn predicate_applies_after_patterns() {
        let options = DumpOptions::new().field_predicate(|name| !name.starts_with('_'));
        assert!(options.field_filter.allows("visible"));
        assert!(!options.field_filter.allows("_cache"));
    }

    #[test]
    fn opaque_type_patterns() {
        let options = DumpOptions::new()
            .opaque_type("Buffer$")
            .expect("valid pattern");
        assert!(options.is_opaque_type("codec::EncoderBuffer"));
        assert!(!options.is_opaque_type("codec::Encoder"));
    }

    #[test]
    fn bad_patterns_are_reported() {
        let err = DumpOptions::new().exclude_fields("[").expect_err("unclosed class");
        assert!(matches!(err, DumpError::InvalidPattern { ref pattern, .. } if pattern == "["));
    }
}
