//! Cross-field rule evaluation.
//!
//! The same rule code runs in two modes: before encoding, where the first
//! violation aborts the pass, and during validation, where every violation is
//! collected and reported as a diagnostic.

use super::attr::Attr;
use super::error::{TranscodeError, TranscodeResult};
use super::line::{QUOTABLE, QUOTABLE_EXPECTED};
use super::path::AttributePath;
use regex::Regex;

/// How violations are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Return the first violation as an error.
    FailFast,
    /// Record every violation and keep walking.
    Collect,
}

/// Rule violation accumulator.
#[derive(Debug)]
pub struct Checks {
    mode: CheckMode,
    errors: Vec<TranscodeError>,
}

impl Checks {
    pub fn new(mode: CheckMode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
        }
    }

    pub fn fail_fast() -> Self {
        Self::new(CheckMode::FailFast)
    }

    pub fn collect() -> Self {
        Self::new(CheckMode::Collect)
    }

    /// Handle one violation according to the mode.
    pub fn report(&mut self, error: TranscodeError) -> TranscodeResult<()> {
        match self.mode {
            CheckMode::FailFast => Err(error),
            CheckMode::Collect => {
                self.errors.push(error);
                Ok(())
            }
        }
    }

    /// `attribute` and `conflicts_with` are mutually exclusive.
    pub fn conflict(
        &mut self,
        path: &AttributePath,
        attribute: &str,
        is_set: bool,
        conflicts_with: &str,
        other_is_set: bool,
    ) -> TranscodeResult<()> {
        if is_set && other_is_set {
            return self.report(TranscodeError::Conflict {
                path: path.at_name(attribute),
                attribute: attribute.to_string(),
                conflicts_with: conflicts_with.to_string(),
            });
        }
        Ok(())
    }

    /// `attribute` may only be set together with `requires`.
    pub fn requires(
        &mut self,
        path: &AttributePath,
        attribute: &str,
        is_set: bool,
        requires: &str,
        required_is_set: bool,
    ) -> TranscodeResult<()> {
        if is_set && !required_is_set {
            return self.report(TranscodeError::MissingDependency {
                path: path.at_name(attribute),
                attribute: attribute.to_string(),
                requires: requires.to_string(),
            });
        }
        Ok(())
    }

    /// A declared block must carry at least one attribute.
    pub fn non_empty(
        &mut self,
        path: &AttributePath,
        block: &str,
        is_empty: bool,
    ) -> TranscodeResult<()> {
        if is_empty {
            return self.report(TranscodeError::EmptyBlock {
                path: path.clone(),
                block: block.to_string(),
            });
        }
        Ok(())
    }

    /// `value` must match `pattern`; `expected` describes the accepted shape.
    pub fn matches(
        &mut self,
        path: &AttributePath,
        attribute: &str,
        value: &str,
        pattern: &Regex,
        expected: &str,
    ) -> TranscodeResult<()> {
        if !pattern.is_match(value) {
            return self.report(TranscodeError::InvalidValue {
                path: path.at_name(attribute),
                attribute: attribute.to_string(),
                message: format!("'{}' is not {}", value, expected),
            });
        }
        Ok(())
    }

    /// A known string must be writable between double quotes.
    pub fn quotable(
        &mut self,
        path: &AttributePath,
        attribute: &str,
        value: &Attr<String>,
    ) -> TranscodeResult<()> {
        match value.as_str() {
            Some(v) => self.matches(path, attribute, v, &QUOTABLE, QUOTABLE_EXPECTED),
            None => Ok(()),
        }
    }

    /// Every element of a string list must be non-empty and quotable.
    pub fn quotable_all(
        &mut self,
        path: &AttributePath,
        attribute: &str,
        values: &[String],
    ) -> TranscodeResult<()> {
        for value in values {
            self.present(path, attribute, value)?;
        }
        Ok(())
    }

    /// A block identifier or list element: non-empty and quotable.
    pub fn present(
        &mut self,
        path: &AttributePath,
        attribute: &str,
        value: &str,
    ) -> TranscodeResult<()> {
        if value.is_empty() {
            return self.report(TranscodeError::InvalidValue {
                path: path.at_name(attribute),
                attribute: attribute.to_string(),
                message: "must not be empty".to_string(),
            });
        }
        self.matches(path, attribute, value, &QUOTABLE, QUOTABLE_EXPECTED)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<TranscodeError> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_fast_returns_first_violation() {
        let mut checks = Checks::fail_fast();
        let path = AttributePath::name("family_inet_output");
        let err = checks
            .conflict(&path, "local_dump", true, "no_local_dump", true)
            .unwrap_err();
        assert_eq!(
            err.path().map(ToString::to_string).as_deref(),
            Some("family_inet_output.local_dump")
        );
        assert!(checks.is_empty());
    }

    #[test]
    fn test_collect_keeps_walking() {
        let mut checks = Checks::collect();
        let root = AttributePath::root();
        checks.requires(&root, "proxy_source_address", true, "proxy", false).unwrap();
        checks.non_empty(&AttributePath::name("input"), "input", true).unwrap();
        checks.conflict(&root, "a", true, "b", false).unwrap();

        let errors = checks.into_errors();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], TranscodeError::MissingDependency { .. }));
        assert!(matches!(errors[1], TranscodeError::EmptyBlock { .. }));
    }

    #[test]
    fn test_matches() {
        let pattern = Regex::new("^[a-z]+$").unwrap();
        let mut checks = Checks::collect();
        checks.matches(&AttributePath::root(), "name", "ok", &pattern, "lowercase").unwrap();
        checks.matches(&AttributePath::root(), "name", "Not Ok", &pattern, "lowercase").unwrap();
        let errors = checks.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "name: 'Not Ok' is not lowercase");
    }

    #[test]
    fn test_quotable_values() {
        let mut checks = Checks::collect();
        let path = AttributePath::name("flow_server").at_index(0);
        checks.quotable(&path, "forwarding_class", &Attr::from("best effort")).unwrap();
        checks.quotable(&path, "forwarding_class", &Attr::Unset).unwrap();
        checks.quotable(&path, "source_address", &Attr::from("x\"y")).unwrap();
        checks.quotable_all(&path, "extension_service", &["".to_string()]).unwrap();
        checks.present(&path, "hostname", "").unwrap();

        let errors = checks.into_errors();
        let paths: Vec<String> = errors
            .iter()
            .filter_map(|e| e.path().map(ToString::to_string))
            .collect();
        assert_eq!(
            paths,
            vec![
                "flow_server[0].source_address",
                "flow_server[0].extension_service",
                "flow_server[0].hostname",
            ]
        );
        assert!(errors
            .iter()
            .all(|e| matches!(e, TranscodeError::InvalidValue { .. })));
        assert_eq!(errors[2].to_string(), "hostname: must not be empty");
    }
}
