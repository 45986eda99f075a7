//! Config line helpers: writing `set` lines and picking read lines apart.

use super::attr::Attr;
use super::error::{TranscodeError, TranscodeResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// Verb prefix of configuration lines.
pub const SET_LS: &str = "set ";

/// Verb prefix of removal lines.
pub const DELETE_LS: &str = "delete ";

/// Name of the implicit top-level routing instance.
pub const DEFAULT_ROUTING_INSTANCE: &str = "default";

/// Values that fit between double quotes on a single line.
pub static QUOTABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[^"\r\n]*$"#).expect("Invalid quotable regex"));

pub const QUOTABLE_EXPECTED: &str = "a value without double quotes or line breaks";

/// Wrap a value in double quotes.
///
/// `value` must match [`QUOTABLE`]; rules check this before encoding.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

/// Remove one pair of surrounding double quotes, if present.
pub fn trim_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Prepend the `routing-instances "<ri>" ` qualifier unless `routing_instance`
/// names the default instance.
pub fn qualified_path(routing_instance: &str, path: &str) -> String {
    if routing_instance.is_empty() || routing_instance == DEFAULT_ROUTING_INSTANCE {
        path.to_string()
    } else {
        format!("routing-instances {} {}", quote(routing_instance), path)
    }
}

/// Split the leading identifier token from the rest of a line.
///
/// The token ends at the first space, or at the closing quote when it starts
/// with a double quote. Quotes are stripped from the returned identifier and a
/// single separating space is removed from the remainder.
pub fn split_identifier(rest: &str) -> (&str, &str) {
    let end = if rest.starts_with('"') {
        match rest[1..].find('"') {
            Some(pos) => pos + 2,
            None => rest.len(),
        }
    } else {
        rest.find(' ').unwrap_or(rest.len())
    };
    let (identifier, remainder) = rest.split_at(end);
    let remainder = remainder.strip_prefix(' ').unwrap_or(remainder);
    (trim_quotes(identifier), remainder)
}

/// Strict base-10 integer parsing for values read from the device.
pub fn parse_i64(value: &str) -> TranscodeResult<i64> {
    value.parse::<i64>().map_err(|e| {
        TranscodeError::parse(
            value,
            format!("failed to convert value from '{}' to integer: {}", value, e),
        )
    })
}

/// Parsed integer wrapped as a known attribute.
pub fn int_attr(value: &str) -> TranscodeResult<Attr<i64>> {
    parse_i64(value).map(Attr::Known)
}

/// String read from the device wrapped as a known attribute.
pub fn string_attr(value: &str) -> Attr<String> {
    Attr::Known(trim_quotes(value).to_string())
}

/// Appends `set` lines under a fixed path prefix.
///
/// Writers for nested blocks share the parent's output buffer and extend the
/// prefix with the block keyword and identifier.
#[derive(Debug)]
pub struct SetWriter<'a> {
    prefix: String,
    lines: &'a mut Vec<String>,
}

impl<'a> SetWriter<'a> {
    pub fn new(prefix: impl Into<String>, lines: &'a mut Vec<String>) -> Self {
        Self {
            prefix: prefix.into(),
            lines,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of lines in the shared buffer.
    pub fn written(&self) -> usize {
        self.lines.len()
    }

    /// Append `prefix + rest`.
    pub fn line(&mut self, rest: impl AsRef<str>) {
        self.lines.push(format!("{}{}", self.prefix, rest.as_ref()));
    }

    /// Append the bare prefix, creating the stanza without any option.
    pub fn stanza(&mut self) {
        self.lines.push(self.prefix.trim_end().to_string());
    }

    pub fn flag(&mut self, keyword: &str, enabled: bool) {
        if enabled {
            self.line(keyword);
        }
    }

    /// Append `keyword "value"` for a known, non-empty string.
    pub fn string(&mut self, keyword: &str, value: &Attr<String>) {
        if let Some(v) = value.as_str() {
            self.line(format!("{} {}", keyword, quote(v)));
        }
    }

    /// Append `keyword value` for a known integer.
    pub fn int(&mut self, keyword: &str, value: &Attr<i64>) {
        if let Some(v) = value.known() {
            self.line(format!("{} {}", keyword, v));
        }
    }

    /// One `keyword "value"` line per element.
    pub fn strings(&mut self, keyword: &str, values: &[String]) {
        for v in values {
            self.line(format!("{} {}", keyword, quote(v)));
        }
    }

    /// Writer for a sub-path of this one.
    pub fn nested(&mut self, extension: impl AsRef<str>) -> SetWriter<'_> {
        SetWriter {
            prefix: format!("{}{}", self.prefix, extension.as_ref()),
            lines: &mut *self.lines,
        }
    }

    /// Writer for one identified block: `<keyword> "<identifier>" `.
    pub fn block(&mut self, keyword: &str, identifier: &str) -> SetWriter<'_> {
        self.nested(format!("{} {} ", keyword, quote(identifier)))
    }
}
