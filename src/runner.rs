//! Browser test-runner filters.
//!
//! The runner page accepts a `filter` query parameter; a kind-specific run
//! uses a case-insensitive regex such as `/unit.*header/i`, an unqualified run
//! filters on the bare component name.

use crate::taxonomy::TestKind;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Base URL used when neither `--base` nor `COMPONENT_VIEW_TEST_URL` is set.
pub const DEFAULT_TEST_URL: &str = "http://localhost:4200/tests";

pub const TEST_URL_ENV: &str = "COMPONENT_VIEW_TEST_URL";

const FILTER_QUERY: &str = "?filter=";

// Everything `encodeURI` leaves alone: alphanumerics plus `;,/?:@&=+$-_.!~*'()#`.
const ENCODE_URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

pub fn test_filter(component_name: &str, kind: Option<TestKind>) -> String {
    match kind {
        Some(kind) => format!("/{kind}.*{component_name}/i"),
        None => component_name.to_string(),
    }
}

/// Runner URL for `component_name`, encoded the way `encodeURI` would.
pub fn test_runner_url(base: &str, component_name: &str, kind: Option<TestKind>) -> String {
    let raw = format!("{base}{FILTER_QUERY}{}", test_filter(component_name, kind));
    encode_uri(&raw)
}

fn encode_uri(raw: &str) -> String {
    utf8_percent_encode(raw, ENCODE_URI_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_scopes_by_kind() {
        assert_eq!(test_filter("header", Some(TestKind::Unit)), "/unit.*header/i");
        assert_eq!(
            test_filter("header", Some(TestKind::Acceptance)),
            "/acceptance.*header/i"
        );
        assert_eq!(test_filter("header", None), "header");
    }

    #[test]
    fn url_keeps_reserved_characters() {
        assert_eq!(
            test_runner_url("http://localhost:4200/tests", "header", Some(TestKind::Integration)),
            "http://localhost:4200/tests?filter=/integration.*header/i"
        );
    }

    #[test]
    fn url_escapes_spaces_and_non_ascii() {
        assert_eq!(
            test_runner_url("http://host/tests", "a b", None),
            "http://host/tests?filter=a%20b"
        );
        assert_eq!(encode_uri("é"), "%C3%A9");
        assert_eq!(encode_uri("a'b#c[d]"), "a'b#c%5Bd%5D");
    }
}
