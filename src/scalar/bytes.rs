use crate::context::Context;
use crate::jsonschema::Schema;
use crate::rules::BytesRules;

// Bytes travel as base64 text in either alphabet, possibly wrapped over
// several lines.
const STANDARD_BASE64: &str = r"^[\r\nA-Za-z0-9+/]*$";
const URL_SAFE_BASE64: &str = r"^[\r\nA-Za-z0-9_-]*$";

pub fn schema_for_bytes(
    ctx: &Context,
    rules: Option<&BytesRules>,
    ignore_empty: bool,
) -> (Schema, bool) {
    ctx.trace("schema_for_bytes");

    let standard = Schema::string()
        .with_title("Standard base64 encoding")
        .with_pattern(STANDARD_BASE64);
    let url_safe = Schema::string()
        .with_title("URL-safe base64 encoding")
        .with_pattern(URL_SAFE_BASE64);

    let mut schema = Schema::string();
    schema.any_of = vec![standard, url_safe];

    // Only lower bounds or content rules exclude the empty value; an upper
    // bound alone (`max_len`, `len`) does not.
    let required = rules.is_some_and(|rules| {
        !ignore_empty
            && (non_empty(&rules.r#const)
                || non_empty(&rules.contains)
                || !rules.r#in.is_empty()
                || rules.min_len.is_some()
                || rules.pattern.is_some()
                || non_empty(&rules.prefix)
                || non_empty(&rules.suffix)
                || rules.well_known.is_some())
    });

    (schema, required)
}

fn non_empty(value: &Option<Vec<u8>>) -> bool {
    value.as_ref().is_some_and(|bytes| !bytes.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::BytesWellKnown;
    use regex::Regex;

    fn required(rules: BytesRules, ignore_empty: bool) -> bool {
        schema_for_bytes(&Context::default(), Some(&rules), ignore_empty).1
    }

    #[test]
    fn alphabets_accept_their_own_encoding() {
        let standard = Regex::new(STANDARD_BASE64).unwrap();
        let url_safe = Regex::new(URL_SAFE_BASE64).unwrap();
        assert!(standard.is_match("aGk+Pz8/\r\nYQ"));
        assert!(!standard.is_match("aGk-Pz8_"));
        assert!(url_safe.is_match("aGk-Pz8_YQ"));
        assert!(!url_safe.is_match("aGk+Pz8/"));
        assert!(standard.is_match("") && url_safe.is_match(""));
    }

    #[test]
    fn schema_is_a_disjunction_of_alphabets() {
        let (schema, required) = schema_for_bytes(&Context::default(), None, false);
        assert!(!required);
        assert_eq!(schema.any_of.len(), 2);
        assert_eq!(schema.any_of[0].pattern.as_deref(), Some(r"^[\r\nA-Za-z0-9+/]*$"));
        assert_eq!(schema.any_of[1].pattern.as_deref(), Some(r"^[\r\nA-Za-z0-9_-]*$"));
        assert!(!Regex::new(STANDARD_BASE64).unwrap().is_match("YQ=="));
    }

    #[test]
    fn content_rules_make_the_field_required() {
        assert!(required(BytesRules { min_len: Some(5), ..Default::default() }, false));
        assert!(required(BytesRules { r#const: Some(vec![1]), ..Default::default() }, false));
        assert!(required(BytesRules { r#in: vec![vec![1]], ..Default::default() }, false));
        assert!(required(BytesRules { pattern: Some(".*".into()), ..Default::default() }, false));
        assert!(required(BytesRules { suffix: Some(vec![0]), ..Default::default() }, false));
        assert!(required(
            BytesRules { well_known: Some(BytesWellKnown::Ipv6), ..Default::default() },
            false
        ));
    }

    #[test]
    fn empty_values_and_upper_bounds_do_not() {
        assert!(!required(BytesRules { r#const: Some(vec![]), ..Default::default() }, false));
        assert!(!required(BytesRules { prefix: Some(vec![]), ..Default::default() }, false));
        assert!(!required(BytesRules { max_len: Some(3), ..Default::default() }, false));
        assert!(!required(BytesRules { len: Some(3), ..Default::default() }, false));
        assert!(!required(BytesRules { not_in: vec![vec![1]], ..Default::default() }, false));
    }

    #[test]
    fn ignore_empty_suppresses_required() {
        assert!(!required(BytesRules { min_len: Some(5), ..Default::default() }, true));
    }
}
