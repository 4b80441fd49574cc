//! Placeholder extraction and substitution for snippet command templates.
//!
//! A snippet command may embed placeholders of the form `<name>`,
//! `<name=default>` or `<name=|_option_||_option_|>`. This module finds them,
//! collects the distinct parameters in first-occurrence order, and substitutes
//! resolved values back into the command string. Both operations are pure and
//! share one scanner, so a span is either a placeholder for both of them or
//! for neither.

use std::collections::HashMap;

use indexmap::IndexMap;

/// A named slot extracted from one or more placeholders sharing the same name.
///
/// `choices` always has at least one element. A placeholder with no default
/// yields a single empty choice, a literal default yields that one choice,
/// and a choice list yields them all in written order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub choices: Vec<String>,
}

impl Parameter {
    /// The value a dialog field starts out with: the first choice.
    #[must_use]
    pub fn initial_value(&self) -> &str {
        &self.choices[0]
    }

    /// True when there is more than one choice to cycle through.
    #[must_use]
    pub fn is_multi_choice(&self) -> bool {
        self.choices.len() > 1
    }
}

/// A matched placeholder span inside a template.
struct PlaceholderSpan<'a> {
    /// Byte offset of the opening `<`.
    start: usize,
    /// Byte offset one past the closing `>`.
    end: usize,
    name: &'a str,
    default_spec: Option<&'a str>,
}

/// Scans a template for placeholder spans, across embedded newlines.
///
/// A span qualifies when the text between `<` and the next `>` contains no
/// nested `<`, is non-empty, and does not end in whitespace. The whitespace
/// guard keeps heredoc markers like `<<EOF` and stray comparisons like
/// `a < b` from being picked up. Anything that does not qualify is skipped
/// silently; an unterminated bracket is not an error.
fn scan_placeholders(template: &str) -> Vec<PlaceholderSpan<'_>> {
    let mut spans = Vec::new();
    let mut index = 0;

    while let Some(open_offset) = template[index..].find('<') {
        let open = index + open_offset;
        let Some(close_offset) = template[open + 1..].find('>') else {
            break;
        };
        let close = open + 1 + close_offset;
        let inner = &template[open + 1..close];

        if inner.contains('<')
            || inner.trim().is_empty()
            || inner.ends_with(char::is_whitespace)
        {
            // Not a placeholder. Resume one char further in so a later `<`
            // inside this span can still open a valid one.
            index = open + 1;
            continue;
        }

        let (name, default_spec) = match inner.find('=') {
            Some(eq) => (inner[..eq].trim(), Some(&inner[eq + 1..])),
            None => (inner.trim(), None),
        };

        if name.is_empty() {
            index = open + 1;
            continue;
        }

        spans.push(PlaceholderSpan {
            start: open,
            end: close + 1,
            name,
            default_spec,
        });
        index = close + 1;
    }

    spans
}

/// Extracts the ordered parameter list from a template.
///
/// Parameters appear in first-occurrence order of their name. When the same
/// name occurs several times, the default spec of the last occurrence that
/// carries one wins; occurrences without a default never erase an earlier
/// default. An empty result means no interactive resolution is needed.
#[must_use]
pub fn extract_parameters(template: &str) -> Vec<Parameter> {
    let mut defaults: IndexMap<&str, &str> = IndexMap::new();

    for span in scan_placeholders(template) {
        match defaults.entry(span.name) {
            indexmap::map::Entry::Occupied(mut entry) => {
                if let Some(spec) = span.default_spec {
                    *entry.get_mut() = spec;
                }
            }
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(span.default_spec.unwrap_or(""));
            }
        }
    }

    defaults
        .into_iter()
        .map(|(name, spec)| Parameter {
            name: name.to_string(),
            choices: parse_default_spec(spec),
        })
        .collect()
}

/// Substitutes resolved values into a template.
///
/// Every placeholder span is replaced wholesale, delimiters and default spec
/// included. A name absent from `values` substitutes to the empty string, so
/// the output never contains raw placeholder text. A template without
/// placeholders comes back unchanged.
#[must_use]
pub fn substitute(template: &str, values: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut tail = 0;

    for span in scan_placeholders(template) {
        result.push_str(&template[tail..span.start]);
        if let Some(value) = values.get(span.name) {
            result.push_str(value);
        }
        tail = span.end;
    }

    result.push_str(&template[tail..]);
    result
}

/// Parses a default spec into its choice list.
///
/// The canonical multi-choice encoding wraps each option as `|_option_|`,
/// which allows options containing `|` or whitespace. A spec that is not
/// fully wrapped falls back to the legacy plain `a|b|c` split, and a spec
/// without any `|` is a single literal default.
fn parse_default_spec(spec: &str) -> Vec<String> {
    if spec.is_empty() {
        return vec![String::new()];
    }

    if let Some(options) = parse_wrapped_options(spec) {
        return options;
    }

    if spec.contains('|') {
        return spec.split('|').map(str::to_string).collect();
    }

    vec![spec.to_string()]
}

/// Parses a fully delimiter-wrapped choice list, `|_a_||_b_|`.
///
/// Returns `None` unless the whole spec is a sequence of wrapped options, so
/// partially wrapped specs fall through to the legacy split.
fn parse_wrapped_options(spec: &str) -> Option<Vec<String>> {
    let mut rest = spec;
    let mut options = Vec::new();

    while !rest.is_empty() {
        rest = rest.strip_prefix("|_")?;
        let end = rest.find("_|")?;
        options.push(rest[..end].to_string());
        rest = &rest[end + 2..];
    }

    if options.is_empty() {
        None
    } else {
        Some(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_extract_no_placeholders() {
        assert!(extract_parameters("ls -la").is_empty());
        assert!(extract_parameters("").is_empty());
        assert!(extract_parameters("echo 1 > out.txt").is_empty());
    }

    #[test]
    fn test_extract_single_parameter_without_default() {
        let params = extract_parameters("ping <host>");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "host");
        assert_eq!(params[0].choices, vec![String::new()]);
        assert!(!params[0].is_multi_choice());
    }

    #[test]
    fn test_extract_single_parameter_with_default() {
        let params = extract_parameters("curl <host=http://localhost:9200>");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "host");
        assert_eq!(params[0].initial_value(), "http://localhost:9200");
    }

    #[test]
    fn test_extract_preserves_first_occurrence_order() {
        let params = extract_parameters("<b> <a=1> <b=2>");
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        // Last explicit default wins for `b`.
        assert_eq!(params[0].initial_value(), "2");
        assert_eq!(params[1].initial_value(), "1");
    }

    #[test]
    fn test_extract_collapses_repeated_names() {
        let params = extract_parameters("<a=1> <a=2> <a=3>");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "a");
        assert_eq!(params[0].initial_value(), "3");
    }

    #[test]
    fn test_extract_occurrence_without_default_keeps_earlier_default() {
        let params = extract_parameters("<a=1> <a>");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].initial_value(), "1");
    }

    #[test]
    fn test_extract_skips_heredoc_marker() {
        let params = extract_parameters("cat <<EOF > <file=path/to/file>\nEOF");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "file");
        assert_eq!(params[0].initial_value(), "path/to/file");
    }

    #[test]
    fn test_extract_skips_trailing_whitespace_span() {
        // The only candidate span here ends in whitespace before `>`, which
        // the guard rejects.
        assert!(extract_parameters("[ 1 < 2 ] > out.txt").is_empty());
    }

    #[test]
    fn test_extract_scans_across_newlines() {
        let params = extract_parameters("echo <first>\necho <second=two>");
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_extract_unterminated_bracket_is_not_an_error() {
        assert!(extract_parameters("echo <unclosed").is_empty());
        let params = extract_parameters("<done> and <unclosed");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "done");
    }

    #[test]
    fn test_extract_names_appear_in_template() {
        let template = "docker run -p <port=8080>:<port> --name <name> <image=alpine>";
        for param in extract_parameters(template) {
            assert!(template.contains(&format!("<{}", param.name)));
        }
    }

    #[test]
    fn test_extract_plain_pipe_choices() {
        let params = extract_parameters("git checkout <branch=main|develop|release>");
        assert_eq!(params[0].choices, vec!["main", "develop", "release"]);
        assert!(params[0].is_multi_choice());
        assert_eq!(params[0].initial_value(), "main");
    }

    #[test]
    fn test_extract_wrapped_choices() {
        let params = extract_parameters("ssh <target=|_user@web 01_||_user@db|replica_|>");
        assert_eq!(params[0].choices, vec!["user@web 01", "user@db|replica"]);
    }

    #[test]
    fn test_partially_wrapped_spec_falls_back_to_plain_split() {
        let params = extract_parameters("echo <x=|_a_|junk>");
        // Not a clean wrapped list, so it splits on `|` like the legacy form.
        assert_eq!(params[0].choices, vec!["", "_a_", "junk"]);
    }

    #[test]
    fn test_substitute_scenario() {
        let result = substitute(
            "<a=1> <a> <b> hello",
            &values(&[("a", "test"), ("b", "case")]),
        );
        assert_eq!(result, "test test case hello");
    }

    #[test]
    fn test_substitute_replaces_whole_span_including_default() {
        let result = substitute(
            "curl -X POST \"<host=http://localhost:9200>/<index>\"",
            &values(&[("host", "localhost:9200"), ("index", "test")]),
        );
        assert_eq!(result, "curl -X POST \"localhost:9200/test\"");
    }

    #[test]
    fn test_substitute_missing_value_becomes_empty() {
        let result = substitute("echo <present> <absent>", &values(&[("present", "hi")]));
        assert_eq!(result, "echo hi ");
    }

    #[test]
    fn test_substitute_without_placeholders_is_identity() {
        let template = "cat <<EOF\nline one\nEOF";
        assert_eq!(substitute(template, &HashMap::new()), template);
    }

    #[test]
    fn test_substitute_is_idempotent() {
        let template = "scp <file> <host=web01>:<file>";
        let filled = values(&[("file", "a.txt"), ("host", "db02")]);
        let once = substitute(template, &filled);
        let twice = substitute(&once, &filled);
        assert_eq!(once, "scp a.txt db02:a.txt");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_substitute_multiline_template() {
        let result = substitute(
            "export NAME=<name=dev>\necho $NAME <name>",
            &values(&[("name", "prod")]),
        );
        assert_eq!(result, "export NAME=prod\necho $NAME prod");
    }

    #[test]
    fn test_nested_open_bracket_recovers_inner_placeholder() {
        let params = extract_parameters("a <junk <real=1> b");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "real");
    }

    #[test]
    fn test_parse_default_spec_single_literal() {
        assert_eq!(parse_default_spec("value"), vec!["value"]);
        assert_eq!(parse_default_spec(""), vec![String::new()]);
    }

    #[test]
    fn test_parse_wrapped_options_rejects_garbage() {
        assert!(parse_wrapped_options("plain").is_none());
        assert!(parse_wrapped_options("|_open").is_none());
        assert_eq!(
            parse_wrapped_options("|_one_||_two_|"),
            Some(vec!["one".to_string(), "two".to_string()])
        );
    }
}
