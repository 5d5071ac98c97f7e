//! JSON pretty-printer and minifier.
//!
//! The document is validated by serde_json and then re-laid out token by
//! token, so keys keep their source order and number literals are copied
//! exactly as written (`1.0`, `1e400`, 30-digit integers).

use serde::de::IgnoredAny;

use super::error::TransformError;

const INDENT: &str = "  ";

/// Reject anything that is not a single well-formed JSON document.
fn validate(text: &str) -> Result<(), TransformError> {
    serde_json::from_str::<IgnoredAny>(text)
        .map(|_| ())
        .map_err(|e| TransformError::invalid_json(e.to_string()))
}

/// Re-serialize `text` with 2-space indentation.
pub fn format(text: &str) -> Result<String, TransformError> {
    validate(text)?;
    Ok(relayout(text, true))
}

/// Re-serialize `text` without any insignificant whitespace.
pub fn minify(text: &str) -> Result<String, TransformError> {
    validate(text)?;
    Ok(relayout(text, false))
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Lay out an already validated document. String contents and scalar
/// tokens are copied verbatim; only whitespace between tokens changes.
fn relayout(text: &str, pretty: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => {
                out.push(c);
                i += 1;
                while i < chars.len() {
                    let s = chars[i];
                    out.push(s);
                    i += 1;
                    match s {
                        '\\' => {
                            if let Some(&escaped) = chars.get(i) {
                                out.push(escaped);
                                i += 1;
                            }
                        }
                        '"' => break,
                        _ => {}
                    }
                }
                continue;
            }
            ' ' | '\t' | '\n' | '\r' => {}
            '{' | '[' => {
                let close = if c == '{' { '}' } else { ']' };
                let mut next = i + 1;
                while chars.get(next).is_some_and(|n| n.is_ascii_whitespace()) {
                    next += 1;
                }
                out.push(c);
                if chars.get(next) == Some(&close) {
                    out.push(close);
                    i = next;
                } else {
                    depth += 1;
                    if pretty {
                        newline(&mut out, depth);
                    }
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if pretty {
                    newline(&mut out, depth);
                }
                out.push(c);
            }
            ',' => {
                out.push(c);
                if pretty {
                    newline(&mut out, depth);
                }
            }
            ':' => {
                out.push(c);
                if pretty {
                    out.push(' ');
                }
            }
            _ => out.push(c),
        }
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_simple() {
        assert_eq!(format(r#"{"foo":"bar"}"#).unwrap(), "{\n  \"foo\": \"bar\"\n}");
    }

    #[test]
    fn test_format_preserves_key_order() {
        let out = format(r#"{"zeta":1,"alpha":{"y":true,"b":null},"mid":[1,2]}"#).unwrap();
        let zeta = out.find("zeta").unwrap();
        let alpha = out.find("alpha").unwrap();
        let mid = out.find("mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
        assert!(out.find("\"y\"").unwrap() < out.find("\"b\"").unwrap());
    }

    #[test]
    fn test_format_nested_indentation() {
        let out = format(r#"{"a":[1,{"b":2}]}"#).unwrap();
        assert_eq!(out, "{\n  \"a\": [\n    1,\n    {\n      \"b\": 2\n    }\n  ]\n}");
    }

    #[test]
    fn test_format_scalar_document() {
        assert_eq!(format(" 42 ").unwrap(), "42");
        assert_eq!(format("\"text\"").unwrap(), "\"text\"");
    }

    #[test]
    fn test_format_invalid() {
        assert!(matches!(format("{foo:bar}"), Err(TransformError::InvalidJson(_))));
        assert!(matches!(format(""), Err(TransformError::InvalidJson(_))));
        assert!(matches!(format(r#"{"a":1"#), Err(TransformError::InvalidJson(_))));
    }

    #[test]
    fn test_minify() {
        assert_eq!(minify("{\n  \"hello\": \"world\",\n  \"n\": [1, 2]\n}").unwrap(), r#"{"hello":"world","n":[1,2]}"#);
        assert!(minify("[1,").is_err());
    }

    #[test]
    fn test_number_literals_kept_verbatim() {
        let out = format("[1.0, 0.1e1, 100000000000000000000000, 123456789012345678901234567890]").unwrap();
        assert_eq!(
            out,
            "[\n  1.0,\n  0.1e1,\n  100000000000000000000000,\n  123456789012345678901234567890\n]"
        );
        assert_eq!(format("[1e400]").unwrap(), "[\n  1e400\n]");
        assert_eq!(minify("{ \"n\" : -0.50E+3 }").unwrap(), r#"{"n":-0.50E+3}"#);
    }

    #[test]
    fn test_strings_copied_verbatim() {
        let out = minify(r#"[ "a, b: {c}", "quote \" and \\", "\u00e9" ]"#).unwrap();
        assert_eq!(out, r#"["a, b: {c}","quote \" and \\","\u00e9"]"#);
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(format("{ }").unwrap(), "{}");
        assert_eq!(format(r#"{"a": [ ], "b": {}}"#).unwrap(), "{\n  \"a\": [],\n  \"b\": {}\n}");
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!(matches!(format("[1] x"), Err(TransformError::InvalidJson(_))));
        assert!(matches!(format("[01]"), Err(TransformError::InvalidJson(_))));
    }
}
