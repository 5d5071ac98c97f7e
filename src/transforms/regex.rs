//! Regex tester and pattern explainer.

use regex::RegexBuilder;
use serde::Serialize;

use super::error::TransformError;

/// One match of a pattern in the sample text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegexMatch {
    /// The matched text.
    pub text: String,
    /// Character (not byte) offset of the match in the sample.
    pub index: usize,
}

/// One fragment of a pattern and what it means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternToken {
    pub token: String,
    pub meaning: String,
}

impl PatternToken {
    fn new(token: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            meaning: meaning.into(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RegexFlags {
    global: bool,
    case_insensitive: bool,
    multi_line: bool,
    dot_all: bool,
    ignore_whitespace: bool,
}

impl RegexFlags {
    fn parse(flags: &str) -> Result<Self, TransformError> {
        let mut parsed = Self::default();
        let mut seen = Vec::new();
        for flag in flags.trim().chars() {
            if seen.contains(&flag) {
                return Err(TransformError::invalid_pattern(format!(
                    "Duplicate flag '{}'",
                    flag
                )));
            }
            seen.push(flag);
            match flag {
                'g' => parsed.global = true,
                'i' => parsed.case_insensitive = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_all = true,
                'x' => parsed.ignore_whitespace = true,
                // Unicode matching is always on.
                'u' => {}
                other => {
                    return Err(TransformError::invalid_pattern(format!(
                        "Unsupported flag '{}'",
                        other
                    )));
                }
            }
        }
        Ok(parsed)
    }
}

/// Run `pattern` with `flags` over `sample`.
///
/// Without the `g` flag only the first match is returned. Matches are in
/// left-to-right order.
pub fn test(pattern: &str, flags: &str, sample: &str) -> Result<Vec<RegexMatch>, TransformError> {
    let flags = RegexFlags::parse(flags)?;
    let re = RegexBuilder::new(pattern)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_all)
        .ignore_whitespace(flags.ignore_whitespace)
        .build()
        .map_err(|e| TransformError::invalid_pattern(e.to_string()))?;

    let limit = if flags.global { usize::MAX } else { 1 };
    let mut matches = Vec::new();
    let mut byte_cursor = 0;
    let mut char_cursor = 0;

    for m in re.find_iter(sample).take(limit) {
        char_cursor += sample[byte_cursor..m.start()].chars().count();
        byte_cursor = m.start();
        matches.push(RegexMatch {
            text: m.as_str().to_string(),
            index: char_cursor,
        });
    }

    Ok(matches)
}

/// Break `pattern` into recognized fragments, left to right.
///
/// Runs of characters with no special meaning are grouped into a single
/// literal token.
pub fn explain(pattern: &str) -> Vec<PatternToken> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        match scan_token(&chars, i) {
            Some((len, meaning)) => {
                flush_literal(&mut literal, &mut tokens);
                let token: String = chars[i..i + len].iter().collect();
                tokens.push(PatternToken::new(token, meaning));
                i += len;
            }
            None => {
                literal.push(chars[i]);
                i += 1;
            }
        }
    }
    flush_literal(&mut literal, &mut tokens);

    tokens
}

/// Render an explanation as text, one `↳ token → meaning` line per fragment.
pub fn render_explanation(pattern: &str, tokens: &[PatternToken]) -> String {
    let mut out = format!("Regex: /{}/", pattern);
    for t in tokens {
        out.push_str(&format!("\n↳ {} → {}", t.token, t.meaning));
    }
    out
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<PatternToken>) {
    if !literal.is_empty() {
        let text = std::mem::take(literal);
        let meaning = format!("Literal \"{}\"", text);
        tokens.push(PatternToken::new(text, meaning));
    }
}

/// Length (in chars) and meaning of the token starting at `i`, if any.
fn scan_token(chars: &[char], i: usize) -> Option<(usize, String)> {
    let (len, meaning) = match chars[i] {
        '\\' => scan_escape(chars, i)?,
        '[' => scan_class(chars, i)?,
        '(' => scan_group_open(chars, i),
        ')' => (1, "End of group".to_string()),
        '{' => scan_counted(chars, i)?,
        '*' => (1, "Quantifier: zero or more times".to_string()),
        '+' => (1, "Quantifier: one or more times".to_string()),
        '?' => (1, "Quantifier: optional (zero or one time)".to_string()),
        '^' => (1, "Start of string (or line with the m flag)".to_string()),
        '$' => (1, "End of string (or line with the m flag)".to_string()),
        '.' => (1, "Any character except newline".to_string()),
        '|' => (1, "Alternation (or)".to_string()),
        _ => return None,
    };

    // A quantifier directly followed by '?' is lazy.
    let is_quantifier = matches!(chars[i], '*' | '+' | '?' | '{');
    if is_quantifier && chars.get(i + len) == Some(&'?') {
        return Some((len + 1, format!("{} (lazy)", meaning)));
    }
    Some((len, meaning))
}

fn scan_escape(chars: &[char], i: usize) -> Option<(usize, String)> {
    let c = *chars.get(i + 1)?;
    let meaning = match c {
        'd' => "Any digit".to_string(),
        'D' => "Any non-digit".to_string(),
        'w' => "Any word character (letter, digit, underscore)".to_string(),
        'W' => "Any non-word character".to_string(),
        's' => "Any whitespace".to_string(),
        'S' => "Any non-whitespace".to_string(),
        'b' => "Word boundary".to_string(),
        'B' => "Non-word boundary".to_string(),
        'n' => "Newline".to_string(),
        't' => "Tab".to_string(),
        'r' => "Carriage return".to_string(),
        '1'..='9' => format!("Backreference to group {}", c),
        other => format!("Escaped literal '{}'", other),
    };
    Some((2, meaning))
}

fn scan_class(chars: &[char], i: usize) -> Option<(usize, String)> {
    let mut j = i + 1;
    let negated = chars.get(j) == Some(&'^');
    if negated {
        j += 1;
    }
    let body_start = j;
    // A ']' right after the opening bracket is part of the set.
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() {
        match chars[j] {
            '\\' => j += 2,
            ']' => {
                let body: String = chars[body_start..j].iter().collect();
                let meaning = if negated {
                    format!("Any character not in the set \"{}\"", body)
                } else {
                    format!("Any one character in the set \"{}\"", body)
                };
                return Some((j - i + 1, meaning));
            }
            _ => j += 1,
        }
    }
    None
}

fn scan_group_open(chars: &[char], i: usize) -> (usize, String) {
    let rest: String = chars[i..chars.len().min(i + 4)].iter().collect();
    if rest.starts_with("(?:") {
        return (3, "Start of non-capturing group".to_string());
    }
    if rest.starts_with("(?=") {
        return (3, "Start of lookahead".to_string());
    }
    if rest.starts_with("(?!") {
        return (3, "Start of negative lookahead".to_string());
    }
    if rest.starts_with("(?<=") {
        return (4, "Start of lookbehind".to_string());
    }
    if rest.starts_with("(?<!") {
        return (4, "Start of negative lookbehind".to_string());
    }

    let name_start = if rest.starts_with("(?<") {
        Some(i + 3)
    } else if rest.starts_with("(?P<") {
        Some(i + 4)
    } else {
        None
    };
    if let Some(start) = name_start {
        if let Some(offset) = chars[start..].iter().position(|c| *c == '>') {
            let name: String = chars[start..start + offset].iter().collect();
            return (
                start + offset + 1 - i,
                format!("Start of named capturing group '{}'", name),
            );
        }
    }

    (1, "Start of capturing group".to_string())
}

fn scan_counted(chars: &[char], i: usize) -> Option<(usize, String)> {
    let close = chars[i..].iter().position(|c| *c == '}')? + i;
    let body: String = chars[i + 1..close].iter().collect();
    let (min, max) = match body.split_once(',') {
        Some((min, max)) => (min, Some(max)),
        None => (body.as_str(), None),
    };
    let min: u32 = min.parse().ok()?;
    let meaning = match max {
        None => format!("Quantifier: exactly {} times", min),
        Some("") => format!("Quantifier: {} or more times", min),
        Some(max) => {
            let max: u32 = max.parse().ok()?;
            format!("Quantifier: between {} and {} times", min, max)
        }
    };
    Some((close - i + 1, meaning))
}
