//! Shell-style wildcard patterns over virtual paths.
//!
//! `*` matches any run of characters within one path segment, `?` a single
//! character, and `[...]` / `[!...]` a character class. Wildcards never match
//! `/`, so `dir/*` lists the direct children of `dir` only.

use regex::Regex;

/// Translate a wildcard pattern into an anchored regular expression.
pub fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("^(?:");
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push('[');
                    let mut j = i + 1;
                    if chars[j] == '!' {
                        out.push('^');
                        j += 1;
                    }
                    for &c in &chars[j..end] {
                        if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
                            out.push('\\');
                        }
                        out.push(c);
                    }
                    out.push(']');
                    i = end;
                }
                None => out.push_str(r"\["),
            },
            c => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
        i += 1;
    }
    out.push_str(")$");
    out
}

// Index of the `]` closing the class opened at `start`. A `]` right after the
// opening bracket (or after `!`) is a literal member.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}

pub fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&translate(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, path: &str) -> bool {
        compile(pattern).unwrap().is_match(path)
    }

    #[test]
    fn test_star_stays_within_segment() {
        assert!(matches("*", "h1"));
        assert!(!matches("*", "dir/h1"));
        assert!(matches("dir/*", "dir/h1"));
        assert!(!matches("dir/*", "dir/sub/h1"));
        assert!(matches("*/h1", "dir/h1"));
    }

    #[test]
    fn test_question_mark_and_literals() {
        assert!(matches("h?", "h1"));
        assert!(!matches("h?", "h12"));
        assert!(matches("a.b", "a.b"));
        assert!(!matches("a.b", "axb"));
        assert!(matches("h+(x)", "h+(x)"));
    }

    #[test]
    fn test_character_classes() {
        assert!(matches("h[12]", "h1"));
        assert!(!matches("h[12]", "h3"));
        assert!(matches("h[!12]", "h3"));
        assert!(matches("h[]]", "h]"));
        assert!(matches("h[", "h["));
    }

    #[test]
    fn test_translation_is_anchored() {
        assert_eq!(translate("a*"), "^(?:a[^/]*)$");
        assert!(!matches("pt", "pt_eta"));
    }
}
