//! Pure fragment generation for the three redirect phases.

use crate::matcher::WILDCARD;
use crate::normalize::NormalizedPath;

const SEPARATORS: [char; 3] = ['/', '-', '.'];

/// A pattern to try plus the text its wildcard would stand for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub pattern: String,
    pub cut: String,
}

/// Cut separators are kept in the accumulated text, except `-` which becomes `/`.
fn normalize_separator(sep: char) -> char {
    if sep == '-' {
        '/'
    } else {
        sep
    }
}

/// Literal fragments for the exact phase, most literal first.
///
/// A language part of the stripped suffix (`.html.en`) is re-stripped before
/// the requested `language` is appended, so `/about.html.en?lang=de` tries
/// `/about.html.de` and never `/about.html.en.de`.
pub fn exact_fragments(path: &NormalizedPath, language: Option<&str>) -> Vec<String> {
    let mut out = Vec::new();
    let mut push = |fragment: String| {
        if !out.contains(&fragment) {
            out.push(fragment);
        }
    };
    push(format!("/{}", path.original));
    push(format!("/{}", path.key));

    let suffix = path.suffix();
    let plain_suffix = path
        .suffix_language
        .as_deref()
        .and_then(|lang| suffix.strip_suffix(lang))
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(suffix);
    let base = format!("{}{plain_suffix}", path.key);
    if path.suffix_language.is_some() {
        push(format!("/{base}"));
    }
    if let Some(lang) = language.filter(|l| !l.is_empty()) {
        if !base.is_empty() {
            push(format!("/{base}.{lang}"));
        }
    }
    out
}

/// `prefix*` steps: strip from the right at the furthest-right separator.
pub fn suffix_steps(path: &str) -> Vec<Step> {
    let mut out = Vec::new();
    let mut rest = path;
    let mut cut = String::new();
    let mut pending: Option<char> = None;
    while let Some(idx) = rest.rfind(SEPARATORS) {
        let sep = rest[idx..].chars().next().unwrap_or('/');
        let piece = &rest[idx + sep.len_utf8()..];
        cut = match pending {
            Some(prev) => format!("{piece}{}{cut}", normalize_separator(prev)),
            None => piece.to_string(),
        };
        pending = Some(sep);
        out.push(Step {
            pattern: format!("{}{WILDCARD}", &rest[..idx + sep.len_utf8()]),
            cut: cut.clone(),
        });
        if idx == 0 {
            break;
        }
        rest = &rest[..idx];
    }
    out
}

/// `*suffix` steps: strip from the left at the first separator after the leading `/`.
pub fn prefix_steps(path: &str) -> Vec<Step> {
    let mut out = Vec::new();
    let mut body = path.strip_prefix('/').unwrap_or(path);
    let mut cut = String::new();
    let mut pending: Option<char> = None;
    while let Some(idx) = body.find(SEPARATORS) {
        let sep = body[idx..].chars().next().unwrap_or('/');
        let piece = &body[..idx];
        cut = match pending {
            Some(prev) => format!("{cut}{}{piece}", normalize_separator(prev)),
            None => piece.to_string(),
        };
        pending = Some(sep);
        out.push(Step {
            pattern: format!("{WILDCARD}{}", &body[idx..]),
            cut: cut.clone(),
        });
        body = &body[idx + sep.len_utf8()..];
    }
    out
}

/// Splices `cut` into a target that begins or ends with the wildcard marker.
/// Targets without a marker are returned unchanged.
pub fn splice(target: &str, cut: &str) -> String {
    if let Some(head) = target.strip_suffix(WILDCARD) {
        let cut = if head.ends_with('/') {
            cut.trim_start_matches('/')
        } else {
            cut
        };
        return format!("{head}{cut}");
    }
    if let Some(tail) = target.strip_prefix(WILDCARD) {
        let cut = cut.trim_start_matches('/');
        if cut.is_empty() {
            return if tail.starts_with('/') {
                tail.to_string()
            } else {
                format!("/{tail}")
            };
        }
        return format!("/{cut}{tail}");
    }
    target.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_path;

    fn pairs(steps: &[Step]) -> Vec<(&str, &str)> {
        steps
            .iter()
            .map(|s| (s.pattern.as_str(), s.cut.as_str()))
            .collect()
    }

    fn norm(raw: &str) -> NormalizedPath {
        normalize_path(
            raw,
            None,
            &[".html".to_string()],
            &["en".to_string(), "de".to_string()],
        )
    }

    #[test]
    fn exact_with_language_variant() {
        assert_eq!(
            exact_fragments(&norm("/about.html"), Some("de")),
            vec!["/about.html", "/about", "/about.html.de"]
        );
        assert_eq!(exact_fragments(&norm("/about"), None), vec!["/about"]);
        assert_eq!(exact_fragments(&norm("/"), Some("de")), vec!["/"]);
    }

    #[test]
    fn exact_language_suffix_restripped() {
        assert_eq!(
            exact_fragments(&norm("/about.html.en"), Some("de")),
            vec!["/about.html.en", "/about", "/about.html", "/about.html.de"]
        );
        assert_eq!(
            exact_fragments(&norm("/about.html.de"), None),
            vec!["/about.html.de", "/about", "/about.html"]
        );
    }

    #[test]
    fn suffix_steps_mixed_separators() {
        let steps = suffix_steps("/blog/a-b");
        assert_eq!(
            pairs(&steps),
            vec![
                ("/blog/a-*", "b"),
                ("/blog/*", "a/b"),
                ("/*", "blog/a/b"),
            ]
        );
    }

    #[test]
    fn suffix_steps_keep_dots() {
        let steps = suffix_steps("/doc/file.pdf");
        assert_eq!(
            pairs(&steps),
            vec![
                ("/doc/file.*", "pdf"),
                ("/doc/*", "file.pdf"),
                ("/*", "doc/file.pdf"),
            ]
        );
    }

    #[test]
    fn prefix_steps_symmetric() {
        let steps = prefix_steps("/de/old-page");
        assert_eq!(
            pairs(&steps),
            vec![("*/old-page", "de"), ("*-page", "de/old")]
        );
    }

    #[test]
    fn no_separator_no_steps() {
        assert!(prefix_steps("/single").is_empty());
        assert_eq!(pairs(&suffix_steps("/single")), vec![("/*", "single")]);
        assert!(suffix_steps("").is_empty());
    }

    #[test]
    fn splice_positions() {
        assert_eq!(splice("/news/*", "a/b"), "/news/a/b");
        assert_eq!(splice("/news-*", "a"), "/news-a");
        assert_eq!(splice("*/new-page", "de"), "/de/new-page");
        assert_eq!(splice("/fixed", "ignored"), "/fixed");
        assert_eq!(splice("/news/*", ""), "/news/");
        assert_eq!(splice("*/x", ""), "/x");
    }
}
