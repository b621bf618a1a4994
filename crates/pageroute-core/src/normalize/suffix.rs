//! Known-suffix stripping (`.html`, `.php`, `.html.<lang>`).

/// Removes the longest known suffix from `path`.
///
/// Composite `<suffix>.<language>` forms are tried first and report the
/// language. A suffix equal to the whole path is left alone so `.html` never
/// normalizes to the root.
pub fn strip_known_suffix<'a>(
    path: &'a str,
    suffixes: &[String],
    languages: &[String],
) -> (&'a str, Option<String>) {
    let mut best: Option<(usize, Option<&String>)> = None;
    for suffix in suffixes.iter().filter(|s| !s.is_empty()) {
        for lang in languages {
            let len = suffix.len() + 1 + lang.len();
            if path.len() > len
                && path.ends_with(lang.as_str())
                && path[..path.len() - lang.len()].ends_with('.')
                && path[..path.len() - lang.len() - 1].ends_with(suffix.as_str())
                && best.map_or(true, |(l, _)| len > l)
            {
                best = Some((len, Some(lang)));
            }
        }
        if path.len() > suffix.len()
            && path.ends_with(suffix.as_str())
            && best.map_or(true, |(l, _)| suffix.len() > l)
        {
            best = Some((suffix.len(), None));
        }
    }

    match best {
        Some((len, lang)) => (&path[..path.len() - len], lang.cloned()),
        None => (path, None),
    }
}
