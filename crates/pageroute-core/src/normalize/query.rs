//! Query string decoding.

/// Decodes an `application/x-www-form-urlencoded` query string into pairs.
/// A leading `?` is tolerated.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
