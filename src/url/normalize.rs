use crate::{UrlError, UrlResult};

/// Resolves a possibly-relative link against a site origin
///
/// # Resolution Rules
///
/// 1. A candidate that already starts with `http` (any case) is returned as-is
/// 2. Otherwise one trailing `/` is stripped from the origin
/// 3. One leading `/` is stripped from the candidate
/// 4. The two halves are joined with a single `/`
///
/// Nothing else is touched: percent-encoding, dot segments and repeated
/// slashes inside the candidate survive unchanged.
///
/// # Arguments
///
/// * `candidate` - The href found on a page
/// * `origin` - The site the href should be resolved against
///
/// # Returns
///
/// * `Ok(String)` - The absolute URL
/// * `Err(UrlError::EmptyOrigin)` - A relative candidate had nothing to resolve against
///
/// # Examples
///
/// ```
/// use school_harvest::url::normalize;
///
/// let url = normalize("/apps/staff", "https://school.example/").unwrap();
/// assert_eq!(url, "https://school.example/apps/staff");
/// ```
pub fn normalize(candidate: &str, origin: &str) -> UrlResult<String> {
    if has_http_scheme(candidate) {
        return Ok(candidate.to_string());
    }

    if origin.is_empty() {
        return Err(UrlError::EmptyOrigin(candidate.to_string()));
    }

    let origin = origin.strip_suffix('/').unwrap_or(origin);
    let path = candidate.strip_prefix('/').unwrap_or(candidate);

    Ok(format!("{}/{}", origin, path))
}

/// Checks for an `http`/`https` prefix without allocating
fn has_http_scheme(candidate: &str) -> bool {
    candidate
        .get(..4)
        .map(|prefix| prefix.eq_ignore_ascii_case("http"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_and_trailing_slash_forms_agree() {
        let a = normalize("foo/bar", "http://x.com/").unwrap();
        let b = normalize("/foo/bar", "http://x.com").unwrap();
        assert_eq!(a, "http://x.com/foo/bar");
        assert_eq!(a, b);
    }

    #[test]
    fn test_absolute_link_unchanged() {
        let result = normalize("https://other.com/staff", "https://school.org").unwrap();
        assert_eq!(result, "https://other.com/staff");
    }

    #[test]
    fn test_uppercase_scheme_unchanged() {
        let result = normalize("HTTP://Other.com/Staff", "https://school.org").unwrap();
        assert_eq!(result, "HTTP://Other.com/Staff");
    }

    #[test]
    fn test_absolute_link_with_empty_origin() {
        let result = normalize("https://other.com/staff", "").unwrap();
        assert_eq!(result, "https://other.com/staff");
    }

    #[test]
    fn test_only_one_slash_stripped() {
        let result = normalize("//staff", "https://school.org//").unwrap();
        assert_eq!(result, "https://school.org///staff");
    }

    #[test]
    fn test_no_path_collapsing() {
        let result = normalize("a/../b/./c", "https://school.org").unwrap();
        assert_eq!(result, "https://school.org/a/../b/./c");
    }

    #[test]
    fn test_no_double_encoding() {
        let result = normalize("/Staff%20Directory?q=a&b=c", "https://school.org").unwrap();
        assert_eq!(result, "https://school.org/Staff%20Directory?q=a&b=c");
    }

    #[test]
    fn test_origin_with_path() {
        let result = normalize("staff", "https://school.org/district/").unwrap();
        assert_eq!(result, "https://school.org/district/staff");
    }

    #[test]
    fn test_empty_origin_is_error() {
        let result = normalize("/staff", "");
        assert_eq!(result, Err(UrlError::EmptyOrigin("/staff".to_string())));
    }

    #[test]
    fn test_short_relative_link() {
        let result = normalize("a", "https://school.org").unwrap();
        assert_eq!(result, "https://school.org/a");
    }
}
