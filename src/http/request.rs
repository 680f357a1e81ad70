//! Request helpers: session cookie, page origin and query parameters

use axum::http::{
    HeaderMap, HeaderValue, Uri,
    header::{COOKIE, HOST, InvalidHeaderValue},
};

use crate::constants::http::{DEFAULT_SCHEME, FORWARDED_PROTO, SESSION_COOKIE};
use crate::session::SessionId;

/// Session id from the `Cookie` header(s), if present and well-formed
pub fn session_cookie(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// `Set-Cookie` value for a new session. No `Max-Age`/`Expires`, so the
/// browser drops it when the browser session ends.
pub fn session_cookie_header(id: SessionId) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::try_from(format!(
        "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax"
    ))
}

/// Origin (`scheme://host[:port]`) the browser used to reach us.
/// Empty when the request names no host; links then stay relative.
pub fn detect_origin(headers: &HeaderMap, uri: &Uri) -> String {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty() && !h.contains(char::is_whitespace))
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()));

    let Some(host) = host else {
        return String::new();
    };

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| matches!(*s, "http" | "https"))
        .or_else(|| uri.scheme_str())
        .unwrap_or(DEFAULT_SCHEME);

    format!("{scheme}://{host}")
}

/// Validate an operator-supplied origin: http(s), printable ASCII without
/// whitespace, trailing slashes trimmed. Paths are rejected, since the
/// forms post to root-relative endpoints.
pub fn normalize_origin(raw: &str) -> Option<String> {
    let origin = raw.trim().trim_end_matches('/');
    let rest = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))?;

    let valid = !rest.is_empty()
        && !rest.contains('/')
        && origin
            .chars()
            .all(|c| c.is_ascii_graphic() && !matches!(c, '?' | '#' | '"' | '<' | '>'));
    valid.then(|| origin.to_string())
}

/// First value of `name` in decoded query pairs
pub fn first_param<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_session_cookie_found_among_others() {
        let id = SessionId::generate();
        let cookie = format!("theme=dark; kiosk_session={id}; lang=en");
        assert_eq!(session_cookie(&headers(&[("cookie", cookie.as_str())])), Some(id));
    }

    #[test]
    fn test_session_cookie_across_headers() {
        let id = SessionId::generate();
        let cookie = format!("kiosk_session={id}");
        let map = headers(&[("cookie", "theme=dark"), ("cookie", cookie.as_str())]);
        assert_eq!(session_cookie(&map), Some(id));
    }

    #[test]
    fn test_session_cookie_missing_or_malformed() {
        assert_eq!(session_cookie(&HeaderMap::new()), None);
        assert_eq!(session_cookie(&headers(&[("cookie", "kiosk_session=garbage")])), None);
        assert_eq!(session_cookie(&headers(&[("cookie", "other=1")])), None);
    }

    #[test]
    fn test_session_cookie_header() {
        let id = SessionId::generate();
        let value = session_cookie_header(id).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with(&format!("kiosk_session={id};")));
        assert!(value.contains("HttpOnly"));
        assert!(!value.contains("Max-Age"));
    }

    #[test]
    fn test_detect_origin_from_host() {
        let map = headers(&[("host", "kiosk.local:8501")]);
        assert_eq!(detect_origin(&map, &Uri::from_static("/")), "http://kiosk.local:8501");
    }

    #[test]
    fn test_detect_origin_behind_tls_proxy() {
        let map = headers(&[("host", "kiosk.example.com"), ("x-forwarded-proto", "https")]);
        assert_eq!(detect_origin(&map, &Uri::from_static("/")), "https://kiosk.example.com");
    }

    #[test]
    fn test_detect_origin_ignores_bogus_proto() {
        let map = headers(&[("host", "kiosk.local"), ("x-forwarded-proto", "gopher")]);
        assert_eq!(detect_origin(&map, &Uri::from_static("/")), "http://kiosk.local");
    }

    #[test]
    fn test_detect_origin_from_absolute_uri() {
        let uri = Uri::from_static("https://kiosk.local/?code=A");
        assert_eq!(detect_origin(&HeaderMap::new(), &uri), "https://kiosk.local");
    }

    #[test]
    fn test_detect_origin_without_host() {
        assert_eq!(detect_origin(&HeaderMap::new(), &Uri::from_static("/")), "");
    }

    #[test]
    fn test_normalize_origin() {
        assert_eq!(
            normalize_origin("https://kiosk.example.com/"),
            Some("https://kiosk.example.com".to_string())
        );
        assert_eq!(
            normalize_origin(" http://10.0.0.5:8501 "),
            Some("http://10.0.0.5:8501".to_string())
        );
        assert_eq!(normalize_origin("https://example.com/kiosk"), None);
        assert_eq!(normalize_origin("https://example.com/kiosk/"), None);
        assert_eq!(normalize_origin("kiosk.local"), None);
        assert_eq!(normalize_origin("http://"), None);
        assert_eq!(normalize_origin("http://kiosk local"), None);
        assert_eq!(normalize_origin("http://kiosk.local?x=1"), None);
        assert_eq!(normalize_origin("http://kïosk.local"), None);
    }

    #[test]
    fn test_first_param() {
        let pairs = vec![
            ("other".to_string(), "1".to_string()),
            ("code".to_string(), "A".to_string()),
            ("code".to_string(), "B".to_string()),
        ];
        assert_eq!(first_param(&pairs, "code"), Some("A"));
        assert_eq!(first_param(&pairs, "missing"), None);
    }
}
