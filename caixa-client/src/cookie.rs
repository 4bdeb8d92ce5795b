//! Cookie string lookup
//!
//! Reads a named value out of a `Cookie` header style string, the way the
//! back office expects the CSRF token to be picked up.

use parking_lot::RwLock;

use crate::collaborators::CsrfTokenProvider;

/// Find `name` in a `k1=v1; k2=v2` string. First match wins.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Cookie store holding the raw cookie string of the session
#[derive(Debug)]
pub struct CookieJar {
    cookies: RwLock<String>,
    token_name: String,
}

impl CookieJar {
    pub fn new(cookies: impl Into<String>, token_name: impl Into<String>) -> Self {
        Self {
            cookies: RwLock::new(cookies.into()),
            token_name: token_name.into(),
        }
    }

    /// Replace the cookie string (e.g. after the server rotated the token)
    pub fn set(&self, cookies: impl Into<String>) {
        *self.cookies.write() = cookies.into();
    }

    pub fn get(&self, name: &str) -> Option<String> {
        cookie_value(&self.cookies.read(), name)
    }
}

impl CsrfTokenProvider for CookieJar {
    fn csrf_token(&self) -> Option<String> {
        self.get(&self.token_name).filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_token_among_cookies() {
        let jar = CookieJar::new("sessionid=abc; csrftoken=Tk9x; theme=dark", "csrftoken");
        assert_eq!(jar.csrf_token().as_deref(), Some("Tk9x"));
        assert_eq!(jar.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_missing_or_empty_token() {
        let jar = CookieJar::new("sessionid=abc", "csrftoken");
        assert!(jar.csrf_token().is_none());

        jar.set("csrftoken=");
        assert!(jar.csrf_token().is_none());

        jar.set("csrftoken=new");
        assert_eq!(jar.csrf_token().as_deref(), Some("new"));
    }

    #[test]
    fn test_prefix_names_do_not_match() {
        assert_eq!(cookie_value("xcsrftoken=1; csrftoken=2", "csrftoken").as_deref(), Some("2"));
        assert!(cookie_value("", "csrftoken").is_none());
    }

    #[test]
    fn test_value_may_contain_equals() {
        assert_eq!(cookie_value("data=a=b", "data").as_deref(), Some("a=b"));
    }
}
