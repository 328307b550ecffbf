//! Request-level access gates.
//!
//! Both gates are pure decisions over the request and the static
//! configuration, evaluated before anything touches the filesystem.

use crate::config::Credentials;
use crate::response;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use dav_server::body::Body;
use hyper::header::{HeaderMap, HeaderValue, AUTHORIZATION, WWW_AUTHENTICATE};
use hyper::{Method, Response, StatusCode};

const BASIC_CHALLENGE: &str = r#"Basic realm="Restricted""#;

/// Methods rejected in read-only mode.
pub const WRITE_METHODS: [&str; 6] = ["PUT", "DELETE", "PROPPATCH", "MKCOL", "COPY", "MOVE"];

/// Verdict of an access gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Continue handling the request.
    Allow,
    /// Reject with 401. `challenge` is set when no usable credentials were sent.
    Unauthenticated { challenge: bool },
    /// Reject with 403.
    Forbidden,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    /// The response that ends the request, or `None` when allowed.
    pub fn into_response(self) -> Option<Response<Body>> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::Unauthenticated { challenge: true } => {
                let mut res = response::empty(StatusCode::UNAUTHORIZED);
                res.headers_mut()
                    .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE));
                Some(res)
            }
            AccessDecision::Unauthenticated { challenge: false } => Some(response::plain(
                StatusCode::UNAUTHORIZED,
                "WebDAV: need authorized!",
            )),
            AccessDecision::Forbidden => Some(response::plain(
                StatusCode::FORBIDDEN,
                "WebDAV: Read Only!!!",
            )),
        }
    }
}

/// HTTP Basic authentication gate.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Option<Credentials>,
}

impl Authenticator {
    /// Create a gate. `None` allows anonymous access.
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self { credentials }
    }

    /// Check the request's `Authorization` header.
    pub fn check(&self, headers: &HeaderMap) -> AccessDecision {
        let Some(expected) = &self.credentials else {
            return AccessDecision::Allow;
        };

        match basic_credentials(headers) {
            None => AccessDecision::Unauthenticated { challenge: true },
            Some((user, password)) if user == expected.user && password == expected.password => {
                AccessDecision::Allow
            }
            Some(_) => AccessDecision::Unauthenticated { challenge: false },
        }
    }
}

/// Read-only mode gate.
#[derive(Debug, Clone, Copy)]
pub struct ReadOnlyGuard {
    read_only: bool,
}

impl ReadOnlyGuard {
    pub fn new(read_only: bool) -> Self {
        Self { read_only }
    }

    pub fn check(&self, method: &Method) -> AccessDecision {
        if self.read_only && is_write_method(method) {
            AccessDecision::Forbidden
        } else {
            AccessDecision::Allow
        }
    }
}

/// Whether `method` modifies the served tree.
pub fn is_write_method(method: &Method) -> bool {
    WRITE_METHODS.contains(&method.as_str())
}

/// Extract `(user, password)` from a Basic `Authorization` header.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_header(user: &str, password: &str) -> HeaderMap {
        let token = STANDARD.encode(format!("{}:{}", user, password));
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", token)).unwrap(),
        );
        headers
    }

    fn authenticator() -> Authenticator {
        Authenticator::new(Some(Credentials {
            user: "alice".to_string(),
            password: "s3cret:with:colons".to_string(),
        }))
    }

    #[test]
    fn correct_credentials_are_allowed() {
        let decision = authenticator().check(&auth_header("alice", "s3cret:with:colons"));
        assert_eq!(decision, AccessDecision::Allow);
    }

    #[test]
    fn wrong_password_is_rejected_without_challenge() {
        let decision = authenticator().check(&auth_header("alice", "nope"));
        assert_eq!(decision, AccessDecision::Unauthenticated { challenge: false });

        let res = decision.into_response().unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().get(WWW_AUTHENTICATE).is_none());
    }

    #[test]
    fn missing_header_gets_a_challenge() {
        let decision = authenticator().check(&HeaderMap::new());
        assert_eq!(decision, AccessDecision::Unauthenticated { challenge: true });

        let res = decision.into_response().unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.headers()[WWW_AUTHENTICATE], BASIC_CHALLENGE);
    }

    #[test]
    fn malformed_header_gets_a_challenge() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic !!notbase64"));
        assert_eq!(
            authenticator().check(&headers),
            AccessDecision::Unauthenticated { challenge: true }
        );

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(
            authenticator().check(&headers),
            AccessDecision::Unauthenticated { challenge: true }
        );
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let token = STANDARD.encode("alice:s3cret:with:colons");
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("basic {}", token)).unwrap(),
        );
        assert!(authenticator().check(&headers).is_allowed());
    }

    #[test]
    fn no_credentials_allows_everything() {
        let open = Authenticator::new(None);
        assert!(open.check(&HeaderMap::new()).is_allowed());
        assert!(open.check(&auth_header("anyone", "anything")).is_allowed());
    }

    #[test]
    fn read_only_rejects_write_methods() {
        let guard = ReadOnlyGuard::new(true);
        for name in WRITE_METHODS {
            let method = Method::from_bytes(name.as_bytes()).unwrap();
            assert_eq!(guard.check(&method), AccessDecision::Forbidden, "{}", name);
        }
        assert!(guard.check(&Method::GET).is_allowed());
        assert!(guard
            .check(&Method::from_bytes(b"PROPFIND").unwrap())
            .is_allowed());
        assert!(guard.check(&Method::from_bytes(b"LOCK").unwrap()).is_allowed());
    }

    #[test]
    fn writable_mode_allows_writes() {
        let guard = ReadOnlyGuard::new(false);
        assert!(guard.check(&Method::PUT).is_allowed());
        assert!(guard.check(&Method::DELETE).is_allowed());
    }

    #[test]
    fn forbidden_response_is_403() {
        let res = AccessDecision::Forbidden.into_response().unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(AccessDecision::Allow.into_response().is_none());
    }
}
