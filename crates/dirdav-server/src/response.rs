use dav_server::body::Body;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const TEXT_HTML: &str = "text/html; charset=utf-8";

/// Response with a status and no body.
pub(crate) fn empty(status: StatusCode) -> Response<Body> {
    let mut res = Response::new(Body::empty());
    *res.status_mut() = status;
    res
}

/// Plain-text error response.
pub(crate) fn plain(status: StatusCode, message: &'static str) -> Response<Body> {
    let mut res = Response::new(Body::from(format!("{}\n", message)));
    *res.status_mut() = status;
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    res
}

/// 200 response carrying an HTML document.
pub(crate) fn html(document: String) -> Response<Body> {
    let mut res = Response::new(Body::from(document));
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_HTML));
    res
}
