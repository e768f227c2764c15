use gloo_net::http::{Request, RequestBuilder};

/// Creates a GET request that asks for JSON and identifies itself as an
/// XHR, so the server answers auth failures with JSON instead of a redirect.
pub fn json_get(url: &str) -> RequestBuilder {
    Request::get(url)
        .header("Accept", "application/json")
        .header("X-Requested-With", "XMLHttpRequest")
}
