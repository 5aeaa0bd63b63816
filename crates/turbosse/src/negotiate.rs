//! Content negotiation for event-stream requests.

use http::header::{ACCEPT, HeaderMap};

use crate::headers::ACCEPT_SSE;

/// Whether `request` can be answered with an event stream.
///
/// True iff the `Accept` header is present exactly once with the exact value
/// `text/event-stream`. Lists such as `text/event-stream, text/html`,
/// wildcards and parameters do not match.
pub fn can_handle<B>(request: &http::Request<B>) -> bool {
    accepts_event_stream(request.headers())
}

/// Header-map form of [`can_handle`], for frameworks that expose headers
/// without the full request.
pub fn accepts_event_stream(headers: &HeaderMap) -> bool {
    let mut values = headers.get_all(ACCEPT).iter();
    matches!(
        (values.next(), values.next()),
        (Some(value), None) if value.as_bytes() == ACCEPT_SSE.as_bytes()
    )
}
