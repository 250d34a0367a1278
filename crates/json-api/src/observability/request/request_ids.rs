//! Request ID resolution and response header helpers.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse the caller's request id when it is a sane token, otherwise mint a new one.
pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_owned())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(generate_request_id)
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(
            request_id,
            "could not encode request id for response header: {source}"
        ),
    }
}

pub(super) fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.chars().all(|c| c.is_ascii_graphic())
}

fn generate_request_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_well_formed_ids() {
        assert_eq!(
            resolve_request_id(Some(" checkout-42 ".to_string())),
            "checkout-42"
        );
    }

    #[test]
    fn replaces_missing_blank_or_oversized_ids() {
        let oversized = "x".repeat(MAX_REQUEST_ID_LEN + 1);

        for header in [None, Some("   ".to_string()), Some(oversized), Some("a b".to_string())] {
            let resolved = resolve_request_id(header.clone());

            assert!(
                Uuid::parse_str(&resolved).is_ok(),
                "expected generated id for {header:?}, got {resolved}"
            );
        }
    }
}
