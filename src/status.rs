use std::fmt;

use http::StatusCode;

/// Classification result for a known 4xx/5xx status code. This is the
/// *normal* outcome of [`status_good`] on an error code, not a failure of
/// the lookup itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusError {
    code: u16,
    message: &'static str,
}

impl StatusError {
    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for StatusError {}

const CLIENT_ERRORS: &[(StatusCode, &str)] = &[
    (StatusCode::BAD_REQUEST, "bad request: 400"),
    (StatusCode::UNAUTHORIZED, "unauthorized request: 401"),
    (StatusCode::PAYMENT_REQUIRED, "payment required: 402"),
    (StatusCode::FORBIDDEN, "forbidden: 403"),
    (StatusCode::NOT_FOUND, "not found: 404"),
    (StatusCode::METHOD_NOT_ALLOWED, "method not allowed: 405"),
    (StatusCode::NOT_ACCEPTABLE, "not acceptable: 406"),
    (
        StatusCode::PROXY_AUTHENTICATION_REQUIRED,
        "proxy authentication required: 407",
    ),
    (StatusCode::REQUEST_TIMEOUT, "request timeout: 408"),
    (StatusCode::CONFLICT, "conflict: 409"),
    (StatusCode::GONE, "gone: 410"),
    (StatusCode::LENGTH_REQUIRED, "content-length required: 411"),
    (StatusCode::PRECONDITION_FAILED, "precondition failed: 412"),
    (StatusCode::PAYLOAD_TOO_LARGE, "payload too large: 413"),
    (StatusCode::URI_TOO_LONG, "uri too long: 414"),
    (
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        "unsupported media type: 415",
    ),
    (StatusCode::RANGE_NOT_SATISFIABLE, "range not satisfiable: 416"),
    (StatusCode::EXPECTATION_FAILED, "expectation failed: 417"),
    (StatusCode::IM_A_TEAPOT, "but i am a teapot: 418"),
    (StatusCode::MISDIRECTED_REQUEST, "misdirected request: 421"),
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        "unprocessable content: 422",
    ),
    (StatusCode::LOCKED, "locked: 423"),
    (StatusCode::FAILED_DEPENDENCY, "failed dependency: 424"),
    (StatusCode::TOO_EARLY, "too early: 425"),
    (StatusCode::UPGRADE_REQUIRED, "upgrade required: 426"),
    (
        StatusCode::PRECONDITION_REQUIRED,
        "precondition required: 428",
    ),
    (StatusCode::TOO_MANY_REQUESTS, "too many requests: 429"),
    (
        StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,
        "request header too large: 431",
    ),
    (
        StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS,
        "unavailable for legal reasons: 451",
    ),
];

const SERVER_ERRORS: &[(StatusCode, &str)] = &[
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error: 500",
    ),
    (StatusCode::NOT_IMPLEMENTED, "not implemented: 501"),
    (StatusCode::BAD_GATEWAY, "bad gateway: 502"),
    (StatusCode::SERVICE_UNAVAILABLE, "service unavailable: 503"),
    (StatusCode::GATEWAY_TIMEOUT, "gateway timeout: 504"),
    (
        StatusCode::HTTP_VERSION_NOT_SUPPORTED,
        "http version not supported: 505",
    ),
    (
        StatusCode::VARIANT_ALSO_NEGOTIATES,
        "variant also negotiates: 506",
    ),
    (StatusCode::INSUFFICIENT_STORAGE, "insufficient storage: 507"),
    (StatusCode::LOOP_DETECTED, "loop detected: 508"),
    (
        StatusCode::NETWORK_AUTHENTICATION_REQUIRED,
        "network authentication required: 511",
    ),
];

fn lookup(table: &'static [(StatusCode, &'static str)], code: u16) -> Option<StatusError> {
    table
        .iter()
        .find(|(sc, _)| sc.as_u16() == code)
        .map(|&(sc, message)| StatusError {
            code: sc.as_u16(),
            message,
        })
}

/// Checks a status code against the known client and server error tables.
/// A recognized 4xx/5xx code comes back as `Err` carrying its fixed message;
/// everything else, including 1xx/2xx/3xx and unknown codes, is `Ok(())`.
///
/// The client table is consulted before the server table.
pub fn status_good(code: u16) -> Result<(), StatusError> {
    if let Some(err) = lookup(CLIENT_ERRORS, code) {
        return Err(err);
    }
    if let Some(err) = lookup(SERVER_ERRORS, code) {
        return Err(err);
    }
    Ok(())
}
