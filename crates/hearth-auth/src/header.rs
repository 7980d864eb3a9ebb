//! Authorization header parsing.

/// Structured form of the Authorization header.
///
/// Created per request and discarded once the decision is made; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// The authentication scheme as sent by the client (case preserved).
    pub scheme: String,
    /// The credential blob following the scheme. Non-empty.
    pub token: String,
}

/// Why no credential could be produced from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRejection {
    /// Header missing or empty.
    Absent,
    /// Header present but not `Scheme token` shaped, or the token is empty.
    Malformed,
}

/// Parse a raw Authorization header value into a [`Credential`].
///
/// Pure over the header string. Malformed client input is expected traffic
/// and reported as [`HeaderRejection::Malformed`], never as a fault. An
/// empty token after a well-formed scheme prefix counts as malformed, so a
/// verifier is never handed an empty token.
pub fn parse_authorization(value: Option<&str>) -> Result<Credential, HeaderRejection> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Err(HeaderRejection::Absent),
    };

    let (scheme, token) = value.split_once(' ').ok_or(HeaderRejection::Malformed)?;
    let token = token.trim_start_matches(' ');
    if scheme.is_empty() || token.is_empty() {
        return Err(HeaderRejection::Malformed);
    }

    Ok(Credential {
        scheme: scheme.to_string(),
        token: token.to_string(),
    })
}
