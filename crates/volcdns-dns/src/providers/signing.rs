//! Volcengine OpenAPI request signing
//!
//! HMAC-SHA256 over a canonical request, with the signing key derived from
//! the secret key through `date / region / service / "request"`.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HMAC-SHA256";

/// Headers produced by signing a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Value of the `Authorization` header
    pub authorization: String,
    /// Value of the `X-Date` header
    pub x_date: String,
    /// Value of the `X-Content-Sha256` header
    pub content_sha256: String,
}

/// Sign a request
///
/// `headers` must contain every header to be signed except `X-Date` and
/// `X-Content-Sha256`, which are added here.
#[allow(clippy::too_many_arguments)]
pub fn sign_request(
    method: &str,
    path: &str,
    query: &[(&str, &str)],
    headers: &[(&str, &str)],
    payload: &[u8],
    access_key: &str,
    secret_key: &str,
    region: &str,
    service: &str,
    now: DateTime<Utc>,
) -> SignedRequest {
    let date_stamp = now.format("%Y%m%d").to_string();
    let x_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let payload_hash = hex::encode(Sha256::digest(payload));

    let mut sorted_headers: Vec<(String, String)> = headers
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.trim().to_string()))
        .collect();
    sorted_headers.push(("x-content-sha256".to_string(), payload_hash.clone()));
    sorted_headers.push(("x-date".to_string(), x_date.clone()));
    sorted_headers.sort();

    let mut canonical_headers = String::new();
    for (key, value) in &sorted_headers {
        canonical_headers.push_str(&format!("{}:{}\n", key, value));
    }
    let signed_headers = sorted_headers
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        method,
        path,
        canonical_query(query),
        canonical_headers,
        signed_headers,
        payload_hash
    );
    let canonical_request_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));

    let credential_scope = format!("{}/{}/{}/request", date_stamp, region, service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM, x_date, credential_scope, canonical_request_hash
    );

    let k_date = hmac_sha256(secret_key.as_bytes(), &date_stamp);
    let k_region = hmac_sha256(&k_date, region);
    let k_service = hmac_sha256(&k_region, service);
    let k_signing = hmac_sha256(&k_service, "request");
    let signature = hex::encode(hmac_sha256(&k_signing, &string_to_sign));

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, access_key, credential_scope, signed_headers, signature
    );

    SignedRequest {
        authorization,
        x_date,
        content_sha256: payload_hash,
    }
}

/// Percent-encode and sort query parameters
pub fn canonical_query(query: &[(&str, &str)]) -> String {
    let mut pairs: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| {
            (
                urlencoding::encode(k).into_owned(),
                urlencoding::encode(v).into_owned(),
            )
        })
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

fn hmac_sha256(key: &[u8], data: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data.as_bytes());
    mac.finalize().into_bytes().to_vec()
}
