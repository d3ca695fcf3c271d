//! Client origin resolution
//!
//! Extracts a normalized client IP and the `Origin` header from a raw request,
//! and derives the salted IP hash used wherever a client must be correlated
//! without storing its address.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};
use std::convert::Infallible;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use url::Url;

use crate::crypto::{SecretKey, hmac_sha256};

/// Who is calling and from which page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOrigin {
    /// Client IP address (from proxy headers or direct connection)
    pub ip: Option<IpAddr>,
    /// `Origin` header as sent by the browser
    pub origin: Option<String>,
}

impl ClientOrigin {
    pub fn new(ip: Option<IpAddr>, origin: Option<String>) -> Self {
        Self { ip, origin }
    }

    /// Salted hash of the client IP
    ///
    /// Clients whose IP cannot be determined share the hash of `unknown`.
    pub fn ip_hash(&self, salt: &SecretKey) -> IpHash {
        IpHash::derive(salt, self.ip)
    }
}

/// Resolves from headers plus the peer address, when the server was started
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
impl<S> FromRequestParts<S> for ClientOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());
        Ok(resolve_client_origin(&parts.headers, peer))
    }
}

/// HMAC-SHA256 of the client IP under a process-wide salt
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpHash([u8; 32]);

impl IpHash {
    pub fn derive(salt: &SecretKey, ip: Option<IpAddr>) -> Self {
        let material = match ip {
            Some(ip) => ip.to_string(),
            None => "unknown".to_string(),
        };
        Self(hmac_sha256(salt.expose(), material.as_bytes()))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short hex prefix for log correlation
    pub fn short(&self) -> String {
        hex::encode(&self.0[..6])
    }
}

impl TryFrom<&[u8]> for IpHash {
    type Error = std::array::TryFromSliceError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 32]>::try_from(bytes).map(Self)
    }
}

impl fmt::Debug for IpHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IpHash({}..)", self.short())
    }
}

impl fmt::Display for IpHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

/// Resolve the client origin for a request
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Peer address of the connection, if known
pub fn resolve_client_origin(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> ClientOrigin {
    ClientOrigin::new(extract_client_ip(headers, direct_ip), extract_origin(headers))
}

/// Extract client IP address from headers
///
/// Checks `X-Forwarded-For` (first valid entry) and `X-Real-IP` for reverse
/// proxy setups, then falls back to the direct connection IP. IPv4-mapped
/// IPv6 addresses are reported as IPv4.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| {
            xff.split(',')
                .find_map(|candidate| candidate.trim().parse::<IpAddr>().ok())
        });

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    };

    forwarded.or_else(real_ip).or(direct_ip).map(normalize_ip)
}

fn normalize_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        v4 => v4,
    }
}

/// Extract the `Origin` header
///
/// Empty values and the opaque origin `null` count as absent.
pub fn extract_origin(headers: &HeaderMap) -> Option<String> {
    let origin = headers.get(header::ORIGIN)?.to_str().ok()?.trim();
    if origin.is_empty() || origin == "null" {
        return None;
    }
    Some(origin.to_string())
}

/// Extract the `User-Agent` header
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .map(str::to_string)
}

/// Hostname of an origin URL, lowercased, without port
pub fn origin_host(origin: &str) -> Option<String> {
    let url = Url::parse(origin).ok()?;
    let host = url.host_str()?;
    Some(host.to_ascii_lowercase())
}

/// Strip one leading `www.` label
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_skips_garbage_xff_entries() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("unknown, 203.0.113.9"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.7"));
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        let ip = extract_client_ip(&headers, Some(direct));
        assert_eq!(ip, Some("198.51.100.7".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        let ip = extract_client_ip(&headers, Some(direct));
        assert_eq!(ip, Some(direct));
    }

    #[test]
    fn test_extract_client_ip_unmaps_ipv4_in_ipv6() {
        let headers = HeaderMap::new();
        let mapped: IpAddr = "::ffff:192.0.2.1".parse().unwrap();

        let ip = extract_client_ip(&headers, Some(mapped));
        assert_eq!(ip, Some("192.0.2.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_origin() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_origin(&headers), None);

        headers.insert(header::ORIGIN, HeaderValue::from_static("null"));
        assert_eq!(extract_origin(&headers), None);

        headers.insert(header::ORIGIN, HeaderValue::from_static("https://eser.dev"));
        assert_eq!(extract_origin(&headers), Some("https://eser.dev".to_string()));
    }

    #[test]
    fn test_resolve_client_origin() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://eser.dev"));
        let direct: IpAddr = "10.1.2.3".parse().unwrap();

        let client = resolve_client_origin(&headers, Some(direct));
        assert_eq!(client.ip, Some(direct));
        assert_eq!(client.origin.as_deref(), Some("https://eser.dev"));
    }

    #[tokio::test]
    async fn test_extractor_uses_connect_info() {
        let (mut parts, _) = axum::http::Request::builder()
            .header("x-real-ip", "198.51.100.7")
            .body(())
            .unwrap()
            .into_parts();
        let peer: SocketAddr = "10.0.0.9:4000".parse().unwrap();
        parts.extensions.insert(ConnectInfo(peer));

        let client = ClientOrigin::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(client.ip, Some("198.51.100.7".parse().unwrap()));

        parts.headers.clear();
        let client = ClientOrigin::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(client.ip, Some(peer.ip()));
    }

    #[test]
    fn test_origin_host() {
        assert_eq!(
            origin_host("https://www.CustomTenant.com:8443"),
            Some("www.customtenant.com".to_string())
        );
        assert_eq!(
            origin_host("https://app.customtenant.com"),
            Some("app.customtenant.com".to_string())
        );
        assert_eq!(origin_host("not a url"), None);
    }

    #[test]
    fn test_strip_www() {
        assert_eq!(strip_www("www.customtenant.com"), "customtenant.com");
        assert_eq!(strip_www("app.customtenant.com"), "app.customtenant.com");
        assert_eq!(strip_www("www.www.example.com"), "www.example.com");
    }

    #[test]
    fn test_ip_hash_is_salted_and_stable() {
        let salt_a = SecretKey::new(b"salt-a".to_vec());
        let salt_b = SecretKey::new(b"salt-b".to_vec());
        let ip: Option<IpAddr> = Some("192.0.2.44".parse().unwrap());

        assert_eq!(IpHash::derive(&salt_a, ip), IpHash::derive(&salt_a, ip));
        assert_ne!(IpHash::derive(&salt_a, ip), IpHash::derive(&salt_b, ip));
        assert!(!IpHash::derive(&salt_a, ip).to_string().contains("192"));
        assert_eq!(IpHash::derive(&salt_a, ip).short().len(), 12);
    }
}
