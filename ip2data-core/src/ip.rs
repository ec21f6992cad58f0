//! Caller IP resolution.
//!
//! The inbound request may carry the client address in `X-Forwarded-For`
//! (first entry wins) or `X-Real-IP`; when neither is usable we fall back to
//! a configured constant. Addresses from a private or loopback range cannot
//! be geolocated and must be replaced by an IP-echo lookup first.

use std::net::IpAddr;

/// Ordered fallback: first `X-Forwarded-For` entry, then `X-Real-IP`,
/// then the configured fallback constant.
pub fn client_ip<'a>(
    forwarded_for: Option<&'a str>,
    real_ip: Option<&'a str>,
    fallback: &'a str,
) -> &'a str {
    forwarded_for
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or(real_ip)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
}

/// Whether `ip` must be replaced by the IP-echo service before geolocation.
///
/// True for loopback and RFC 1918 ranges; an address that does not parse at
/// all is treated the same way rather than handed to the geolocation
/// upstream verbatim.
pub fn needs_public_lookup(ip: &str) -> bool {
    match ip.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => v4.is_loopback() || v4.is_private(),
        Ok(IpAddr::V6(v6)) => v6.is_loopback(),
        Err(_) => true,
    }
}
