//! Usage: listen-address parsing for the `QUASAR_LISTEN` setting.

use crate::shared::error::{AppError, AppResult};

pub(crate) const DEFAULT_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_PORT: u16 = 8350;

pub fn is_wildcard_host(host: &str) -> bool {
    matches!(host.trim(), "0.0.0.0" | "::")
}

pub fn format_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Accepts `host`, `host:port`, or `[ipv6]:port`; bare hosts get the default port.
pub fn parse_listen(input: &str) -> AppResult<(String, u16)> {
    let raw = input.trim();
    if raw.is_empty() {
        return Ok((DEFAULT_HOST.to_string(), DEFAULT_PORT));
    }
    if raw.contains("://") || raw.contains('/') {
        return Err(AppError::Config(
            "listen address must be host or host:port".to_string(),
        ));
    }

    if let Some(rest) = raw.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(|| {
            AppError::Config("invalid IPv6 listen address: missing ']'".to_string())
        })?;
        let host = host.trim();
        if host.is_empty() {
            return Err(AppError::Config("listen address missing host".to_string()));
        }
        let tail = tail.trim();
        if tail.is_empty() {
            return Ok((host.to_string(), DEFAULT_PORT));
        }
        let port_raw = tail.strip_prefix(':').ok_or_else(|| {
            AppError::Config("IPv6 listen address must be [addr]:port".to_string())
        })?;
        return Ok((host.to_string(), parse_port(port_raw)?));
    }

    let mut parts = raw.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(host), None, _) => Ok((host.to_string(), DEFAULT_PORT)),
        (Some(host), Some(port_raw), None) => {
            let host = host.trim();
            if host.is_empty() {
                return Err(AppError::Config("listen address missing host".to_string()));
            }
            Ok((host.to_string(), parse_port(port_raw)?))
        }
        _ => Err(AppError::Config(
            "IPv6 listen address must use [addr]:port".to_string(),
        )),
    }
}

fn parse_port(raw: &str) -> AppResult<u16> {
    let port: u16 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Config("invalid listen port".to_string()))?;
    if port < 1024 {
        return Err(AppError::Config("listen port must be >= 1024".to_string()));
    }
    Ok(port)
}
