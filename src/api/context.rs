//! Request Context
//!
//! Per-request metadata carried through request extensions for tracing.

use std::net::IpAddr;

use uuid::Uuid;

/// Context for one HTTP request
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation ID, taken from `x-request-id` or generated
    pub correlation_id: Uuid,

    /// Client IP address, when known
    pub client_ip: Option<IpAddr>,
}

impl RequestContext {
    /// Create a context with a fresh correlation ID
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            client_ip: None,
        }
    }

    /// Reuse a caller-supplied correlation ID when it parses as a UUID
    pub fn from_header(value: Option<&str>) -> Self {
        let correlation_id = value
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .unwrap_or_else(Uuid::new_v4);

        Self {
            correlation_id,
            client_ip: None,
        }
    }

    pub fn with_client_ip(mut self, ip: IpAddr) -> Self {
        self.client_ip = Some(ip);
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
