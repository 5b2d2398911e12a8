//! Connection check run before a parent may submit: the caller must be in the
//! expected country and not behind a VPN, proxy or hosting provider. Any
//! lookup failure blocks submission.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    ForeignCountry(String),
    Vpn,
    Proxy,
    Hosting,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum GeoVerdict {
    Allowed { ip: String },
    Blocked { ip: String, reason: BlockReason },
    Unverified { reason: String },
}

impl GeoVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GeoVerdict::Allowed { .. })
    }

    pub fn ip(&self) -> Option<&str> {
        match self {
            GeoVerdict::Allowed { ip } | GeoVerdict::Blocked { ip, .. } => Some(ip),
            GeoVerdict::Unverified { .. } => None,
        }
    }

    /// Message for the form banner, `None` when submission may proceed.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            GeoVerdict::Allowed { .. } => None,
            GeoVerdict::Blocked { .. } => Some(crate::locale::ERR_VPN_OR_PROXY),
            GeoVerdict::Unverified { .. } => Some(crate::locale::ERR_UNVERIFIED),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityFlags {
    #[serde(default)]
    pub vpn: bool,
    #[serde(default)]
    pub proxy: bool,
    #[serde(default)]
    pub hosting: bool,
}

/// Subset of the ipwho.is response the gate relies on.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct IpWhoResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub ip: Option<String>,
    pub country_code: Option<String>,
    pub security: Option<SecurityFlags>,
}

pub fn assess(response: &IpWhoResponse, expected_country: &str) -> GeoVerdict {
    if !response.success {
        return GeoVerdict::Unverified {
            reason: response
                .message
                .clone()
                .unwrap_or_else(|| "lookup reported failure".to_string()),
        };
    }
    let Some(ip) = response.ip.clone() else {
        return GeoVerdict::Unverified {
            reason: "lookup returned no IP".to_string(),
        };
    };

    let country = response.country_code.clone().unwrap_or_default();
    if !country.eq_ignore_ascii_case(expected_country) {
        return GeoVerdict::Blocked {
            ip,
            reason: BlockReason::ForeignCountry(country),
        };
    }

    let flags = response.security.clone().unwrap_or_default();
    let reason = if flags.vpn {
        Some(BlockReason::Vpn)
    } else if flags.proxy {
        Some(BlockReason::Proxy)
    } else if flags.hosting {
        Some(BlockReason::Hosting)
    } else {
        None
    };
    match reason {
        Some(reason) => GeoVerdict::Blocked { ip, reason },
        None => GeoVerdict::Allowed { ip },
    }
}

/// Reduces a forwarded-for list or a socket address to a bare IP.
pub fn normalize_ip(raw: &str) -> Option<String> {
    use std::net::{IpAddr, SocketAddr};

    let first = raw.split(',').next()?.trim();
    if let Ok(ip) = first.parse::<IpAddr>() {
        return Some(ip.to_string());
    }
    first.parse::<SocketAddr>().ok().map(|addr| addr.ip().to_string())
}

#[cfg(feature = "ssr")]
pub use client::GeoClient;

#[cfg(feature = "ssr")]
mod client {
    use super::{assess, GeoVerdict, IpWhoResponse};
    use crate::error::AppError;
    use leptos::logging::{log, warn};
    use std::time::Duration;

    #[derive(Debug, Clone)]
    pub struct GeoClient {
        http: reqwest::Client,
        endpoint: String,
        expected_country: String,
    }

    impl GeoClient {
        pub fn new(endpoint: &str, expected_country: &str) -> Self {
            let http = reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new());
            Self {
                http,
                endpoint: endpoint.trim_end_matches('/').to_string(),
                expected_country: expected_country.to_string(),
            }
        }

        pub async fn lookup(&self, ip: &str) -> Result<IpWhoResponse, AppError> {
            let url = format!("{}/{}", self.endpoint, ip);
            let response = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(|e| AppError::Geolocation(e.to_string()))?;
            if !response.status().is_success() {
                return Err(AppError::Geolocation(format!("status {}", response.status())));
            }
            response
                .json::<IpWhoResponse>()
                .await
                .map_err(|e| AppError::Geolocation(e.to_string()))
        }

        /// Never errors: failures become `GeoVerdict::Unverified`.
        pub async fn verify(&self, ip: &str) -> GeoVerdict {
            let verdict = match self.lookup(ip).await {
                Ok(response) => assess(&response, &self.expected_country),
                Err(e) => GeoVerdict::Unverified { reason: e.to_string() },
            };
            match &verdict {
                GeoVerdict::Allowed { ip } => log!("[GEO] {} allowed", ip),
                other => warn!("[GEO] {} not allowed: {:?}", ip, other),
            }
            verdict
        }
    }

}
