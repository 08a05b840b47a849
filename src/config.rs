use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::canvas::Color;
use crate::resources::Brand;

#[derive(Debug, Clone, Default)]
pub struct BrandConfig {
    pub brand: Brand,
    pub font_regular: Option<PathBuf>,
    pub font_bold: Option<PathBuf>,
    pub logo_path: Option<PathBuf>,
    pub logo_base64: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub brand: BrandConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port: u16 = get("PORT").and_then(|v| v.parse().ok()).unwrap_or(8080);
        let ip: IpAddr = get("BIND_ADDR")
            .and_then(|v| v.parse().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let defaults = Brand::default();
        let primary_color = match get("BRAND_PRIMARY_COLOR") {
            Some(hex) => Color::from_hex(&hex).unwrap_or_else(|| {
                tracing::warn!("⚠️ BRAND_PRIMARY_COLOR {:?} is not #RRGGBB, using default", hex);
                defaults.primary_color
            }),
            None => defaults.primary_color,
        };
        let brand = Brand {
            site_name: get("BRAND_SITE_NAME").unwrap_or(defaults.site_name),
            primary_color,
            website: get("BRAND_WEBSITE"),
        };

        Self {
            addr: SocketAddr::new(ip, port),
            brand: BrandConfig {
                brand,
                font_regular: get("BRAND_FONT_REGULAR").map(PathBuf::from),
                font_bold: get("BRAND_FONT_BOLD").map(PathBuf::from),
                logo_path: get("BRAND_LOGO_PATH").map(PathBuf::from),
                logo_base64: get("BRAND_LOGO_BASE64"),
            },
        }
    }
}
