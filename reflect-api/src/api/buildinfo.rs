//! Build identification for `GET /build_info`

use std::fmt;

use axum::response::Json;
use serde::Serialize;

/// Identification baked in at compile time by build.rs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    pub const CURRENT: BuildInfo = BuildInfo {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("GIT_HASH"),
        build_timestamp: env!("BUILD_TIMESTAMP"),
        build_profile: env!("BUILD_PROFILE"),
    };
}

/// `reflect-api v0.1.0 [abcd1234] built 2025-10-26T19:30:45Z (release)`
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} [{}] built {} ({})",
            self.service, self.version, self.git_hash, self.build_timestamp, self.build_profile
        )
    }
}

/// GET /build_info
pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo::CURRENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_service_and_version() {
        let info = BuildInfo {
            service: "reflect-api",
            version: "1.2.3",
            git_hash: "abcd1234",
            build_timestamp: "2025-10-26T19:30:45Z",
            build_profile: "release",
        };
        assert_eq!(
            info.to_string(),
            "reflect-api v1.2.3 [abcd1234] built 2025-10-26T19:30:45Z (release)"
        );
    }

    #[test]
    fn test_current_carries_package_metadata() {
        assert_eq!(BuildInfo::CURRENT.service, "reflect-api");
        assert_eq!(BuildInfo::CURRENT.version, env!("CARGO_PKG_VERSION"));
        assert!(!BuildInfo::CURRENT.git_hash.is_empty());
    }
}
