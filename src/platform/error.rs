use thiserror::Error;

/// Failures reported by platform collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Package '{package}' is not installed")]
    PackageNotFound { package: String },

    #[error("Invalid package name '{package}'")]
    InvalidPackage { package: String },

    #[error("Icon for '{package}' unavailable: {reason}")]
    IconUnavailable { package: String, reason: String },

    #[error("Permission '{permission}' not granted")]
    PermissionDenied { permission: String },

    #[error("{service} unavailable: {reason}")]
    ServiceUnavailable {
        service: &'static str,
        reason: String,
    },
}
