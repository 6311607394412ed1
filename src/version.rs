// Version information for the AI Gallery server

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("AI Gallery {}", VERSION_NUMBER)
}
