//! Crate version reporting

/// Version of this build, as reported by `/ping` and `--version`
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
