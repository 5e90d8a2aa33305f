//! Configuration for the paradigm compiler
//!
//! Hard limits come from the TOML profile compiled in by `build.rs`;
//! user-facing preferences live in [`runtime`] and may be changed per run.

// Generated from config/<profile>.toml at build time
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{ConfigError, RuntimeConfig};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("PARADIGM_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("PARADIGM_CONFIG_DIR").unwrap_or("config")
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }

    /// Returns the OUT_DIR path used for generation (for debugging)
    pub fn out_dir() -> &'static str {
        env!("OUT_DIR")
    }
}
