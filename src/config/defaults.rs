//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn input() -> PathBuf {
        "src/main/sass".into()
    }

    pub fn output() -> PathBuf {
        "target/css".into()
    }

    pub mod engine {
        pub fn command() -> Vec<String> {
            vec!["sassc".into()]
        }

        pub fn precision() -> u8 {
            5
        }
    }
}
