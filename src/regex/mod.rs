//! Compile-once cache for the fixed patterns used when scanning NEXUS text.

/// Compile a regular expression on first use and hand back the cached
/// instance thereafter. Patterns are string literals in this crate, so a
/// failure to compile is a programming error.
#[macro_export]
macro_rules! compile {
    ($pattern:expr) => {{
        use std::sync::OnceLock;
        static REGEX: OnceLock<::regex::Regex> = OnceLock::new();
        REGEX.get_or_init(|| ::regex::Regex::new($pattern).unwrap_or_else(|e| panic!("{}", e)))
    }};
}
