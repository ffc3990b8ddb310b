pub const PROGRAM_NAME: &str = "sieve";
pub const PROGRAM_LOG_LEVEL: &str = "SIEVE_LOG_LEVEL";
/// Selects how `between#N1#N2` treats inverted bounds: `strict` or `lax`.
pub const BETWEEN_BOUNDS_ENV: &str = "SIEVE_BETWEEN_BOUNDS";

/// Parse a bounds policy value. Returns `Some(true)` for lax, `Some(false)`
/// for strict and `None` for anything unrecognised.
pub fn parse_between_bounds(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "lax" => Some(true),
        "strict" => Some(false),
        _ => None,
    }
}

/// Whether the environment asks for lax `between` bounds.
/// Unset or unrecognised values mean strict.
pub fn lax_between_from_env() -> bool {
    std::env::var(BETWEEN_BOUNDS_ENV)
        .ok()
        .and_then(|v| parse_between_bounds(&v))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
