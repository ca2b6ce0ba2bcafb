//! Update/compare mode selection.

/// Environment variable that switches [`Golden::check`](crate::golden::Golden::check)
/// into update mode.
pub const UPDATE_ENV_VAR: &str = "GOLDEN_UPDATE";

/// What `check` does with a fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoldenMode {
    /// Compare against the stored reference
    #[default]
    Compare,
    /// Overwrite the stored reference
    Update,
}

impl GoldenMode {
    /// Read the mode from `GOLDEN_UPDATE`
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(UPDATE_ENV_VAR).ok().as_deref())
    }

    /// `1`, `true` and `yes` (any case) select update mode.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("1" | "true" | "yes") => GoldenMode::Update,
            _ => GoldenMode::Compare,
        }
    }
}
