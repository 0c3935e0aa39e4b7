pub type SeedResult<T> = Result<T, SeedError>;

#[derive(thiserror::Error, Debug)]
pub enum SeedError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("missing surface: {0}")]
    MissingSurface(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeedError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_surface(id: impl Into<String>) -> Self {
        Self::MissingSurface(id.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            SeedError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            SeedError::missing_surface("canvas-1")
                .to_string()
                .contains("missing surface: canvas-1")
        );
        assert!(SeedError::render("x").to_string().contains("render error:"));
        assert!(
            SeedError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SeedError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn json_errors_map_to_serde() {
        let err: SeedError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SeedError::Serde(_)));
    }
}
