pub type UmbraResult<T> = Result<T, UmbraError>;

#[derive(thiserror::Error, Debug)]
pub enum UmbraError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("token document error: {0}")]
    TokenDocument(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UmbraError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn token_document(msg: impl Into<String>) -> Self {
        Self::TokenDocument(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            UmbraError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            UmbraError::token_document("x")
                .to_string()
                .contains("token document error:")
        );
        assert!(
            UmbraError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = UmbraError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
