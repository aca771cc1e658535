pub type ShowResult<T> = Result<T, ShowError>;

#[derive(thiserror::Error, Debug)]
pub enum ShowError {
    #[error("timeline error: {0}")]
    Timeline(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("audio error: {0}")]
    Audio(String),

    #[error("encoder error: {0}")]
    Encoder(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ShowError {
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::Encoder(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(ShowError::timeline("x").to_string().starts_with("timeline error:"));
        assert!(ShowError::config("x").to_string().starts_with("config error:"));
        assert!(ShowError::asset("x").to_string().starts_with("asset error:"));
        assert!(ShowError::audio("x").to_string().starts_with("audio error:"));
        assert!(ShowError::encoder("x").to_string().starts_with("encoder error:"));
    }

    #[test]
    fn io_errors_convert_transparently() {
        let err: ShowError = std::io::Error::other("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
