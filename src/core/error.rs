use thiserror::Error;

/// Message surfaced when the model answers without an inline image
pub const NO_IMAGE_DATA_MESSAGE: &str = "No image data returned from the model.";

#[derive(Error, Debug)]
pub enum HappuError {
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("{}", NO_IMAGE_DATA_MESSAGE)]
    NoImageData,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Image processing error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<reqwest::Error> for HappuError {
    fn from(err: reqwest::Error) -> Self {
        HappuError::Api {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for HappuError {
    fn from(err: serde_json::Error) -> Self {
        HappuError::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_messages_are_shown_verbatim() {
        let err = HappuError::Api {
            message: "API key not valid. Please pass a valid API key.".to_string(),
            source: None,
        };
        assert_eq!(err.to_string(), "API key not valid. Please pass a valid API key.");
    }

    #[test]
    fn no_image_data_has_a_fixed_message() {
        assert_eq!(HappuError::NoImageData.to_string(), NO_IMAGE_DATA_MESSAGE);
    }
}
