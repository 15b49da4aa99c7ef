use thiserror::Error;

#[derive(Error, Debug)]
pub enum WinGuestError {
    #[error("Could not detect remote management protocol version from output {output:?}")]
    ProtocolDetection { output: String },

    #[error("Failed to parse guest network adapters: {reason}")]
    AdapterParse { reason: String },

    #[error("Provider {provider} does not support MAC address correlation")]
    UnsupportedProvider { provider: String },

    #[error("{network_type} network type is not supported, try static or dhcp")]
    UnsupportedNetworkType { network_type: String },

    #[error("Remote command failed on {machine}: {message}")]
    CommandFailed { machine: String, message: String },

    #[error("Provider error on {provider}: {message}")]
    ProviderError { provider: String, message: String },

    #[error("Failed to render {template} template: {message}")]
    TemplateError { template: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WinGuestError>;

impl WinGuestError {
    /// Errors raised by the guest or the virtualization back-end rather than by
    /// the request itself.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            WinGuestError::CommandFailed { .. } | WinGuestError::ProviderError { .. }
        )
    }
}
