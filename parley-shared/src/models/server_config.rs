use serde::{Deserialize, Serialize};

/// CAPTCHA configuration advertised by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptchaFeature {
    /// Whether a CAPTCHA token must accompany authentication requests.
    pub enabled: bool,

    /// Site key handed to the CAPTCHA widget.
    pub key: String,
}

/// Feature switches advertised by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Features {
    /// CAPTCHA configuration.
    pub captcha: CaptchaFeature,

    /// Whether the server sends account emails (verification, password resets).
    pub email: bool,

    /// Whether registration requires an invite code.
    pub invite_only: bool,
}

/// Server configuration, fetched once when the client starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server build revision.
    pub revision: String,

    /// Active feature switches.
    pub features: Features,
}
