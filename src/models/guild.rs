use serde::{Deserialize, Serialize};

/// Guild (Server) specific configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GuildConfig {
    /// Thank-you text prepended to vouch announcements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thankyou: Option<String>,
    /// Channel ID that receives published testimonials.
    /// `None` means "post in the channel the vouch originated in".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_channel: Option<u64>,
}
