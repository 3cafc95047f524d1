use poise::serenity_prelude as serenity;

/// In-flight vouch awaiting the buyer's rating and feedback.
///
/// Keyed in `Data::sessions` by the ID of the public rating message the
/// star buttons are attached to. Lives until feedback is published (no
/// timeout) or the process exits.
#[derive(Debug, Clone)]
pub struct VouchSession {
    pub buyer: serenity::UserId,
    /// Buyer avatar URL, captured when the vouch is created
    pub buyer_face: String,
    pub quantity: i64,
    pub product: String,
    pub price: String,
    /// Channel the `/vouch` command ran in (fallback feedback destination)
    pub origin_channel: serenity::ChannelId,
}
