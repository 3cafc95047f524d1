// Star rating -> feedback modal -> published testimonial.
//
// The five star buttons attached to a vouch message and the feedback modal
// they open are dispatched here from the framework's event handler, keyed
// by custom ID. Sessions are looked up by the rating message's ID.

use poise::serenity_prelude as serenity;
use tracing::{error, info};

use crate::models::session::VouchSession;
use crate::utils::messages;
use crate::{Data, Error};

const STAR_PREFIX: &str = "vouch_star_";
const FEEDBACK_PREFIX: &str = "vouch_feedback:";

/// Custom ID for the star button awarding `stars` stars
pub fn star_button_id(stars: u8) -> String {
    format!("{STAR_PREFIX}{stars}")
}

fn parse_star_id(custom_id: &str) -> Option<u8> {
    let stars = custom_id.strip_prefix(STAR_PREFIX)?.parse::<u8>().ok()?;
    (1..=5).contains(&stars).then_some(stars)
}

/// Custom ID for the feedback modal, carrying the rating message and star count
fn feedback_modal_id(message_id: serenity::MessageId, stars: u8) -> String {
    format!("{FEEDBACK_PREFIX}{message_id}:{stars}")
}

fn parse_feedback_id(custom_id: &str) -> Option<(serenity::MessageId, u8)> {
    let rest = custom_id.strip_prefix(FEEDBACK_PREFIX)?;
    let (message_id, stars) = rest.split_once(':')?;
    let message_id = message_id.parse::<u64>().ok().filter(|id| *id != 0)?;
    let stars = stars.parse::<u8>().ok()?;
    (1..=5)
        .contains(&stars)
        .then_some((serenity::MessageId::new(message_id), stars))
}

/// Gateway event hook wired into the poise framework
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::InteractionCreate { interaction } = event {
        match interaction {
            serenity::Interaction::Component(component) => {
                handle_star_click(ctx, component, data).await?;
            }
            serenity::Interaction::Modal(modal) => {
                handle_feedback_submit(ctx, modal, data).await?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// A star button was clicked: guard that the clicker is the buyer, then
/// open the feedback modal.
async fn handle_star_click(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let Some(stars) = parse_star_id(&interaction.data.custom_id) else {
        return Ok(());
    };

    let message_id = interaction.message.id;
    let buyer = match data.sessions.get(&message_id) {
        Some(session) => session.buyer,
        None => {
            // Already published, or the process restarted since the vouch
            component_notice(ctx, interaction, messages::ERR_SESSION_CLOSED).await;
            return Ok(());
        }
    };

    if interaction.user.id != buyer {
        component_notice(ctx, interaction, messages::ERR_NOT_BUYER).await;
        return Ok(());
    }

    let input = serenity::CreateInputText::new(serenity::InputTextStyle::Paragraph, "Feedback", "feedback");
    let modal = serenity::CreateModal::new(feedback_modal_id(message_id, stars), "Gửi Feedback")
        .components(vec![serenity::CreateActionRow::InputText(input)]);

    interaction
        .create_response(ctx, serenity::CreateInteractionResponse::Modal(modal))
        .await?;
    info!("Feedback modal opened for {} with {} stars", buyer, stars);

    Ok(())
}

/// The feedback modal was submitted: build the testimonial embed, route it
/// to the configured channel (origin channel as fallback), close out the
/// rating message and retire the session.
async fn handle_feedback_submit(
    ctx: &serenity::Context,
    interaction: &serenity::ModalInteraction,
    data: &Data,
) -> Result<(), Error> {
    let Some((message_id, stars)) = parse_feedback_id(&interaction.data.custom_id) else {
        return Ok(());
    };

    // Claim the session up front: `remove` hands it to exactly one
    // submission, so a concurrent duplicate (second modal opened before
    // the first was submitted) gets the closed notice instead of a second
    // testimonial. The failure path below puts the session back.
    let Some((_, session)) = data.sessions.remove(&message_id) else {
        modal_notice(ctx, interaction, messages::ERR_SESSION_CLOSED).await;
        return Ok(());
    };

    let feedback = extract_input(&interaction.data.components, "feedback").unwrap_or_default();

    // Config is resolved fresh so an admin reconfiguration mid-session
    // takes effect. The configured channel is only trusted if it still
    // exists in the guild; otherwise the vouch's origin channel is used.
    let configured = interaction
        .guild_id
        .and_then(|gid| data.config.feedback_channel(&gid.to_string()))
        .filter(|id| *id != 0)
        .map(serenity::ChannelId::new);

    let (guild_icon, configured_exists) =
        match interaction.guild_id.and_then(|gid| ctx.cache.guild(gid)) {
            Some(guild) => (
                guild.icon_url(),
                configured.is_some_and(|id| guild.channels.contains_key(&id)),
            ),
            None => (None, false),
        };

    let target = resolve_destination(configured, configured_exists, session.origin_channel);

    let embed = testimonial_embed(&session, stars, &feedback, guild_icon);
    let message = serenity::CreateMessage::new()
        .content(messages::testimonial_intro(session.buyer))
        .embed(embed);

    if let Err(e) = target.send_message(&ctx.http, message).await {
        error!("Could not send feedback to channel {}: {:?}", target, e);
        // Return the claim so the buyer can retry
        data.sessions.insert(message_id, session);
        modal_notice(ctx, interaction, messages::ERR_FEEDBACK_SEND).await;
        return Ok(());
    }
    info!("Feedback sent for {} with {} stars", session.buyer, stars);

    // Close out the rating message: fixed completion text, no buttons.
    // An edit failure is logged but the feedback itself already landed.
    let edit = serenity::EditMessage::new()
        .content(messages::COMPLETION_NOTICE)
        .components(vec![]);
    match session.origin_channel.edit_message(&ctx.http, message_id, edit).await {
        Ok(_) => info!("Original message updated for {}", session.buyer),
        Err(e) => error!("Error updating original message: {:?}", e),
    }

    modal_notice(ctx, interaction, messages::OK_FEEDBACK_RECEIVED).await;

    Ok(())
}

/// Where a testimonial goes: the configured feedback channel when it still
/// exists in the guild, otherwise the channel the vouch originated in.
fn resolve_destination(
    configured: Option<serenity::ChannelId>,
    configured_exists: bool,
    origin: serenity::ChannelId,
) -> serenity::ChannelId {
    match configured {
        Some(channel) if configured_exists => channel,
        _ => origin,
    }
}

fn testimonial_embed(
    session: &VouchSession,
    stars: u8,
    feedback: &str,
    guild_icon: Option<String>,
) -> serenity::CreateEmbed {
    let mut footer = serenity::CreateEmbedFooter::new(messages::STORE_FOOTER);
    if let Some(icon) = guild_icon {
        footer = footer.icon_url(icon);
    }

    serenity::CreateEmbed::new()
        .title(format!("Đã mua: {}", session.product))
        .description(format!("> • {feedback}"))
        .color(messages::TESTIMONIAL_COLOR)
        .author(
            serenity::CreateEmbedAuthor::new(messages::TESTIMONIAL_AUTHOR)
                .icon_url(&session.buyer_face),
        )
        .thumbnail(&session.buyer_face)
        .field("Đánh giá", messages::star_rating(stars), false)
        .footer(footer)
}

/// Pull the value of a text input out of submitted modal rows
fn extract_input(rows: &[serenity::ActionRow], custom_id: &str) -> Option<String> {
    for row in rows {
        for component in &row.components {
            if let serenity::ActionRowComponent::InputText(input) = component {
                if input.custom_id == custom_id {
                    return input.value.clone();
                }
            }
        }
    }
    None
}

async fn component_notice(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    content: &str,
) {
    let _ = interaction
        .create_response(
            ctx,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await;
}

async fn modal_notice(
    ctx: &serenity::Context,
    interaction: &serenity::ModalInteraction,
    content: &str,
) {
    let _ = interaction
        .create_response(
            ctx,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_ids_round_trip() {
        for stars in 1..=5 {
            assert_eq!(parse_star_id(&star_button_id(stars)), Some(stars));
        }
    }

    #[test]
    fn star_id_rejects_out_of_range_and_foreign_ids() {
        assert_eq!(parse_star_id("vouch_star_0"), None);
        assert_eq!(parse_star_id("vouch_star_6"), None);
        assert_eq!(parse_star_id("vouch_star_abc"), None);
        assert_eq!(parse_star_id("quiz_select"), None);
    }

    #[test]
    fn feedback_ids_round_trip() {
        let message_id = serenity::MessageId::new(987654321);
        let id = feedback_modal_id(message_id, 4);
        assert_eq!(parse_feedback_id(&id), Some((message_id, 4)));
    }

    #[test]
    fn feedback_id_rejects_garbage() {
        assert_eq!(parse_feedback_id("vouch_feedback:"), None);
        assert_eq!(parse_feedback_id("vouch_feedback:12"), None);
        assert_eq!(parse_feedback_id("vouch_feedback:0:3"), None);
        assert_eq!(parse_feedback_id("vouch_feedback:12:9"), None);
        assert_eq!(parse_feedback_id("vouch_star_3"), None);
    }

    fn sample_session() -> VouchSession {
        VouchSession {
            buyer: serenity::UserId::new(42),
            buyer_face: String::new(),
            quantity: 1,
            product: "Keycap".into(),
            price: "100k".into(),
            origin_channel: serenity::ChannelId::new(555),
        }
    }

    #[test]
    fn session_claim_goes_to_exactly_one_submission() {
        let sessions: dashmap::DashMap<serenity::MessageId, VouchSession> = dashmap::DashMap::new();
        let id = serenity::MessageId::new(321);
        sessions.insert(id, sample_session());

        // Two submissions racing for the same session: only one gets it
        assert!(sessions.remove(&id).is_some());
        assert!(sessions.remove(&id).is_none());
    }

    #[test]
    fn failed_publish_returns_session_for_retry() {
        let sessions: dashmap::DashMap<serenity::MessageId, VouchSession> = dashmap::DashMap::new();
        let id = serenity::MessageId::new(321);
        sessions.insert(id, sample_session());

        let (_, session) = sessions.remove(&id).unwrap();
        sessions.insert(id, session);

        assert!(sessions.remove(&id).is_some());
    }

    #[test]
    fn destination_prefers_existing_configured_channel() {
        let configured = serenity::ChannelId::new(777);
        let origin = serenity::ChannelId::new(555);
        assert_eq!(resolve_destination(Some(configured), true, origin), configured);
    }

    #[test]
    fn destination_falls_back_to_origin() {
        let origin = serenity::ChannelId::new(555);
        // Configured channel no longer exists in the guild
        let gone = serenity::ChannelId::new(777);
        assert_eq!(resolve_destination(Some(gone), false, origin), origin);
        // Nothing configured at all
        assert_eq!(resolve_destination(None, false, origin), origin);
    }
}
