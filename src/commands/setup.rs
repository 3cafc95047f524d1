use poise::serenity_prelude as serenity;
use poise::Modal;
use tracing::{info, warn};

use crate::utils::messages;
use crate::{Context, Data, Error};

type ApplicationContext<'a> = poise::ApplicationContext<'a, Data, Error>;

/// Admin gate shared by both setup commands. Interaction payloads carry
/// the member's computed permissions, so no extra HTTP round trip.
async fn is_admin(ctx: Context<'_>) -> bool {
    match ctx.author_member().await {
        Some(member) => member
            .permissions
            .map(|perms| perms.administrator())
            .unwrap_or(false),
        None => false,
    }
}

async fn deny_non_admin(ctx: Context<'_>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(messages::ERR_ADMIN_ONLY)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

#[derive(Debug, Modal)]
#[name = "Thiết lập Lời Cảm Ơn"]
struct ThankYouModal {
    #[name = "Lời cảm ơn"]
    #[paragraph]
    thankyou: String,
}

/// Thiết lập lời cảm ơn cho lệnh vouch
#[poise::command(slash_command, guild_only)]
pub async fn setupvouch(ctx: ApplicationContext<'_>) -> Result<(), Error> {
    let pctx = poise::Context::Application(ctx);

    if !is_admin(pctx).await {
        return deny_non_admin(pctx).await;
    }
    let guild_id = pctx.guild_id().ok_or("setupvouch used outside a guild")?;

    // Blocks until the admin submits; an abandoned modal mutates nothing
    let Some(submitted) = ThankYouModal::execute(ctx).await? else {
        return Ok(());
    };

    if let Err(e) = pctx
        .data()
        .config
        .set_thankyou(&guild_id.to_string(), submitted.thankyou)
    {
        warn!("Error saving config file: {}", e);
    }
    info!("Thank you message set for guild {}", guild_id);

    pctx.send(
        poise::CreateReply::default()
            .content(messages::OK_THANKYOU_SET)
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Chọn kênh để gửi feedback
#[poise::command(slash_command, guild_only)]
pub async fn setupfeedback(
    ctx: Context<'_>,
    #[description = "Kênh sẽ nhận feedback"] channel: serenity::GuildChannel,
) -> Result<(), Error> {
    if !is_admin(ctx).await {
        return deny_non_admin(ctx).await;
    }
    let guild_id = ctx.guild_id().ok_or("setupfeedback used outside a guild")?;

    // The bot must be able to post testimonials in the chosen channel
    let bot_member = guild_id.member(ctx, ctx.framework().bot_id).await?;
    let can_send = match ctx.guild() {
        Some(guild) => guild.user_permissions_in(&channel, &bot_member).send_messages(),
        None => false,
    };
    if !can_send {
        ctx.send(
            poise::CreateReply::default()
                .content(messages::bot_cannot_post(channel.id))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    if let Err(e) = ctx
        .data()
        .config
        .set_feedback_channel(&guild_id.to_string(), channel.id.get())
    {
        warn!("Error saving config file: {}", e);
    }
    info!("Feedback channel set to {} in guild {}", channel.id, guild_id);

    ctx.send(
        poise::CreateReply::default()
            .content(messages::feedback_channel_set(channel.id))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
