use ::serenity::http::HttpError;
use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use crate::features::feedback::star_button_id;
use crate::models::session::VouchSession;
use crate::utils::messages;
use crate::{Context, Error};

/// Gửi thông tin vouch và khởi tạo feedback
#[poise::command(slash_command, guild_only)]
pub async fn vouch(
    ctx: Context<'_>,
    #[description = "Người mua"] buyer: serenity::User,
    #[description = "Số lượng"] quantity: i64,
    #[description = "Sản phẩm"] product: String,
    #[description = "Giá"] price: String,
) -> Result<(), Error> {
    if let Err(notice) = validate_vouch(quantity, &product, &price, buyer.bot) {
        ctx.send(poise::CreateReply::default().content(notice).ephemeral(true))
            .await?;
        return Ok(());
    }
    let guild_id = ctx.guild_id().ok_or("vouch used outside a guild")?;

    let data = ctx.data();
    let thankyou = data.config.thankyou(&guild_id.to_string());
    let announcement = messages::vouch_announcement(&thankyou, buyer.id, quantity, &product, &price);

    // Public confirmation carrying the five star buttons
    let reply = ctx
        .send(
            poise::CreateReply::default()
                .content(announcement)
                .components(star_buttons()),
        )
        .await?;
    let message_id = reply.message().await?.id;

    data.sessions.insert(
        message_id,
        VouchSession {
            buyer: buyer.id,
            buyer_face: buyer.face(),
            quantity,
            product: product.clone(),
            price,
            origin_channel: ctx.channel_id(),
        },
    );
    info!(
        "Vouch created for {} by {} in guild {}",
        buyer.id,
        ctx.author().id,
        guild_id
    );

    // Closed DMs get a visible warning; other DM failures only get logged
    let dm = serenity::CreateMessage::new()
        .content(messages::dm_order_complete(&product, ctx.channel_id()));
    match buyer.direct_message(ctx, dm).await {
        Ok(_) => info!("DM sent successfully to {}", buyer.id),
        Err(serenity::Error::Http(HttpError::UnsuccessfulRequest(resp)))
            if resp.status_code.as_u16() == 403 =>
        {
            warn!("Could not send DM to {} - DMs disabled", buyer.id);
            ctx.send(
                poise::CreateReply::default()
                    .content(messages::dm_failed_warning(buyer.id))
                    .ephemeral(true),
            )
            .await?;
        }
        Err(e) => error!("Error sending DM to {}: {:?}", buyer.id, e),
    }

    Ok(())
}

/// Input checks, in the order users see them. Returns the notice for the
/// first failing rule.
fn validate_vouch(
    quantity: i64,
    product: &str,
    price: &str,
    buyer_is_bot: bool,
) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err(messages::ERR_QUANTITY);
    }
    if product.trim().is_empty() {
        return Err(messages::ERR_PRODUCT_EMPTY);
    }
    if price.trim().is_empty() {
        return Err(messages::ERR_PRICE_EMPTY);
    }
    if buyer_is_bot {
        return Err(messages::ERR_BOT_BUYER);
    }
    Ok(())
}

fn star_buttons() -> Vec<serenity::CreateActionRow> {
    let buttons = (1..=5)
        .map(|stars| {
            serenity::CreateButton::new(star_button_id(stars))
                .label(format!("{stars} sao"))
                .style(serenity::ButtonStyle::Primary)
        })
        .collect();
    vec![serenity::CreateActionRow::Buttons(buttons)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_quantity() {
        assert_eq!(validate_vouch(0, "Keycap", "100k", false), Err(messages::ERR_QUANTITY));
        assert_eq!(validate_vouch(-3, "Keycap", "100k", false), Err(messages::ERR_QUANTITY));
    }

    #[test]
    fn rejects_blank_product_and_price() {
        assert_eq!(validate_vouch(1, "", "100k", false), Err(messages::ERR_PRODUCT_EMPTY));
        assert_eq!(validate_vouch(1, "   ", "100k", false), Err(messages::ERR_PRODUCT_EMPTY));
        assert_eq!(validate_vouch(1, "Keycap", "", false), Err(messages::ERR_PRICE_EMPTY));
        assert_eq!(validate_vouch(1, "Keycap", "\t ", false), Err(messages::ERR_PRICE_EMPTY));
    }

    #[test]
    fn rejects_bot_buyers() {
        assert_eq!(validate_vouch(1, "Keycap", "100k", true), Err(messages::ERR_BOT_BUYER));
    }

    #[test]
    fn checks_run_in_order() {
        // Quantity is reported first even when everything is wrong
        assert_eq!(validate_vouch(0, "", "", true), Err(messages::ERR_QUANTITY));
    }

    #[test]
    fn accepts_valid_input() {
        assert_eq!(validate_vouch(2, "Keycap", "100k", false), Ok(()));
    }
}
