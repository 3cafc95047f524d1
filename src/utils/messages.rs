// All user-facing text for the vouch/feedback flow.
// Kept in one place so wording changes don't touch handler logic.

use poise::serenity_prelude::{self as serenity, Mentionable};

pub const DEFAULT_THANKYOU: &str = "Cảm ơn";

/// Footer branding for testimonial embeds
pub const STORE_FOOTER: &str = "LewLewStore • discord.gg/lewlewstore";
pub const TESTIMONIAL_AUTHOR: &str = "Cảm ơn quý khách đã ủng hộ !!!";
pub const TESTIMONIAL_COLOR: u32 = 0xfc44c2;

pub const STAR_EMOJI: &str = "<a:TwinklingStar:1388826311346356226>";
const GIVEAWAY_EMOJI: &str = "<:giveaway1:1388824182237958155>";

/// Channel where customers paste the copyable vouch snippet
const VOUCH_CHANNEL_ID: u64 = 1294909151515774999;

// Validation and authorization notices
pub const ERR_ADMIN_ONLY: &str = "❌ Bạn cần quyền Administrator để sử dụng lệnh này!";
pub const ERR_QUANTITY: &str = "❌ Số lượng phải lớn hơn 0!";
pub const ERR_PRODUCT_EMPTY: &str = "❌ Tên sản phẩm không được để trống!";
pub const ERR_PRICE_EMPTY: &str = "❌ Giá không được để trống!";
pub const ERR_BOT_BUYER: &str = "❌ Không thể tạo vouch cho bot!";
pub const ERR_NOT_BUYER: &str = "❌ Chỉ người mua mới có thể đánh giá!";
pub const ERR_SESSION_CLOSED: &str = "❌ Phiên đánh giá này đã kết thúc!";
pub const ERR_FEEDBACK_SEND: &str = "❌ Không thể gửi feedback, vui lòng thử lại!";
pub const ERR_COMMAND: &str = "❌ Có lỗi xảy ra khi thực hiện lệnh!";

pub const OK_THANKYOU_SET: &str = "✅ Đã thiết lập lời cảm ơn thành công!";
pub const OK_FEEDBACK_RECEIVED: &str = "✅ Cảm ơn feedback của bạn!";

/// Terminal content of the rating message once feedback is recorded
pub const COMPLETION_NOTICE: &str = "**LewLewStore** đã ghi nhận feedback của bạn\n\n\
    Cảm ơn bạn đã tin tưởng và sử dụng dịch vụ tại **LewLewStore**";

/// Copy-pasteable vouch line customers drop into the vouch channel
pub fn vouch_snippet(buyer: serenity::UserId, quantity: i64, product: &str, price: &str) -> String {
    format!(
        "+vouch {} x{} {} {} vnd legit",
        buyer.mention(),
        quantity,
        product,
        price
    )
}

/// Public announcement posted as the `/vouch` response
pub fn vouch_announcement(
    thankyou: &str,
    buyer: serenity::UserId,
    quantity: i64,
    product: &str,
    price: &str,
) -> String {
    format!(
        "🎉 **Giao dịch thành công!**\n\n\
        {thankyou} {mention}\n\n\
        **LewLewStore** xin bạn một ít phút để đánh giá dịch vụ tại đây nhé !!! \
        chúng mình luôn muốn lắng nghe góp ý của các bạn và cải thiện dịch vụ tại **LewLewStore**\n\n\
        ```{snippet}```\n\
        - Mình xin chút ít thời gian của bạn để ủng hộ mình 1 vouch bằng cách sao chép nội dung \
        ở trên và dán ở <#{vouch_channel}> hoặc 1 feedback bằng nút bên dưới \
        (có thể cả vừa vouch và feeddback nếu bạn muốn)",
        thankyou = thankyou,
        mention = buyer.mention(),
        snippet = vouch_snippet(buyer, quantity, product, price),
        vouch_channel = VOUCH_CHANNEL_ID,
    )
}

/// Direct message sent to the buyer after the vouch is posted
pub fn dm_order_complete(product: &str, origin_channel: serenity::ChannelId) -> String {
    format!(
        "{GIVEAWAY_EMOJI}Đơn hàng **{product}** của bạn đã hoàn thành\n\n\
        Bạn hãy vào {} để xác nhận đơn hàng và dành chút ít thời gian để đánh giá, \
        góp ý dịch vụ bên mình bạn nhé !!!",
        origin_channel.mention(),
    )
}

/// Ephemeral follow-up when the buyer's DMs are closed
pub fn dm_failed_warning(buyer: serenity::UserId) -> String {
    format!(
        "⚠️ Không thể gửi tin nhắn riêng cho {}. Vui lòng kiểm tra cài đặt tin nhắn riêng của bạn.",
        buyer.mention()
    )
}

pub fn feedback_channel_set(channel: serenity::ChannelId) -> String {
    format!("✅ Đã thiết lập kênh feedback: {}", channel.mention())
}

pub fn bot_cannot_post(channel: serenity::ChannelId) -> String {
    format!("❌ Bot không có quyền gửi tin nhắn trong {}!", channel.mention())
}

/// Line the testimonial embed is attached to
pub fn testimonial_intro(buyer: serenity::UserId) -> String {
    format!("Feedback của {}:", buyer.mention())
}

/// Visual star rating: the star emoji repeated once per star
pub fn star_rating(stars: u8) -> String {
    STAR_EMOJI.repeat(stars as usize)
}
