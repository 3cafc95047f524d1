// Slash command handlers
pub mod setup;
pub mod vouch;
