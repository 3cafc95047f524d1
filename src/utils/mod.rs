// Utility functions module
pub mod messages;
pub mod store;
