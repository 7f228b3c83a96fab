// Core moderation module - content moderation business logic.
// Models, the pure policy, and the service that picks a strategy.

pub mod moderation_models;
pub mod moderation_policy;
pub mod moderation_service;

pub use moderation_models::*;
pub use moderation_service::*;
