// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "chat/chat_service.rs"]
pub mod chat;

#[path = "moderation/mod.rs"]
pub mod moderation;
