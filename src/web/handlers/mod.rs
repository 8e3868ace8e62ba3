pub mod health;
pub mod language;
pub mod profanity;
pub mod role_mapping;
