// Muzzle: profanity screening and role-to-competency mapping service
//
// This is the library root. Each module corresponds to a major subsystem:
// local classifier engines, the hosted LLM client, the cache layer, and the
// web API that ties them together.

pub mod cache;
pub mod classify;
pub mod config;
pub mod framework;
pub mod language;
pub mod llm;
pub mod output;
pub mod web;
