// Hosted LLM access — Gemini behind the GenerativeModel trait.
//
// The trait is the seam: handlers hold Arc<dyn GenerativeModel>, so tests
// swap in a mock and the Gemini client stays the only place that knows the
// wire format. Prompt templates and reply parsing live with their flows
// (profanity judgment, role mapping).

pub mod gemini;
pub mod profanity;
pub mod role_mapping;
pub mod traits;
