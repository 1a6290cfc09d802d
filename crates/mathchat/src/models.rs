//! These models represent the objects passed around by the orchestrator
//!
//! There are a few related formats we need to interact with:
//! - chat requests sent from the client, which only carry user and assistant turns
//! - openai messages/tools, sent from the orchestrator to the LLM
//! - tool results, returned by the multiplication system
//!
//! We always immediately convert those data models into the internal structs using to/from
//! helpers, so the internal models are not an exact match to any of these formats.
pub mod conversation;
pub mod message;
pub mod role;
pub mod tool;
