//! Conversation history kept for the model

mod transcript;

pub use transcript::{Transcript, DEFAULT_HISTORY_LIMIT};
