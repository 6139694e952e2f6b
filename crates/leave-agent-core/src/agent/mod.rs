//! The leave management agent
//!
//! [`Agent::start`] discovers tools and loads the system prompt,
//! [`Agent::handle_input`] runs one operator input through the model and at
//! most one tool call, and [`Agent::run`] drives that over a line console.

mod error;
mod repl;
mod session;

pub use error::{AgentError, AgentResult};
pub use repl::{GOODBYE_MESSAGE, INPUT_PROMPT, REPLY_PREFIX, WELCOME_MESSAGE};
pub use session::{system_prompt_content, Agent, AgentOptions, TurnOutcome, QUIT_COMMAND};
