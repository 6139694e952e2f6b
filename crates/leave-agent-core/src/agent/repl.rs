//! Line-based operator console

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::error::AgentResult;
use super::session::{Agent, TurnOutcome};
use crate::log_error;

pub const WELCOME_MESSAGE: &str = "Welcome! I am a Leave management agent. Type 'quit' to stop.";
pub const GOODBYE_MESSAGE: &str = "Goodbye!";
pub const INPUT_PROMPT: &str = "You: ";
pub const REPLY_PREFIX: &str = "Agent: ";

impl Agent {
    /// Read operator lines until `quit` or end of input.
    ///
    /// Failures of a single input are printed and the loop continues; only
    /// I/O errors on the console itself end the session early.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> AgentResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        output
            .write_all(format!("{}\n", WELCOME_MESSAGE).as_bytes())
            .await?;

        loop {
            output.write_all(INPUT_PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                output.write_all(b"\n").await?;
                break;
            };

            if line.trim().is_empty() {
                continue;
            }

            match self.handle_input(&line).await {
                Ok(TurnOutcome::Quit) => {
                    output
                        .write_all(format!("{}{}\n", REPLY_PREFIX, GOODBYE_MESSAGE).as_bytes())
                        .await?;
                    break;
                }
                Ok(TurnOutcome::Reply(text)) => {
                    output
                        .write_all(format!("{}{}\n", REPLY_PREFIX, text).as_bytes())
                        .await?;
                }
                Err(e) => {
                    log_error!(self.logger(), "[Agent] {}", e);
                    output.write_all(format!("Error: {}\n", e).as_bytes()).await?;
                }
            }
        }

        output.flush().await?;
        Ok(())
    }
}
