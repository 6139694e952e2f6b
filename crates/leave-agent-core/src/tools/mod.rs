//! Tool discovery and invocation
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  ToolRegistry                               │
//! │                                             │
//! │  - Discovers tools/resources once           │
//! │  - Normalises schemas for function calling  │
//! │  - Hands ModelToolSpecs to the provider     │
//! └─────────────────────────────────────────────┘
//!           │
//!           │ ToolBackend (discover, resources/read, tools/call)
//!           ▼
//! ┌──────────────────────┐  ┌──────────────────────┐
//! │  McpToolBackend      │  │  LocalToolBackend    │
//! │  one MCP connection  │  │  in-process leave    │
//! │  per request         │  │  service             │
//! └──────────────────────┘  └──────────────────────┘
//! ```

mod backend;
mod local;
mod registry;
mod remote;

pub use backend::{Discovery, ToolBackend};
pub use local::{LocalToolBackend, DEFAULT_SYSTEM_PROMPT, SYSTEM_PROMPT_URI};
pub use registry::{normalize_parameters, to_model_spec, ToolRegistry};
pub use remote::McpToolBackend;
