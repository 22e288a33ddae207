//! Backend adapters implementing [`ProviderAdapter`](llm_plus_application::ProviderAdapter)

pub mod anthropic;
pub mod debug;
pub mod gemini;
pub mod http;
pub mod openai;
pub mod registry;

pub use anthropic::AnthropicAdapter;
pub use debug::DebugAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;
pub use registry::{ProviderRegistry, RegistryError};
