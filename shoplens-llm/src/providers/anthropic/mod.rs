//! Anthropic (Claude) provider implementation

mod client;
mod enhancer;
mod types;

pub use client::AnthropicClient;
pub use enhancer::AnthropicEnhancer;
