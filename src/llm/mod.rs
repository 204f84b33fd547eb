pub mod gemini;
pub mod provider;
pub mod types;

#[cfg(test)]
mod tests;

pub use gemini::GeminiProvider;
pub use provider::LlmProvider;
pub use types::GenerateRequest;
