/// A single-turn generation request. The pipeline is stateless, so there
/// is no message history here, just the fully assembled prompt.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<i32>,
}

impl GenerateRequest {
    pub fn new(prompt: String) -> Self {
        Self {
            prompt,
            temperature: None,
            max_output_tokens: None,
        }
    }
}
