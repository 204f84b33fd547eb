pub mod config;
pub mod errors;
pub mod index;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod server;
pub mod state;
pub mod vector_math;
