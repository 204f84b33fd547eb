use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};

const DEFAULT_CHAT_MODEL: &str = "models/gemini-1.5-flash";
const DEFAULT_EMBED_MODEL: &str = "models/embedding-001";

/// Process configuration, resolved once at startup from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API key. Required; startup aborts without it.
    pub api_key: String,
    /// Text document the index is built from.
    pub document_path: PathBuf,
    /// Directory holding the persisted index. Its existence decides
    /// build vs load at startup.
    pub persist_dir: PathBuf,
    /// Directory for rolling log files.
    pub log_dir: PathBuf,
    /// How many chunks retrieval returns per query.
    pub top_k: usize,
    pub chat_model: String,
    pub embed_model: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = match env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => bail!("GEMINI_API_KEY not found in environment"),
        };

        let document_path = env::var("RESUME_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("resume.txt"));
        let persist_dir = env::var("PERSIST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./storage"));
        let log_dir = env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./logs"));

        let top_k = parse_env("SIMILARITY_TOP_K")?.unwrap_or(1).max(1);
        let chunk_size = parse_env("CHUNK_SIZE")?.unwrap_or(500);
        let chunk_overlap = parse_env("CHUNK_OVERLAP")?.unwrap_or(50);
        if chunk_overlap >= chunk_size {
            bail!(
                "CHUNK_OVERLAP ({}) must be smaller than CHUNK_SIZE ({})",
                chunk_overlap,
                chunk_size
            );
        }

        let port = parse_env::<u16>("PORT")?.unwrap_or(0);

        Ok(AppConfig {
            api_key,
            document_path,
            persist_dir,
            log_dir,
            top_k,
            chat_model: env::var("GEMINI_CHAT_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            embed_model: env::var("GEMINI_EMBED_MODEL")
                .unwrap_or_else(|_| DEFAULT_EMBED_MODEL.to_string()),
            chunk_size,
            chunk_overlap,
            port,
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> anyhow::Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {}: {:?}", name, raw))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}
