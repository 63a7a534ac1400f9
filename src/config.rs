use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    #[serde(default = "default_upload_chunk_size")]
    pub upload_chunk_size_kb: usize,

    // Unset means no body limit at all; videos can be arbitrarily large.
    pub max_upload_size_mb: Option<u64>,

    // Comma separated. Unset, or containing `*`, allows any origin.
    pub cors_allowed_origins: Option<String>,

    #[serde(default)]
    pub sanitize_filenames: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_upload_chunk_size() -> usize {
    64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upload_dir: default_upload_dir(),
            upload_chunk_size_kb: default_upload_chunk_size(),
            max_upload_size_mb: None,
            cors_allowed_origins: None,
            sanitize_filenames: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn upload_chunk_size_bytes(&self) -> usize {
        self.upload_chunk_size_kb.max(1).saturating_mul(1024)
    }

    pub fn max_request_body_bytes(&self) -> Option<usize> {
        // Allow some overhead for multipart boundaries/headers.
        self.max_upload_size_mb.map(|mb| {
            let bytes = mb.saturating_add(10).saturating_mul(1024 * 1024);
            usize::try_from(bytes).unwrap_or(usize::MAX)
        })
    }

    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_allowed_origins
            .as_deref()?
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
