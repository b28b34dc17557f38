use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Host to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Base URL of the chat backend
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Stream answers over SSE (disable to render answers in one shot)
    #[arg(long, env = "STREAMING")]
    pub streaming: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the retrieval-augmented chat API.
    pub base_url: String,
    /// Optional bearer token for the backend.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout towards the backend.
    pub timeout_secs: u64,
    /// Whether answers are streamed over SSE or fetched in one shot.
    pub streaming: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Product title shown in the page header.
    #[serde(default = "default_title")]
    pub title: String,
    /// Whether follow-up question chips are rendered under answers.
    #[serde(default = "default_show_followups")]
    pub show_followup_questions: bool,
    /// Example prompts offered on an empty conversation.
    #[serde(default = "default_examples")]
    pub examples: Vec<ExamplePrompt>,
    /// Machines selectable in the sidebar.
    #[serde(default = "default_machines")]
    pub machines: Vec<MachineConfig>,
}

/// A canned prompt suggestion.
///
/// `text` is what the user sees, `value` is what gets submitted - they are
/// usually identical but a shortened display text is allowed.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ExamplePrompt {
    pub text: String,
    pub value: String,
}

/// A machine whose manual the backend can answer about.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// Identifier sent to the backend with every question.
    pub id: String,
    /// Human-readable label shown in the selector.
    pub label: String,
    /// Optional image asset path shown above the selector.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Idle time after which a conversation is discarded.
    #[serde(default = "default_session_timeout")]
    pub timeout_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            show_followup_questions: default_show_followups(),
            examples: default_examples(),
            machines: default_machines(),
        }
    }
}

fn default_title() -> String {
    "Manual Assistant".to_string()
}

fn default_show_followups() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_session_timeout(),
        }
    }
}

fn default_session_timeout() -> u64 {
    30 * 60
}

fn default_examples() -> Vec<ExamplePrompt> {
    [
        "Describe the steps to Change Inductive Switch of the CSU Frame.",
        "Describe the steps to lubricate the linear unit",
    ]
    .into_iter()
    .map(|text| ExamplePrompt {
        text: text.to_string(),
        value: text.to_string(),
    })
    .collect()
}

fn default_machines() -> Vec<MachineConfig> {
    vec![MachineConfig {
        id: "tt3-2000".to_string(),
        label: "TT3/2000".to_string(),
        image: Some("/static/machines/tt3.png".to_string()),
    }]
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("backend.base_url", "http://127.0.0.1:8000")?
            .set_default("backend.timeout_secs", 60)?
            .set_default("backend.streaming", true)?;

        // Config file: explicit path first, ./config.{yaml,toml,...} as fallback.
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::new(path, FileFormat::Yaml));
        } else {
            builder = builder.add_source(File::with_name("config").required(false));
        }

        // Environment variables prefixed with MANUALCHAT_, e.g.
        // MANUALCHAT_SERVER__PORT=8000.
        builder = builder.add_source(
            Environment::with_prefix("MANUALCHAT")
                .separator("__")
                .try_parsing(true),
        );

        // CLI flags win over file and environment.
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(streaming) = cli.streaming {
            builder = builder.set_override("backend.streaming", streaming)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        Url::parse(&self.backend.base_url).map_err(|e| {
            config::ConfigError::Message(format!(
                "backend.base_url is not a valid URL ({}): {e}",
                self.backend.base_url
            ))
        })?;
        if self.ui.machines.is_empty() {
            return Err(config::ConfigError::Message(
                "ui.machines must list at least one machine".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::load_from_args(["manualchat"]).expect("defaults should load");
        assert_eq!(cfg.server.port, 3000);
        assert!(cfg.backend.streaming);
        assert_eq!(cfg.ui.machines[0].label, "TT3/2000");
        assert_eq!(cfg.ui.examples.len(), 2);
    }

    #[test]
    fn test_cli_overrides() {
        let cfg = AppConfig::load_from_args([
            "manualchat",
            "--port",
            "9100",
            "--backend-url",
            "http://backend:9000",
            "--streaming",
            "false",
        ])
        .expect("overrides should load");
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.backend.base_url, "http://backend:9000");
        assert!(!cfg.backend.streaming);
    }

    #[test]
    fn test_invalid_backend_url_rejected() {
        let err = AppConfig::load_from_args(["manualchat", "--backend-url", "not a url"]);
        assert!(err.is_err());
    }
}
