//! Command-line interface parsing for the ShengHang client
//!
//! This module defines the `shenghang` command tree using clap and turns the
//! global flags into a [`ClientConfig`].

use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

use crate::config::{ClientConfig, ConfigError};
use crate::endpoints::comment::DEFAULT_COMMENT_SORT;
use crate::endpoints::favorite::DEFAULT_TOP_LIMIT;
use crate::endpoints::songlist::DEFAULT_LIST_SORT;
use crate::endpoints::TargetKind;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid JSON argument: {0}")]
    InvalidJson(String),

    #[error("Invalid HTTP method: '{0}'")]
    InvalidMethod(String),

    #[error("{0}")]
    InvalidTargetKind(String),
}

/// ShengHang music platform client
#[derive(Parser, Debug)]
#[command(name = "shenghang")]
#[command(about = "Browse and manage the ShengHang music platform from the terminal")]
#[command(version)]
pub struct Cli {
    /// Backend address, e.g. http://127.0.0.1:8000 (overrides SHENGHANG_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Response cache lifetime in seconds (overrides SHENGHANG_CACHE_TTL_SECS)
    #[arg(long, global = true, value_name = "SECS")]
    pub cache_ttl: Option<u32>,

    /// Print progress notices while requests are running
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an account
    Register {
        username: String,
        #[arg(long, env = "SHENGHANG_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and remember the session
    Login {
        username: String,
        #[arg(long, env = "SHENGHANG_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the session
    Logout,
    /// Show the logged-in user's profile
    Whoami,
    /// Search the catalogue
    Search {
        #[arg(value_enum)]
        kind: SearchKind,
        query: String,
    },
    /// Show one item by id
    Show {
        #[arg(value_enum)]
        kind: ShowKind,
        id: u64,
    },
    /// List song lists
    Songlists {
        /// Only public song lists
        #[arg(long, conflicts_with = "private")]
        public: bool,
        /// Only private song lists
        #[arg(long)]
        private: bool,
        #[arg(long, default_value = DEFAULT_LIST_SORT)]
        sort_by: String,
    },
    /// Manage favorites
    #[command(subcommand)]
    Favorites(FavoriteCommand),
    /// Show comments on a song, album or song list
    Comments {
        #[arg(value_parser = parse_target_kind)]
        kind: TargetKind,
        id: u64,
        #[arg(long, default_value = DEFAULT_COMMENT_SORT)]
        sort_by: String,
    },
    /// Comment on a song, album or song list
    Comment {
        #[arg(value_parser = parse_target_kind)]
        kind: TargetKind,
        id: u64,
        content: String,
        /// Reply to an existing comment
        #[arg(long, value_name = "COMMENT_ID")]
        reply_to: Option<u64>,
    },
    /// Record that a song was played
    Play {
        song_id: u64,
        /// Listening time in seconds; sampled when omitted
        #[arg(long)]
        duration: Option<u32>,
    },
    /// Show a listening report
    Report(ReportArgs),
    /// Send a raw request to any endpoint
    Request {
        #[arg(value_parser = parse_method)]
        method: Method,
        endpoint: String,
        /// JSON request body
        #[arg(long, value_parser = parse_json_arg)]
        data: Option<Value>,
    },
}

/// Favorite subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum FavoriteCommand {
    /// List your favorites
    List,
    /// Add a favorite
    Add {
        #[arg(value_parser = parse_target_kind)]
        kind: TargetKind,
        id: u64,
    },
    /// Remove a favorite
    Remove {
        #[arg(value_parser = parse_target_kind)]
        kind: TargetKind,
        id: u64,
    },
    /// Most favorited items on the platform
    Top {
        #[arg(value_parser = parse_target_kind)]
        kind: TargetKind,
        #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
        limit: u32,
    },
}

/// Arguments for `report`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ReportArgs {
    /// week, month, all or self-defined
    #[arg(long, default_value = "week")]
    pub range: String,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end: Option<String>,
}

/// Catalogue areas that can be searched
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Song,
    Album,
    Singer,
    Songlist,
    User,
}

/// Items that can be shown by id
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowKind {
    Song,
    Album,
    Singer,
    Songlist,
    User,
}

/// Parses a JSON argument such as `--data '{"song_title": "x"}'`
pub fn parse_json_arg(s: &str) -> Result<Value, CliError> {
    serde_json::from_str(s).map_err(|e| CliError::InvalidJson(e.to_string()))
}

/// Parses an HTTP method name, case-insensitively
pub fn parse_method(s: &str) -> Result<Method, CliError> {
    Method::from_bytes(s.to_uppercase().as_bytes())
        .map_err(|_| CliError::InvalidMethod(s.to_string()))
}

/// Parses a favorite/comment target kind
pub fn parse_target_kind(s: &str) -> Result<TargetKind, CliError> {
    s.parse().map_err(CliError::InvalidTargetKind)
}

impl Cli {
    /// Client settings from the environment, overridden by global flags
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url)?;
        }
        if let Some(ttl) = self.cache_ttl {
            config = config.with_cache_ttl_secs(ttl);
        }
        Ok(config)
    }
}

impl Command {
    /// Whether the command needs a stored login
    pub fn requires_login(&self) -> bool {
        !matches!(
            self,
            Command::Register { .. }
                | Command::Login { .. }
                | Command::Logout
                | Command::Search { .. }
                | Command::Show { .. }
                | Command::Songlists { .. }
                | Command::Comments { .. }
                | Command::Request { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cli_parse_login() {
        let cli = Cli::parse_from(["shenghang", "login", "alice", "--password", "secret"]);
        assert_eq!(
            cli.command,
            Command::Login {
                username: "alice".to_string(),
                password: "secret".to_string(),
            }
        );
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "shenghang",
            "logout",
            "--base-url",
            "http://localhost:9000",
            "--cache-ttl",
            "60",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.cache_ttl, Some(60));
    }

    #[test]
    fn test_cli_parse_search() {
        let cli = Cli::parse_from(["shenghang", "search", "song", "moon"]);
        assert_eq!(
            cli.command,
            Command::Search {
                kind: SearchKind::Song,
                query: "moon".to_string(),
            }
        );
    }

    #[test]
    fn test_cli_parse_favorites_add() {
        let cli = Cli::parse_from(["shenghang", "favorites", "add", "album", "12"]);
        assert_eq!(
            cli.command,
            Command::Favorites(FavoriteCommand::Add {
                kind: TargetKind::Album,
                id: 12,
            })
        );
    }

    #[test]
    fn test_cli_parse_songlists_defaults() {
        let cli = Cli::parse_from(["shenghang", "songlists", "--public"]);
        assert_eq!(
            cli.command,
            Command::Songlists {
                public: true,
                private: false,
                sort_by: "create_time".to_string(),
            }
        );
    }

    #[test]
    fn test_cli_rejects_public_and_private() {
        let result = Cli::try_parse_from(["shenghang", "songlists", "--public", "--private"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_raw_request() {
        let cli = Cli::parse_from([
            "shenghang",
            "request",
            "post",
            "/song/search_song/",
            "--data",
            r#"{"song_title": "moon"}"#,
        ]);
        assert_eq!(
            cli.command,
            Command::Request {
                method: Method::POST,
                endpoint: "/song/search_song/".to_string(),
                data: Some(json!({"song_title": "moon"})),
            }
        );
    }

    #[test]
    fn test_cli_rejects_invalid_target_kind() {
        let result = Cli::try_parse_from(["shenghang", "comments", "singer", "1"]);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Invalid target kind"));
    }

    #[test]
    fn test_parse_json_arg_invalid() {
        let result = parse_json_arg("{not json");
        assert!(matches!(result, Err(CliError::InvalidJson(_))));
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("get").unwrap(), Method::GET);
        assert_eq!(parse_method("DELETE").unwrap(), Method::DELETE);
        assert!(parse_method("not a method").is_err());
    }

    #[test]
    fn test_client_config_flag_overrides() {
        let cli = Cli::parse_from([
            "shenghang",
            "--base-url",
            "https://music.example.com/",
            "--cache-ttl",
            "10",
            "whoami",
        ]);
        let config = cli.client_config().unwrap();
        assert_eq!(config.base_url, "https://music.example.com");
        assert_eq!(config.cache_ttl, chrono::Duration::seconds(10));
    }

    #[test]
    fn test_requires_login() {
        assert!(Command::Whoami.requires_login());
        assert!(Command::Play {
            song_id: 1,
            duration: None
        }
        .requires_login());
        assert!(!Command::Logout.requires_login());
        assert!(!Command::Search {
            kind: SearchKind::Song,
            query: "x".to_string()
        }
        .requires_login());
    }
}
