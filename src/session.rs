//! Identity store for the logged-in user
//!
//! Persists the user id, username and admin flag of the current login,
//! together with the backend's session cookie, as a small JSON file. Only the
//! login/logout glue in [`crate::client`] reads or writes it; the dispatcher
//! and the response cache never do.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// File name of the session file inside the session directory
const SESSION_FILE: &str = "session.json";

/// Who is logged in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
    pub is_admin: bool,
}

/// Stored session state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The logged-in user, if any
    pub identity: Option<Identity>,
    /// `Cookie` header value for the backend (e.g. "sessionid=...")
    pub cookie: Option<String>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.user_id.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.username.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(|i| i.is_admin)
    }
}

/// Reads and writes the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Creates a SessionStore in the platform data directory
    ///
    /// Uses `~/.local/share/shenghang/` on Linux, or the equivalent on other
    /// platforms. Returns `None` if no home directory can be determined.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "shenghang")?;
        Some(Self {
            dir: project_dirs.data_local_dir().to_path_buf(),
        })
    }

    /// Creates a SessionStore rooted at a custom directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Loads the stored session
    ///
    /// A missing or unreadable file yields an empty (logged-out) session.
    pub fn load(&self) -> Session {
        let Ok(content) = fs::read_to_string(self.path()) else {
            return Session::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring corrupt session file: {}", e);
            Session::default()
        })
    }

    /// Writes the session, creating the directory if needed
    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.path(), json)
    }

    /// Removes the stored session; a missing file is not an error
    pub fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(self.path()) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
