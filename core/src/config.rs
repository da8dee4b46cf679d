//! Test-run settings: service URL, credentials and fixture images.
//!
//! Loaded from a TOML file (missing file means defaults), then overridden
//! from the environment:
//!
//! | variable | field |
//! |---|---|
//! | `PETFRIENDS_CONFIG` | path of the TOML file (default `petfriends.toml`) |
//! | `PETFRIENDS_BASE_URL` | `base_url` |
//! | `PETFRIENDS_EMAIL` | `credentials.valid_email` |
//! | `PETFRIENDS_PASSWORD` | `credentials.valid_password` |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru";
pub const DEFAULT_CONFIG_FILE: &str = "petfriends.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,

    /// Whole-request timeout. Unset means the transport default.
    pub request_timeout_secs: Option<u64>,

    /// Cap on a response body. Unset means `transport::DEFAULT_BODY_LIMIT`.
    pub max_response_bytes: Option<u64>,

    pub credentials: CredentialSet,

    pub images: ImageFixtures,

    /// Directory relative image paths resolve against.
    #[serde(skip)]
    root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            max_response_bytes: None,
            credentials: CredentialSet::default(),
            images: ImageFixtures::default(),
            root: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialSet {
    pub valid_email: String,
    pub valid_password: String,
    pub invalid_email: String,
    pub invalid_password: String,
    pub invalid_auth_key: String,
}

impl Default for CredentialSet {
    fn default() -> Self {
        Self {
            valid_email: String::new(),
            valid_password: String::new(),
            invalid_email: "nobody@petfriends.invalid".to_string(),
            invalid_password: "not-the-password".to_string(),
            invalid_auth_key: "0000000000000000000000000000000000000000000000000000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFixtures {
    /// A real JPEG or PNG.
    pub valid_photo: PathBuf,
    /// Anything that is not an image.
    pub invalid_photo: PathBuf,
}

impl Default for ImageFixtures {
    fn default() -> Self {
        Self {
            valid_photo: PathBuf::from("fixtures/images/kot_morda.jpg"),
            invalid_photo: PathBuf::from("fixtures/images/kot-morda.txt"),
        }
    }
}

impl Settings {
    /// Load from `path`; a missing file yields defaults rooted at its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if !path.exists() {
            return Ok(Self {
                root,
                ..Self::default()
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.root = root;
        Ok(settings)
    }

    /// Load the file named by `PETFRIENDS_CONFIG`, then apply env overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = env_value("PETFRIENDS_CONFIG").unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
        let mut settings = Self::load(Path::new(&path))?;
        if let Some(url) = env_value("PETFRIENDS_BASE_URL") {
            settings.base_url = url;
        }
        if let Some(email) = env_value("PETFRIENDS_EMAIL") {
            settings.credentials.valid_email = email;
        }
        if let Some(password) = env_value("PETFRIENDS_PASSWORD") {
            settings.credentials.valid_password = password;
        }
        Ok(settings)
    }

    /// Defaults pointed at `base_url` with the given account, images rooted at `root`.
    pub fn for_account(base_url: &str, credentials: &Credentials, root: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.to_string(),
            credentials: CredentialSet {
                valid_email: credentials.email.clone(),
                valid_password: credentials.password.clone(),
                ..CredentialSet::default()
            },
            root: root.into(),
            ..Self::default()
        }
    }

    /// Fails when the valid account is not configured.
    pub fn require_credentials(&self) -> Result<(), ConfigError> {
        if self.credentials.valid_email.is_empty() || self.credentials.valid_password.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        Ok(())
    }

    pub fn valid_credentials(&self) -> Credentials {
        Credentials::new(&self.credentials.valid_email, &self.credentials.valid_password)
    }

    /// Every way of getting the credentials wrong, labelled.
    pub fn invalid_credentials(&self) -> Vec<(&'static str, Credentials)> {
        let c = &self.credentials;
        vec![
            ("wrong password", Credentials::new(&c.valid_email, &c.invalid_password)),
            ("wrong email", Credentials::new(&c.invalid_email, &c.valid_password)),
            ("empty email", Credentials::new("", &c.valid_password)),
            ("empty password", Credentials::new(&c.valid_email, "")),
        ]
    }

    pub fn valid_photo(&self) -> PathBuf {
        self.root.join(&self.images.valid_photo)
    }

    pub fn invalid_photo(&self) -> PathBuf {
        self.root.join(&self.images.invalid_photo)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .and_then(|v| if v.trim().is_empty() { None } else { Some(v) })
}
