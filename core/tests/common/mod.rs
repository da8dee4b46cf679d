//! Shared harness for the integration suites.
//!
//! # Design
//! Every test gets its own service double on a random port with a single
//! sandbox account, so no test sees another test's pets. `Sandbox` holds an
//! authenticated session, seeds the pets a test needs and deletes whatever
//! it created on drop, which keeps live runs from accumulating fixtures.

#![allow(dead_code)]

pub mod scenarios;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Once;

use mock_server::{MockConfig, Mode};
use petfriends_core::{ApiResponse, AuthKey, Credentials, Pet, PetFields, PetFilter, PetFriends, PetList, Settings};
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub const SANDBOX_EMAIL: &str = "sandbox@petfriends.local";
pub const SANDBOX_PASSWORD: &str = "sandbox-password";
pub const NEIGHBOUR_EMAIL: &str = "neighbour@petfriends.local";
pub const NEIGHBOUR_PASSWORD: &str = "neighbour-password";

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with_test_writer()
            .try_init();
    });
}

pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")))
}

/// Start a service double on a random port and return its base URL.
pub fn spawn_mock(config: MockConfig) -> String {
    init_tracing();
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, config).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Settings for a fresh double holding the sandbox account and a neighbour.
pub fn mock_settings(mode: Mode) -> Settings {
    let base_url = spawn_mock(
        MockConfig::new(mode)
            .with_account(SANDBOX_EMAIL, SANDBOX_PASSWORD)
            .with_account(NEIGHBOUR_EMAIL, NEIGHBOUR_PASSWORD),
    );
    Settings::for_account(
        &base_url,
        &Credentials::new(SANDBOX_EMAIL, SANDBOX_PASSWORD),
        workspace_root(),
    )
}

/// Live settings from `petfriends.toml` / environment. Panics when the
/// account is not configured.
pub fn live_settings() -> Settings {
    init_tracing();
    let settings = Settings::from_env().unwrap_or_else(|e| panic!("loading settings: {e}"));
    if let Err(e) = settings.require_credentials() {
        panic!("{e}");
    }
    settings
}

pub fn morda() -> PetFields {
    PetFields::new("Morda", "kot", "3")
}

/// One authenticated session plus the pets it is responsible for.
pub struct Sandbox {
    pub api: PetFriends,
    pub key: AuthKey,
    pub settings: Settings,
    created: RefCell<Vec<String>>,
}

impl Sandbox {
    /// Authenticate with the settings' valid account.
    pub fn open(settings: Settings) -> Self {
        let credentials = settings.valid_credentials();
        Self::open_as(settings, &credentials)
    }

    pub fn open_as(settings: Settings, credentials: &Credentials) -> Self {
        let api = PetFriends::from_settings(&settings);
        let resp = api
            .get_auth_key(&credentials.email, &credentials.password)
            .expect("auth request failed");
        let key = resp
            .auth_key()
            .unwrap_or_else(|| panic!("sandbox login failed with status {}", resp.status));
        Self {
            api,
            key,
            settings,
            created: RefCell::new(Vec::new()),
        }
    }

    /// Remember the pet in a successful create response for teardown.
    pub fn track(&self, resp: &ApiResponse) {
        if resp.is_success() {
            if let Some(id) = resp.field_str("id") {
                self.created.borrow_mut().push(id.to_string());
            }
        }
    }

    /// The pet was deleted by the test itself.
    pub fn forget(&self, pet_id: &str) {
        self.created.borrow_mut().retain(|id| id != pet_id);
    }

    pub fn seed_pet(&self) -> Pet {
        let resp = self
            .api
            .add_new_pet_no_photo(&self.key, &PetFields::new("Slonik", "Slon", "69"))
            .unwrap();
        assert_eq!(resp.status, 200, "seeding a pet failed: {:?}", resp.body);
        self.track(&resp);
        resp.pet().unwrap()
    }

    pub fn seed_pet_with_photo(&self) -> Pet {
        let resp = self
            .api
            .add_new_pet(&self.key, &PetFields::new("Суперкот", "Kat", "4"), self.settings.valid_photo())
            .unwrap();
        assert_eq!(resp.status, 200, "seeding a pet failed: {:?}", resp.body);
        self.track(&resp);
        resp.pet().unwrap()
    }

    pub fn my_pets(&self) -> PetList {
        let resp = self.api.get_list_of_pets(&self.key, PetFilter::MyPets).unwrap();
        assert_eq!(resp.status, 200);
        resp.pet_list().unwrap()
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        for pet_id in self.created.get_mut().drain(..) {
            match self.api.delete_pet(&self.key, &pet_id) {
                Ok(resp) if resp.is_success() => {}
                Ok(resp) => warn!(%pet_id, status = resp.status, "teardown delete rejected"),
                Err(e) => warn!(%pet_id, error = %e, "teardown delete failed"),
            }
        }
    }
}
