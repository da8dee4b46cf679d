//! In-process double of the Pet Friends service.
//!
//! `Mode::Strict` answers the way the service's contract says it should.
//! `Mode::Lenient` reproduces what the live service actually does with bad
//! input: invalid names, ages and photos are accepted with 200, and deleting
//! an unknown pet is a silent 200.

pub mod error;
pub mod store;
pub mod validate;

use std::{collections::HashMap, str::FromStr, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub use error::ServiceError;
pub use store::{Pet, PetForm, Store};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Strict,
    Lenient,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Mode::Strict),
            "lenient" => Ok(Mode::Lenient),
            other => Err(format!("unknown mode `{other}`, expected strict or lenient")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountSeed {
    pub email: String,
    pub password: String,
}

impl AccountSeed {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockConfig {
    pub mode: Mode,
    pub accounts: Vec<AccountSeed>,
}

impl MockConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            accounts: Vec::new(),
        }
    }

    pub fn with_account(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.accounts.push(AccountSeed::new(email, password));
        self
    }

    /// `MOCK_MODE`, `MOCK_EMAIL`, `MOCK_PASSWORD`, with a demo account as fallback.
    pub fn from_env() -> Result<Self, String> {
        let mode = match std::env::var("MOCK_MODE") {
            Ok(value) => value.parse()?,
            Err(_) => Mode::default(),
        };
        let email = std::env::var("MOCK_EMAIL").unwrap_or_else(|_| "demo@petfriends.local".to_string());
        let password = std::env::var("MOCK_PASSWORD").unwrap_or_else(|_| "demo".to_string());
        Ok(Self::new(mode).with_account(email, password))
    }
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
    mode: Mode,
}

pub fn app(config: MockConfig) -> Router {
    let mut store = Store::default();
    for seed in &config.accounts {
        store.add_account(&seed.email, &seed.password);
    }
    let state = AppState {
        store: Arc::new(RwLock::new(store)),
        mode: config.mode,
    };
    Router::new()
        .route("/api/key", get(get_api_key).post(get_api_key))
        .route("/api/pets", get(list_pets).post(create_pet))
        .route("/api/create_pet_simple", post(create_pet_simple))
        .route("/api/pets/{pet_id}", put(update_pet).delete(delete_pet))
        .route("/api/pets/set_photo/{pet_id}", post(set_photo))
        .with_state(state)
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default)]
    filter: String,
}

/// Owner id for the `auth_key` header.
async fn caller(state: &AppState, headers: &HeaderMap) -> Result<String, ServiceError> {
    let key = headers
        .get("auth_key")
        .and_then(|v| v.to_str().ok())
        .ok_or(ServiceError::Forbidden)?;
    let store = state.store.read().await;
    store
        .account_by_key(key)
        .map(|a| a.id.clone())
        .ok_or(ServiceError::Forbidden)
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn get_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ServiceError> {
    let store = state.store.read().await;
    let account = store
        .authenticate(header(&headers, "email"), header(&headers, "password"))
        .ok_or(ServiceError::Forbidden)?;
    debug!(email = %account.email, "issued auth key");
    Ok(Json(json!({ "key": account.key })))
}

async fn list_pets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ServiceError> {
    let owner = caller(&state, &headers).await?;
    let owner = match query.filter.as_str() {
        "" => None,
        "my_pets" => Some(owner.as_str()),
        _ => return Err(ServiceError::bad_request("filter must be empty or my_pets")),
    };
    let pets = state.store.read().await.list(owner);
    Ok(Json(json!({ "pets": pets })))
}

/// Text fields and the `pet_photo` file of a multipart body.
#[derive(Default)]
struct Upload {
    fields: HashMap<String, String>,
    photo: Option<Vec<u8>>,
}

impl Upload {
    async fn read(mut multipart: Multipart) -> Result<Self, ServiceError> {
        let mut upload = Upload::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if name == "pet_photo" {
                upload.photo = Some(field.bytes().await?.to_vec());
            } else {
                upload.fields.insert(name, field.text().await?);
            }
        }
        Ok(upload)
    }

    fn form(&mut self) -> PetForm {
        PetForm {
            name: self.fields.remove("name").unwrap_or_default(),
            animal_type: self.fields.remove("animal_type").unwrap_or_default(),
            age: self.fields.remove("age").unwrap_or_default(),
        }
    }
}

fn check_form(mode: Mode, form: &PetForm) -> Result<(), ServiceError> {
    if mode == Mode::Lenient {
        return Ok(());
    }
    validate::check_label("name", &form.name)?;
    validate::check_label("animal_type", &form.animal_type)?;
    validate::check_age(&form.age)
}

async fn create_pet(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<Pet>, ServiceError> {
    let owner = caller(&state, &headers).await?;
    let mut upload = Upload::read(multipart).await?;
    let form = upload.form();
    check_form(state.mode, &form)?;

    let bytes = upload.photo.unwrap_or_default();
    let pet_photo = match (validate::photo_data_uri(&bytes), state.mode) {
        (Some(uri), _) => uri,
        // Live behaviour: the pet is created, the photo silently dropped.
        (None, Mode::Lenient) => String::new(),
        (None, Mode::Strict) => {
            return Err(ServiceError::bad_request("pet_photo must be a JPEG or PNG image"))
        }
    };

    let pet = state.store.write().await.insert(&owner, form, pet_photo);
    info!(pet_id = %pet.id, name = %pet.name, "pet created");
    Ok(Json(pet))
}

async fn create_pet_simple(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PetForm>,
) -> Result<Json<Pet>, ServiceError> {
    let owner = caller(&state, &headers).await?;
    check_form(state.mode, &form)?;
    let pet = state.store.write().await.insert(&owner, form, String::new());
    info!(pet_id = %pet.id, name = %pet.name, "pet created without photo");
    Ok(Json(pet))
}

async fn update_pet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(pet_id): Path<String>,
    Form(form): Form<PetForm>,
) -> Result<Json<Pet>, ServiceError> {
    let owner = caller(&state, &headers).await?;
    check_form(state.mode, &form)?;
    let mut store = state.store.write().await;
    let pet = store
        .owned_mut(&owner, &pet_id)
        .ok_or_else(|| ServiceError::bad_request("no such pet"))?;
    pet.name = form.name;
    pet.animal_type = form.animal_type;
    pet.age = form.age;
    info!(pet_id = %pet.id, "pet updated");
    Ok(Json(pet.clone()))
}

async fn delete_pet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(pet_id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let owner = caller(&state, &headers).await?;
    let removed = state.store.write().await.remove(&owner, &pet_id);
    match (removed, state.mode) {
        (Some(pet), _) => {
            info!(pet_id = %pet.id, "pet deleted");
            Ok(StatusCode::OK)
        }
        (None, Mode::Lenient) => {
            debug!(%pet_id, "delete of unknown pet ignored");
            Ok(StatusCode::OK)
        }
        (None, Mode::Strict) => Err(ServiceError::bad_request("no such pet")),
    }
}

async fn set_photo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(pet_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Pet>, ServiceError> {
    let owner = caller(&state, &headers).await?;
    let upload = Upload::read(multipart).await?;
    let pet_photo = upload
        .photo
        .as_deref()
        .and_then(validate::photo_data_uri)
        .ok_or_else(|| ServiceError::bad_request("pet_photo must be a JPEG or PNG image"))?;

    let mut store = state.store.write().await;
    let pet = store
        .owned_mut(&owner, &pet_id)
        .ok_or_else(|| ServiceError::bad_request("no such pet"))?;
    pet.pet_photo = pet_photo;
    info!(pet_id = %pet.id, "pet photo set");
    Ok(Json(pet.clone()))
}
