//! Contract scenarios, written once and run against both the strict double
//! and the live service.
//!
//! Each function takes the settings of the service under test and asserts
//! the behaviour the service is supposed to have. Against the live service
//! some of them fail; `known_defects.rs` pins what actually happens there.

use petfriends_core::{AuthKey, Credentials, PetFields, PetFilter, PetFriends, Settings};

use super::{morda, Sandbox};

// --- auth ---

pub fn auth_key_for_valid_user(settings: Settings) {
    let api = PetFriends::from_settings(&settings);
    let creds = settings.valid_credentials();
    let resp = api.get_auth_key(&creds.email, &creds.password).unwrap();
    assert_eq!(resp.status, 200);
    assert!(resp.auth_key().is_some(), "no key in {:?}", resp.body);
}

/// `variant` is one of the labels from `Settings::invalid_credentials`.
pub fn auth_key_rejected(settings: Settings, variant: &str) {
    let api = PetFriends::from_settings(&settings);
    let creds: Credentials = settings
        .invalid_credentials()
        .into_iter()
        .find(|(label, _)| *label == variant)
        .map(|(_, creds)| creds)
        .unwrap_or_else(|| panic!("no credential variant named {variant}"));
    let resp = api.get_auth_key(&creds.email, &creds.password).unwrap();
    assert_eq!(resp.status, 403, "{variant}");
    assert!(!resp.has_field("key"), "{variant}");
}

// --- create ---

pub fn add_new_pet_with_valid_data(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    let resp = sandbox
        .api
        .add_new_pet(&sandbox.key, &morda(), sandbox.settings.valid_photo())
        .unwrap();
    sandbox.track(&resp);
    assert_eq!(resp.status, 200);
    assert_eq!(resp.field_str("name"), Some("Morda"));
    assert!(resp.pet().unwrap().has_photo());
}

/// Same valid input twice, same echo twice.
pub fn add_new_pet_is_repeatable(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    for _ in 0..2 {
        let resp = sandbox
            .api
            .add_new_pet(&sandbox.key, &morda(), sandbox.settings.valid_photo())
            .unwrap();
        sandbox.track(&resp);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.field_str("name"), Some("Morda"));
    }
}

pub fn add_new_pet_no_photo_success(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    let fields = PetFields::new("Mordo4ka", "kotik", "1");
    let resp = sandbox.api.add_new_pet_no_photo(&sandbox.key, &fields).unwrap();
    sandbox.track(&resp);
    assert_eq!(resp.status, 200);
    assert_eq!(resp.field_str("name"), Some("Mordo4ka"));
    assert_eq!(resp.field_str("animal_type"), Some("kotik"));
    assert_eq!(resp.field_str("age"), Some("1"));
}

pub fn add_new_pet_with_invalid_key(settings: Settings) {
    let api = PetFriends::from_settings(&settings);
    let key = AuthKey::new(&settings.credentials.invalid_auth_key);
    let resp = api.add_new_pet(&key, &morda(), settings.valid_photo()).unwrap();
    assert_eq!(resp.status, 403);
    assert_ne!(resp.field_str("name"), Some("Morda"));
}

pub fn add_new_pet_wrong_photo(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    let resp = sandbox
        .api
        .add_new_pet(&sandbox.key, &morda(), sandbox.settings.invalid_photo())
        .unwrap();
    sandbox.track(&resp);
    assert_eq!(resp.status, 400);
    assert_ne!(resp.field_str("name"), Some("Morda"));
}

pub fn add_new_pet_wrong_name(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    let resp = sandbox
        .api
        .add_new_pet_no_photo(&sandbox.key, &PetFields::new("911", "kot", "3"))
        .unwrap();
    sandbox.track(&resp);
    assert_eq!(resp.status, 400);
    assert_ne!(resp.field_str("name"), Some("911"));
}

pub fn add_new_pet_wrong_age(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    let resp = sandbox
        .api
        .add_new_pet(
            &sandbox.key,
            &PetFields::new("Kitty", "cat", "-3.41"),
            sandbox.settings.valid_photo(),
        )
        .unwrap();
    sandbox.track(&resp);
    assert_eq!(resp.status, 400);
    assert_ne!(resp.field_str("name"), Some("Kitty"));
}

// --- list ---

pub fn get_all_pets_with_valid_key(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    let seeded = sandbox.seed_pet();
    let resp = sandbox.api.get_list_of_pets(&sandbox.key, PetFilter::All).unwrap();
    assert_eq!(resp.status, 200);
    let list = resp.pet_list().unwrap();
    assert!(!list.pets.is_empty());
    assert!(list.contains(&seeded.id));
}

/// `neighbour` is a second account on the same service.
pub fn my_pets_lists_only_own_pets(settings: Settings, neighbour: &Credentials) {
    let mine = Sandbox::open(settings.clone());
    let theirs = Sandbox::open_as(settings, neighbour);
    let own = mine.seed_pet();
    let foreign = theirs.seed_pet();

    let my_list = mine.my_pets();
    assert!(my_list.contains(&own.id));
    assert!(!my_list.contains(&foreign.id));
    assert!(my_list.pets.iter().all(|p| p.user_id == own.user_id));

    let resp = mine.api.get_list_of_pets(&mine.key, PetFilter::All).unwrap();
    assert_eq!(resp.status, 200);
    let everyone = resp.pet_list().unwrap();
    assert!(everyone.contains(&own.id));
    assert!(everyone.contains(&foreign.id));
}

// --- update ---

pub fn update_pet_info_success(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    let pet = sandbox.seed_pet();
    let resp = sandbox
        .api
        .update_pet(&sandbox.key, &pet.id, &PetFields::new("Kotya", "kisa", 13))
        .unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.field_str("name"), Some("Kotya"));
    // The service keeps ages as text even when they look numeric.
    assert!(resp.field("age").is_some_and(|age| age.is_string()));
}

pub fn update_missing_pet(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    let resp = sandbox
        .api
        .update_pet(&sandbox.key, "no-such-pet", &PetFields::new("Kotya", "kisa", 13))
        .unwrap();
    assert_eq!(resp.status, 400);
}

// --- delete ---

pub fn delete_pet_successfully(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    let pet = sandbox.seed_pet_with_photo();
    assert!(sandbox.my_pets().contains(&pet.id));

    let resp = sandbox.api.delete_pet(&sandbox.key, &pet.id).unwrap();
    sandbox.forget(&pet.id);
    assert_eq!(resp.status, 200);
    assert!(!sandbox.my_pets().contains(&pet.id));
}

pub const WRONG_PET_ID: &str =
    "aa8de17e-1214-4072-a7ff-13d5021fbd34aa8de17e-1214-4072-a7ff-13d5021fbd34";

pub fn delete_pet_with_wrong_id(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    let pet = sandbox.seed_pet();
    let resp = sandbox.api.delete_pet(&sandbox.key, WRONG_PET_ID).unwrap();
    assert_eq!(resp.status, 400);
    assert!(sandbox.my_pets().contains(&pet.id));
}

// --- photo ---

pub fn add_photo_of_pet_success(settings: Settings) {
    let sandbox = Sandbox::open(settings);
    let pet = sandbox.seed_pet();
    assert!(!pet.has_photo());

    let resp = sandbox
        .api
        .add_photo_of_pet(&sandbox.key, &pet.id, sandbox.settings.valid_photo())
        .unwrap();
    assert_eq!(resp.status, 200);

    let listed = sandbox.my_pets();
    let updated = listed
        .pets
        .iter()
        .find(|p| p.id == pet.id)
        .expect("pet vanished after photo upload");
    assert!(updated.has_photo());
}
