//! In-memory accounts and pets.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    pub pet_photo: String,
    pub user_id: String,
    pub created_at: String,
}

/// Editable pet attributes as submitted by clients.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PetForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub animal_type: String,
    #[serde(default)]
    pub age: String,
}

#[derive(Clone, Debug)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password: String,
    pub key: String,
}

#[derive(Debug, Default)]
pub struct Store {
    accounts: Vec<Account>,
    // Insertion order; listings reverse it.
    pets: Vec<Pet>,
}

impl Store {
    pub fn add_account(&mut self, email: &str, password: &str) -> &Account {
        self.accounts.push(Account {
            id: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            key: Uuid::new_v4().simple().to_string(),
        });
        &self.accounts[self.accounts.len() - 1]
    }

    /// Key for an exact email/password match. Empty values never match.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&Account> {
        if email.is_empty() || password.is_empty() {
            return None;
        }
        self.accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
    }

    pub fn account_by_key(&self, key: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.key == key)
    }

    /// Newest first; `owner` restricts to one account's pets.
    pub fn list(&self, owner: Option<&str>) -> Vec<Pet> {
        self.pets
            .iter()
            .rev()
            .filter(|p| owner.map_or(true, |id| p.user_id == id))
            .cloned()
            .collect()
    }

    pub fn insert(&mut self, owner: &str, form: PetForm, pet_photo: String) -> Pet {
        let pet = Pet {
            id: Uuid::new_v4().to_string(),
            name: form.name,
            animal_type: form.animal_type,
            age: form.age,
            pet_photo,
            user_id: owner.to_string(),
            created_at: timestamp(),
        };
        self.pets.push(pet.clone());
        pet
    }

    pub fn owned_mut(&mut self, owner: &str, pet_id: &str) -> Option<&mut Pet> {
        self.pets
            .iter_mut()
            .find(|p| p.id == pet_id && p.user_id == owner)
    }

    pub fn remove(&mut self, owner: &str, pet_id: &str) -> Option<Pet> {
        let idx = self
            .pets
            .iter()
            .position(|p| p.id == pet_id && p.user_id == owner)?;
        Some(self.pets.remove(idx))
    }
}

fn timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    format!("{secs:.4}")
}
