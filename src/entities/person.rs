// 👤 Person Entity - contract partner (buyer or tenant)

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::helper::FieldHasher;

/// A person that can sign purchase or tenancy contracts
///
/// Identity is assigned by the store on `add_person` and never changes after.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    /// Store-assigned identity (None until persisted)
    #[serde(default)]
    pub(crate) id: Option<i64>,

    pub firstname: String,
    pub name: String,
    pub address: String,
}

impl Person {
    pub fn new(firstname: &str, name: &str, address: &str) -> Self {
        Person {
            id: None,
            firstname: firstname.to_string(),
            name: name.to_string(),
            address: address.to_string(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// "Hans Albers"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.name)
    }

    /// Value hash over (firstname, name, address); identity is not part of it
    pub fn hash_code(&self) -> i32 {
        FieldHasher::new()
            .text(&self.firstname)
            .text(&self.name)
            .text(&self.address)
            .finish()
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.firstname == other.firstname
            && self.name == other.name
            && self.address == other.address
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}
