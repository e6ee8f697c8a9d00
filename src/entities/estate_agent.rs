// 🧑‍💼 Estate Agent Entity - manages estates
//
// The agent owns a collection of estates (one-to-many). The collection is
// loaded together with the agent and reloaded by `refresh`; it is not part of
// the agent's equality.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::estate::{Apartment, Estate, House};
use super::helper::FieldHasher;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstateAgent {
    /// Store-assigned identity (None until persisted)
    #[serde(default)]
    pub(crate) id: Option<i64>,

    pub name: String,
    pub address: String,
    pub login: String,

    #[serde(skip_serializing, default)]
    pub password: String,

    /// Estates this agent manages, as of the last load or refresh
    #[serde(default)]
    pub estates: Vec<Estate>,
}

impl EstateAgent {
    pub fn new(name: &str, address: &str, login: &str, password: &str) -> Self {
        EstateAgent {
            id: None,
            name: name.to_string(),
            address: address.to_string(),
            login: login.to_string(),
            password: password.to_string(),
            estates: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn houses(&self) -> impl Iterator<Item = &House> {
        self.estates.iter().filter_map(Estate::as_house)
    }

    pub fn apartments(&self) -> impl Iterator<Item = &Apartment> {
        self.estates.iter().filter_map(Estate::as_apartment)
    }

    pub fn hash_code(&self) -> i32 {
        FieldHasher::new()
            .text(&self.name)
            .text(&self.address)
            .text(&self.login)
            .text(&self.password)
            .finish()
    }
}

impl PartialEq for EstateAgent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.address == other.address
            && self.login == other.login
            && self.password == other.password
    }
}

impl Eq for EstateAgent {}

impl Hash for EstateAgent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EstateBase;

    #[test]
    fn test_estates_do_not_affect_equality() {
        let a = EstateAgent::new("Max Mustermann", "Am Informatikum 9", "max", "max");
        let mut b = a.clone();
        b.estates.push(Estate::from(House::new(
            EstateBase::new("Hamburg", 22527, "Vogt-Kölln-Street", "2a", 384),
            5,
            10_000_000,
            true,
        )));

        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn test_houses_and_apartments_split_estates() {
        let mut agent = EstateAgent::new("Max Mustermann", "Am Informatikum 9", "max", "max");
        let base = EstateBase::new("Hamburg", 22527, "Vogt-Kölln-Street", "3", 120);
        agent.estates.push(House::new(base.clone(), 2, 300_000, false).into());
        agent
            .estates
            .push(Apartment::new(base.clone(), 4, 790, 3, false, true).into());
        agent
            .estates
            .push(Apartment::new(base, 1, 500, 1, true, false).into());

        assert_eq!(agent.houses().count(), 1);
        assert_eq!(agent.apartments().count(), 2);
    }

    #[test]
    fn test_password_is_not_serialized() {
        let agent = EstateAgent::new("Max Mustermann", "Am Informatikum 9", "max", "secret");
        let json = serde_json::to_string(&agent).unwrap();

        assert!(json.contains("\"login\":\"max\""));
        assert!(!json.contains("secret"));
    }
}
