// 🏠 Estate Entities - houses and apartments
//
// An estate is one of two variants sharing a common base (location, area,
// manager). Filtering "all houses of an agent" is a match on the variant.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::estate_agent::EstateAgent;
use super::helper::FieldHasher;

// ============================================================================
// ESTATE BASE
// ============================================================================

/// Fields every estate has, regardless of variant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstateBase {
    /// Store-assigned identity (None until persisted)
    #[serde(default)]
    pub(crate) id: Option<i64>,

    pub city: String,
    pub postal_code: i32,
    pub street: String,
    pub street_number: String,
    pub square_area: i32,

    /// Identity of the managing estate agent
    pub manager_id: Option<i64>,
}

impl EstateBase {
    pub fn new(
        city: &str,
        postal_code: i32,
        street: &str,
        street_number: &str,
        square_area: i32,
    ) -> Self {
        EstateBase {
            id: None,
            city: city.to_string(),
            postal_code,
            street: street.to_string(),
            street_number: street_number.to_string(),
            square_area,
            manager_id: None,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Point this estate at its managing agent
    pub fn set_manager(&mut self, agent: &EstateAgent) {
        self.manager_id = agent.id();
    }

    pub fn is_managed_by(&self, agent: &EstateAgent) -> bool {
        self.manager_id.is_some() && self.manager_id == agent.id()
    }

    fn hash_code(&self) -> i32 {
        FieldHasher::new()
            .text(&self.city)
            .int(self.postal_code)
            .text(&self.street)
            .text(&self.street_number)
            .int(self.square_area)
            .finish()
    }

    fn same_fields(&self, other: &Self) -> bool {
        self.id == other.id
            && self.postal_code == other.postal_code
            && self.square_area == other.square_area
            && self.city == other.city
            && self.street == other.street
            && self.street_number == other.street_number
    }
}

// ============================================================================
// HOUSE
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct House {
    #[serde(flatten)]
    pub estate: EstateBase,

    pub floors: i32,
    pub price: i32,
    pub garden: bool,
}

impl House {
    pub fn new(estate: EstateBase, floors: i32, price: i32, garden: bool) -> Self {
        House {
            estate,
            floors,
            price,
            garden,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.estate.id
    }

    pub fn hash_code(&self) -> i32 {
        FieldHasher::extend(self.estate.hash_code())
            .int(self.floors)
            .int(self.price)
            .flag(self.garden)
            .finish()
    }
}

impl PartialEq for House {
    fn eq(&self, other: &Self) -> bool {
        self.estate.same_fields(&other.estate)
            && self.floors == other.floors
            && self.price == other.price
            && self.garden == other.garden
    }
}

impl Eq for House {}

impl Hash for House {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

// ============================================================================
// APARTMENT
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Apartment {
    #[serde(flatten)]
    pub estate: EstateBase,

    pub floor: i32,
    pub rent: i32,
    pub rooms: i32,
    pub balcony: bool,
    pub kitchen: bool,
}

impl Apartment {
    pub fn new(
        estate: EstateBase,
        floor: i32,
        rent: i32,
        rooms: i32,
        balcony: bool,
        kitchen: bool,
    ) -> Self {
        Apartment {
            estate,
            floor,
            rent,
            rooms,
            balcony,
            kitchen,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.estate.id
    }

    pub fn hash_code(&self) -> i32 {
        FieldHasher::extend(self.estate.hash_code())
            .int(self.floor)
            .int(self.rent)
            .int(self.rooms)
            .flag(self.balcony)
            .flag(self.kitchen)
            .finish()
    }
}

impl PartialEq for Apartment {
    fn eq(&self, other: &Self) -> bool {
        self.estate.same_fields(&other.estate)
            && self.floor == other.floor
            && self.rent == other.rent
            && self.rooms == other.rooms
            && self.balcony == other.balcony
            && self.kitchen == other.kitchen
    }
}

impl Eq for Apartment {}

impl Hash for Apartment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

// ============================================================================
// ESTATE (tagged variant)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstateKind {
    House,
    Apartment,
}

impl EstateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstateKind::House => "House",
            EstateKind::Apartment => "Apartment",
        }
    }
}

/// An estate managed by an agent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Estate {
    House(House),
    Apartment(Apartment),
}

impl Estate {
    pub fn kind(&self) -> EstateKind {
        match self {
            Estate::House(_) => EstateKind::House,
            Estate::Apartment(_) => EstateKind::Apartment,
        }
    }

    pub fn base(&self) -> &EstateBase {
        match self {
            Estate::House(house) => &house.estate,
            Estate::Apartment(apartment) => &apartment.estate,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.base().id
    }

    pub fn city(&self) -> &str {
        &self.base().city
    }

    pub fn as_house(&self) -> Option<&House> {
        match self {
            Estate::House(house) => Some(house),
            Estate::Apartment(_) => None,
        }
    }

    pub fn as_apartment(&self) -> Option<&Apartment> {
        match self {
            Estate::Apartment(apartment) => Some(apartment),
            Estate::House(_) => None,
        }
    }
}

impl From<House> for Estate {
    fn from(house: House) -> Self {
        Estate::House(house)
    }
}

impl From<Apartment> for Estate {
    fn from(apartment: Apartment) -> Self {
        Estate::Apartment(apartment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn hamburg() -> EstateBase {
        EstateBase::new("Hamburg", 22527, "Vogt-Kölln-Street", "2a", 384)
    }

    #[test]
    fn test_house_equality_includes_variant_fields() {
        let a = House::new(hamburg(), 5, 10_000_000, true);
        let mut b = a.clone();

        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());

        b.garden = false;
        assert_ne!(a, b);
        assert_ne!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn test_estate_equality_includes_id() {
        let mut a = House::new(hamburg(), 5, 10_000_000, true);
        let mut b = a.clone();
        a.estate.id = Some(1);
        b.estate.id = Some(2);

        assert_ne!(a, b);
        // Identity is not hashed
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn test_manager_is_not_part_of_equality() {
        let a = Apartment::new(hamburg(), 4, 790, 3, false, true);
        let mut b = a.clone();
        b.estate.manager_id = Some(99);

        assert_eq!(a, b);
    }

    #[test]
    fn test_variant_filtering() {
        let estates = vec![
            Estate::from(House::new(hamburg(), 5, 10_000_000, true)),
            Estate::from(Apartment::new(hamburg(), 4, 790, 3, false, true)),
            Estate::from(Apartment::new(hamburg(), 2, 650, 2, true, true)),
        ];

        let houses: HashSet<&House> = estates.iter().filter_map(Estate::as_house).collect();
        let apartments: HashSet<&Apartment> =
            estates.iter().filter_map(Estate::as_apartment).collect();

        assert_eq!(houses.len(), 1);
        assert_eq!(apartments.len(), 2);
        assert_eq!(estates[0].kind(), EstateKind::House);
        assert_eq!(estates[1].kind().as_str(), "Apartment");
        assert_eq!(estates[2].city(), "Hamburg");
    }

    #[test]
    fn test_estate_serializes_with_kind_tag() {
        let estate = Estate::from(Apartment::new(hamburg(), 4, 790, 3, false, true));
        let json = serde_json::to_value(&estate).unwrap();

        assert_eq!(json["kind"], "Apartment");
        assert_eq!(json["city"], "Hamburg");
        assert_eq!(json["rent"], 790);
    }
}
