// 📄 Contract Entities - purchase and tenancy
//
// A purchase contract sells a house to a person; a tenancy contract rents an
// apartment to a person. The linked estate and person are loaded with the
// contract but are relationships, so they stay out of equality and hashing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::estate::{Apartment, House};
use super::helper::FieldHasher;
use super::person::Person;

// ============================================================================
// CONTRACT BASE
// ============================================================================

/// Fields shared by both contract kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractBase {
    /// Store-assigned identity (None until persisted)
    #[serde(default)]
    pub(crate) id: Option<i64>,

    pub contract_no: i32,
    pub date: NaiveDate,
    pub place: String,
}

impl ContractBase {
    pub fn new(contract_no: i32, date: NaiveDate, place: &str) -> Self {
        ContractBase {
            id: None,
            contract_no,
            date,
            place: place.to_string(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    fn hasher(&self) -> FieldHasher {
        FieldHasher::new()
            .int(self.contract_no)
            .date(self.date)
            .text(&self.place)
    }

    fn same_fields(&self, other: &Self) -> bool {
        self.id == other.id
            && self.contract_no == other.contract_no
            && self.date == other.date
            && self.place == other.place
    }
}

// ============================================================================
// PURCHASE CONTRACT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseContract {
    #[serde(flatten)]
    pub contract: ContractBase,

    pub no_of_installments: i32,
    pub interest_rate: i32,

    /// The house being sold
    pub house: House,

    /// The buyer
    pub contract_partner: Person,
}

impl PurchaseContract {
    pub fn new(
        contract: ContractBase,
        no_of_installments: i32,
        interest_rate: i32,
        house: House,
        contract_partner: Person,
    ) -> Self {
        PurchaseContract {
            contract,
            no_of_installments,
            interest_rate,
            house,
            contract_partner,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.contract.id
    }

    pub fn hash_code(&self) -> i32 {
        self.contract
            .hasher()
            .int(self.no_of_installments)
            .int(self.interest_rate)
            .finish()
    }
}

impl PartialEq for PurchaseContract {
    fn eq(&self, other: &Self) -> bool {
        self.contract.same_fields(&other.contract)
            && self.no_of_installments == other.no_of_installments
            && self.interest_rate == other.interest_rate
    }
}

impl Eq for PurchaseContract {}

impl Hash for PurchaseContract {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

// ============================================================================
// TENANCY CONTRACT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenancyContract {
    #[serde(flatten)]
    pub contract: ContractBase,

    pub start_date: NaiveDate,

    /// Duration in months
    pub duration: i32,
    pub additional_costs: i32,

    /// The apartment being rented
    pub apartment: Apartment,

    /// The tenant
    pub contract_partner: Person,
}

impl TenancyContract {
    pub fn new(
        contract: ContractBase,
        start_date: NaiveDate,
        duration: i32,
        additional_costs: i32,
        apartment: Apartment,
        contract_partner: Person,
    ) -> Self {
        TenancyContract {
            contract,
            start_date,
            duration,
            additional_costs,
            apartment,
            contract_partner,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.contract.id
    }

    pub fn hash_code(&self) -> i32 {
        self.contract
            .hasher()
            .date(self.start_date)
            .int(self.duration)
            .int(self.additional_costs)
            .finish()
    }
}

impl PartialEq for TenancyContract {
    fn eq(&self, other: &Self) -> bool {
        self.contract.same_fields(&other.contract)
            && self.start_date == other.start_date
            && self.duration == other.duration
            && self.additional_costs == other.additional_costs
    }
}

impl Eq for TenancyContract {}

impl Hash for TenancyContract {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EstateBase;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tenancy() -> TenancyContract {
        TenancyContract::new(
            ContractBase::new(23112, date(2023, 4, 1), "Berlin"),
            date(2023, 5, 1),
            36,
            65,
            Apartment::new(
                EstateBase::new("Berlin", 22527, "Vogt-Kölln-Street", "3", 120),
                4,
                790,
                0,
                false,
                true,
            ),
            Person::new("Hans", "Albers", "Reeperbahn 9"),
        )
    }

    #[test]
    fn test_linked_entities_do_not_affect_equality() {
        let a = tenancy();
        let mut b = tenancy();
        b.contract_partner = Person::new("Erika", "Mustermann", "Informatikum");
        b.apartment.rent = 1200;

        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn test_contract_fields_affect_equality() {
        let a = tenancy();
        let mut b = tenancy();
        b.duration = 12;

        assert_ne!(a, b);

        let mut c = tenancy();
        c.contract.date = date(2023, 4, 2);
        assert_ne!(a, c);
        assert_ne!(a.hash_code(), c.hash_code());
    }

    #[test]
    fn test_purchase_contract_equality() {
        let house = House::new(
            EstateBase::new("Hamburg", 22527, "Vogt-Kölln-Street", "2a", 384),
            5,
            10_000_000,
            true,
        );
        let buyer = Person::new("Erika", "Mustermann", "Informatikum");
        let a = PurchaseContract::new(
            ContractBase::new(9234, date(2023, 4, 1), "Hamburg"),
            5,
            4,
            house.clone(),
            buyer.clone(),
        );
        let mut b = a.clone();
        assert_eq!(a, b);

        b.interest_rate = 5;
        assert_ne!(a, b);
    }
}
