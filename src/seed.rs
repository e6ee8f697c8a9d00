// 🌱 Test data - one agent with a house, two apartments and two contracts
//
// Every entity goes through the regular add operations, so each one is its
// own unit of work. A failure halfway leaves the earlier rows in place.

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use crate::entities::{
    Apartment, ContractBase, EstateAgent, EstateBase, House, Person, PurchaseContract,
    TenancyContract,
};
use crate::error::Result;
use crate::service::EstateService;

/// What the seed routine created
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub agent: EstateAgent,
    pub persons: Vec<Person>,
    pub house: House,
    pub apartments: Vec<Apartment>,
    pub purchase_contract: PurchaseContract,
    pub tenancy_contract: TenancyContract,
}

impl EstateService {
    /// Persist the demo data set
    pub fn add_test_data(&self) -> Result<SeedReport> {
        let now = Utc::now();
        let today = now.date_naive();
        let tenancy_date = (now - Duration::seconds(1_000_000)).date_naive();
        self.add_test_data_dated(today, tenancy_date)
    }

    /// Same as `add_test_data` with explicit dates
    pub fn add_test_data_dated(&self, today: NaiveDate, tenancy_date: NaiveDate) -> Result<SeedReport> {
        let mut agent = EstateAgent::new("Max Mustermann", "Am Informatikum 9", "max", "max");
        self.add_estate_agent(&mut agent)?;

        let mut erika = Person::new("Erika", "Mustermann", "Informatikum");
        let mut hans = Person::new("Hans", "Albers", "Reeperbahn 9");
        self.add_person(&mut erika)?;
        self.add_person(&mut hans)?;

        let mut base = EstateBase::new("Hamburg", 22527, "Vogt-Kölln-Street", "2a", 384);
        base.set_manager(&agent);
        let mut house = House::new(base, 5, 10_000_000, true);
        self.add_house(&mut house)?;

        for estate in self.get_all_houses_for_estate_agent(&mut agent)? {
            info!(city = %estate.estate.city, "estate of {}", agent.name);
        }

        let mut hamburg = EstateBase::new("Hamburg", 22527, "Vogt-Kölln-Street", "3", 120);
        hamburg.set_manager(&agent);
        let mut hamburg_apartment = Apartment::new(hamburg, 4, 790, 0, false, true);
        self.add_apartment(&mut hamburg_apartment)?;

        let mut berlin = EstateBase::new("Berlin", 22527, "Vogt-Kölln-Street", "3", 120);
        berlin.set_manager(&agent);
        let mut berlin_apartment = Apartment::new(berlin, 4, 790, 0, false, true);
        self.add_apartment(&mut berlin_apartment)?;

        let mut purchase_contract = PurchaseContract::new(
            ContractBase::new(9234, today, "Hamburg"),
            5,
            4,
            house.clone(),
            erika.clone(),
        );
        self.add_purchase_contract(&mut purchase_contract)?;

        let mut tenancy_contract = TenancyContract::new(
            ContractBase::new(23112, tenancy_date, "Berlin"),
            today,
            36,
            65,
            berlin_apartment.clone(),
            hans.clone(),
        );
        self.add_tenancy_contract(&mut tenancy_contract)?;

        info!(agent = %agent.login, "test data added");

        Ok(SeedReport {
            agent,
            persons: vec![erika, hans],
            house,
            apartments: vec![hamburg_apartment, berlin_apartment],
            purchase_contract,
            tenancy_contract,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_creates_full_data_set() {
        let service = EstateService::open_in_memory().unwrap();
        let report = service.add_test_data().unwrap();

        assert_eq!(service.count::<EstateAgent>().unwrap(), 1);
        assert_eq!(service.count::<Person>().unwrap(), 2);
        assert_eq!(service.count::<House>().unwrap(), 1);
        assert_eq!(service.count::<Apartment>().unwrap(), 2);
        assert_eq!(service.count::<PurchaseContract>().unwrap(), 1);
        assert_eq!(service.count::<TenancyContract>().unwrap(), 1);

        // The refresh during seeding loaded the house into the agent
        assert_eq!(report.agent.estates.len(), 1);
    }

    #[test]
    fn test_seeded_contracts_belong_to_max() {
        let service = EstateService::open_in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2023, 4, 19).unwrap();
        let report = service.add_test_data_dated(today, earlier).unwrap();

        let mut max = service.get_estate_agent_by_login("max").unwrap();
        assert_eq!(max, report.agent);

        let tenancy = service.get_all_tenancy_contracts_for_estate_agent(&max).unwrap();
        assert_eq!(tenancy.len(), 1);
        let contract = tenancy.iter().next().unwrap();
        assert_eq!(contract.apartment.estate.city, "Berlin");
        assert_eq!(contract.contract_partner.full_name(), "Hans Albers");
        assert_eq!(contract.contract.date, earlier);
        assert_eq!(contract.start_date, today);

        let purchase = service.get_all_purchase_contracts_for_estate_agent(&max).unwrap();
        assert!(purchase.contains(&report.purchase_contract));

        assert_eq!(service.get_all_apartments_for_estate_agent(&mut max).unwrap().len(), 2);
    }
}
