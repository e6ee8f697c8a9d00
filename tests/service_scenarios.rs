use chrono::NaiveDate;
use estate_service::{
    Apartment, ContractBase, DatabaseConfig, EstateAgent, EstateBase, EstateService, House,
    Person, ServiceConfig, TenancyContract,
};
use tempfile::TempDir;

fn file_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig {
        path: dir.path().join("estates.db"),
        ..DatabaseConfig::default()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_data_survives_reopening_the_database() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let agent_id = {
        let service = EstateService::open(&config).unwrap();
        let mut agent = EstateAgent::new("Max Mustermann", "Am Informatikum 9", "max", "max");
        service.add_estate_agent(&mut agent).unwrap();

        let mut base = EstateBase::new("Hamburg", 22527, "Vogt-Kölln-Street", "2a", 384);
        base.set_manager(&agent);
        service
            .add_house(&mut House::new(base, 5, 10_000_000, true))
            .unwrap();

        agent.id().unwrap()
    };

    let service = EstateService::open(&config).unwrap();
    let mut agent = service.get_estate_agent_by_id(agent_id).unwrap().unwrap();
    assert_eq!(agent.login, "max");

    let houses = service.get_all_houses_for_estate_agent(&mut agent).unwrap();
    assert_eq!(houses.len(), 1);
    assert_eq!(houses.iter().next().unwrap().estate.city, "Hamburg");
}

#[test]
fn test_tenancy_scenario_on_file_database() {
    let dir = TempDir::new().unwrap();
    let service = EstateService::open(&file_config(&dir)).unwrap();

    let mut max = EstateAgent::new("Max Mustermann", "Am Informatikum 9", "max", "max");
    service.add_estate_agent(&mut max).unwrap();

    let mut base = EstateBase::new("Hamburg", 22527, "Vogt-Kölln-Street", "3", 120);
    base.set_manager(&max);
    let mut apartment = Apartment::new(base, 4, 790, 2, false, true);
    service.add_apartment(&mut apartment).unwrap();

    let mut hans = Person::new("Hans", "Albers", "Reeperbahn 9");
    service.add_person(&mut hans).unwrap();

    let mut contract = TenancyContract::new(
        ContractBase::new(23112, date(2023, 4, 19), "Hamburg"),
        date(2023, 5, 1),
        36,
        65,
        apartment,
        hans,
    );
    service.add_tenancy_contract(&mut contract).unwrap();

    let contracts = service.get_all_tenancy_contracts_for_estate_agent(&max).unwrap();
    assert_eq!(contracts.len(), 1);
    assert!(contracts.contains(&contract));

    // Changing a detached value has no effect until update
    contract.duration = 24;
    let stored = service
        .get_tenancy_contract_by_id(contract.id().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(stored.duration, 36);

    service.update(&contract).unwrap();
    let stored = service
        .get_tenancy_contract_by_id(contract.id().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(stored.duration, 24);

    service.delete_tenancy_contract(&contract).unwrap();
    assert!(service
        .get_all_tenancy_contracts_for_estate_agent(&max)
        .unwrap()
        .is_empty());
}

#[test]
fn test_seed_on_file_database_with_config_file() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("seeded.db");
    let config_path = dir.path().join("estate.toml");
    std::fs::write(
        &config_path,
        format!(
            "[database]\npath = {:?}\nwal = true\n\n[logging]\nfilter = \"estate_service=debug\"\n",
            db_path.to_string_lossy()
        ),
    )
    .unwrap();

    let config = ServiceConfig::load(&config_path).unwrap();
    assert_eq!(config.database.path, db_path);

    let service = EstateService::open(&config.database).unwrap();
    service.add_test_data().unwrap();

    let persons = service.get_all_persons().unwrap();
    assert_eq!(persons.len(), 2);
    assert!(persons.iter().any(|p| p.full_name() == "Erika Mustermann"));
    assert!(db_path.exists());
}
