use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use estate_service::{
    logger, Apartment, Estate, EstateAgent, EstateService, House, Person, PurchaseContract,
    ServiceConfig, TenancyContract,
};

#[derive(Parser, Debug)]
#[command(name = "estate-service", version, about = "Estate agents, estates and contracts on SQLite")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides config and ESTATE_DB)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the schema
    Init,
    /// Add the demo data set
    Seed,
    /// List all estate agents
    Agents,
    /// List all persons
    Persons,
    /// Houses and apartments of an agent
    Estates {
        #[arg(short, long)]
        login: String,
    },
    /// Purchase and tenancy contracts of an agent
    Contracts {
        #[arg(short, long)]
        login: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ServiceConfig::default(),
    }
    .with_env_overrides();
    if let Some(path) = &cli.database {
        config.database.path = path.clone();
    }

    logger::init_logger(&config.logging, cli.verbose);
    tracing::debug!(?config, "configuration loaded");

    let service = EstateService::open(&config.database).with_context(|| {
        format!("Failed to open database {}", config.database.path.display())
    })?;

    match cli.command {
        Command::Init => {
            println!("✓ Schema ready: {}", config.database.path.display());
        }
        Command::Seed => run_seed(&service)?,
        Command::Agents => {
            let agents = service.get_all_estate_agents()?;
            print_json(&sorted(agents, |a: &EstateAgent| a.id()))?;
        }
        Command::Persons => {
            let persons = service.get_all_persons()?;
            print_json(&sorted(persons, |p: &Person| p.id()))?;
        }
        Command::Estates { login } => {
            let mut agent = service
                .get_estate_agent_by_login(&login)
                .with_context(|| format!("No estate agent with login '{}'", login))?;
            let houses = service.get_all_houses_for_estate_agent(&mut agent)?;
            let apartments = service.get_all_apartments_for_estate_agent(&mut agent)?;

            print_json(&json!({
                "agent": agent.name,
                "houses": sorted(houses, |h: &House| h.id()),
                "apartments": sorted(apartments, |a: &Apartment| a.id()),
            }))?;
        }
        Command::Contracts { login } => {
            let agent = service
                .get_estate_agent_by_login(&login)
                .with_context(|| format!("No estate agent with login '{}'", login))?;
            let purchases = service.get_all_purchase_contracts_for_estate_agent(&agent)?;
            let tenancies = service.get_all_tenancy_contracts_for_estate_agent(&agent)?;

            print_json(&json!({
                "agent": agent.name,
                "purchase_contracts": sorted(purchases, |c: &PurchaseContract| c.id()),
                "tenancy_contracts": sorted(tenancies, |c: &TenancyContract| c.id()),
            }))?;
        }
    }

    Ok(())
}

fn run_seed(service: &EstateService) -> Result<()> {
    println!("🌱 Adding test data");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let report = service.add_test_data().context("Failed to add test data")?;

    println!("✓ Estate agent: {} (login '{}')", report.agent.name, report.agent.login);
    for person in &report.persons {
        println!("✓ Person: {}", person.full_name());
    }
    let estates = std::iter::once(Estate::from(report.house.clone()))
        .chain(report.apartments.iter().cloned().map(Estate::from));
    for estate in estates {
        println!(
            "✓ {}: {} {}",
            estate.kind().as_str(),
            estate.city(),
            estate.base().street_number
        );
    }
    println!("✓ Purchase contract #{}", report.purchase_contract.contract.contract_no);
    println!("✓ Tenancy contract #{}", report.tenancy_contract.contract.contract_no);

    println!("\n🔍 Verifying database...");
    println!("✓ Database contains {} estate agents", service.count::<EstateAgent>()?);
    println!("✓ Database contains {} persons", service.count::<Person>()?);

    Ok(())
}

/// Sets have no order; sort by id for stable output
fn sorted<T, I>(items: I, key: impl Fn(&T) -> Option<i64>) -> Vec<T>
where
    I: IntoIterator<Item = T>,
{
    let mut items: Vec<T> = items.into_iter().collect();
    items.sort_by_key(|item| key(item));
    items
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
