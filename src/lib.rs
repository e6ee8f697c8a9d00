// Estate Service - Core Library
// Entity model and persistence layer for a real-estate brokerage

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod logger;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use config::{DatabaseConfig, LoggingConfig, ServiceConfig};
pub use db::{count_rows, setup_database, Record};
pub use entities::{
    Apartment, ContractBase, Estate, EstateAgent, EstateBase, EstateKind, FieldHasher, House,
    Person, PurchaseContract, TenancyContract,
};
pub use error::{Result, ServiceError};
pub use seed::SeedReport;
pub use service::EstateService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
