// Entity Models
//
// Each entity has:
// - Store-assigned identity (`id`) that never changes once persisted
// - Public value fields, mutated in place and written back with `update`
// - Field-wise equality and hashing (see `helper`)

pub mod helper;
pub mod person;
pub mod estate;
pub mod estate_agent;
pub mod contract;

pub use helper::FieldHasher;
pub use person::Person;
pub use estate::{Apartment, Estate, EstateBase, EstateKind, House};
pub use estate_agent::EstateAgent;
pub use contract::{ContractBase, PurchaseContract, TenancyContract};
