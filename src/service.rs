// 🏢 Estate Service - persistence layer for agents, persons, estates, contracts
//
// Every public operation is one unit of work: begin, one query or mutation,
// commit. Results are detached values; changing them has no effect until
// `update` is called. There is no atomicity across calls.

use rusqlite::Connection;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::db::{self, Record};
use crate::entities::{Apartment, EstateAgent, House, Person, PurchaseContract, TenancyContract};
use crate::error::{Result, ServiceError};

pub struct EstateService {
    conn: Connection,
}

impl EstateService {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Open (or create) the database described by `config` and ensure the schema
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.path)?
        };
        db::configure_connection(&conn, config)?;

        let service = Self::new(conn)?;
        info!(path = %config.path.display(), "estate database opened");
        Ok(service)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(&DatabaseConfig::in_memory())
    }

    /// Wrap an existing connection; creates missing tables
    pub fn new(conn: Connection) -> Result<Self> {
        db::setup_database(&conn)?;
        Ok(EstateService { conn })
    }

    // ========================================================================
    // UNIT OF WORK
    // ========================================================================

    /// Run `work` inside its own transaction.
    ///
    /// Commits when `work` succeeds; on any error the transaction is rolled
    /// back and the error returned as is.
    fn unit_of_work<T>(
        &self,
        operation: &'static str,
        work: impl FnOnce(&Connection) -> Result<T>,
    ) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;

        match work(&tx) {
            Ok(value) => {
                tx.commit()?;
                debug!(operation, "unit of work committed");
                Ok(value)
            }
            Err(err) => {
                warn!(operation, error = %err, "unit of work failed, rolling back");
                if let Err(rollback_err) = tx.rollback() {
                    warn!(operation, error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    fn require_id<T: Record>(entity: &T) -> Result<i64> {
        entity
            .id()
            .ok_or(ServiceError::Transient { entity: T::ENTITY })
    }

    // ========================================================================
    // GENERIC OPERATIONS
    // ========================================================================

    /// Persist a new entity and write the assigned identity back into it
    pub fn add<T: Record>(&self, entity: &mut T) -> Result<()> {
        if let Some(id) = entity.id() {
            return Err(ServiceError::AlreadyPersisted {
                entity: T::ENTITY,
                id,
            });
        }

        let id = self.unit_of_work("add", |conn| entity.insert(conn))?;
        entity.assign_id(id);
        info!(entity = T::ENTITY, id, "added");
        Ok(())
    }

    /// `Ok(None)` when no row has this id
    pub fn get_by_id<T: Record>(&self, id: i64) -> Result<Option<T>> {
        self.unit_of_work("get_by_id", |conn| T::find(conn, id))
    }

    pub fn get_all<T: Record + Eq + Hash>(&self) -> Result<HashSet<T>> {
        let rows = self.unit_of_work("get_all", |conn| T::find_all(conn))?;
        Ok(rows.into_iter().collect())
    }

    /// Remove the row with `entity`'s identity; fails when there is none
    pub fn delete<T: Record>(&self, entity: &T) -> Result<()> {
        let id = Self::require_id(entity)?;

        let removed = self.unit_of_work("delete", |conn| T::delete(conn, id))?;
        if removed == 0 {
            return Err(ServiceError::not_found(T::ENTITY, id));
        }

        info!(entity = T::ENTITY, id, "deleted");
        Ok(())
    }

    /// Write all current field values of a detached entity back to the store
    pub fn update<T: Record>(&self, entity: &T) -> Result<()> {
        let id = Self::require_id(entity)?;

        let changed = self.unit_of_work("update", |conn| entity.update(conn, id))?;
        if changed == 0 {
            return Err(ServiceError::not_found(T::ENTITY, id));
        }

        debug!(entity = T::ENTITY, id, "updated");
        Ok(())
    }

    /// Reload `entity` from the store, discarding unsaved changes
    pub fn refresh<T: Record>(&self, entity: &mut T) -> Result<()> {
        let id = Self::require_id(entity)?;

        match self.unit_of_work("refresh", |conn| T::find(conn, id))? {
            Some(fresh) => {
                *entity = fresh;
                Ok(())
            }
            None => Err(ServiceError::not_found(T::ENTITY, id)),
        }
    }

    /// Number of persisted rows of type `T`
    pub fn count<T: Record>(&self) -> Result<i64> {
        self.unit_of_work("count", |conn| db::count_rows(conn, T::TABLE))
    }

    // ========================================================================
    // ESTATE AGENTS
    // ========================================================================

    pub fn add_estate_agent(&self, agent: &mut EstateAgent) -> Result<()> {
        self.add(agent)
    }

    pub fn get_estate_agent_by_id(&self, id: i64) -> Result<Option<EstateAgent>> {
        self.get_by_id(id)
    }

    /// Look up an agent by login; `NotFound` when no agent has it.
    ///
    /// Logins are assumed unique. If several agents share one, the one with
    /// the lowest id is returned.
    pub fn get_estate_agent_by_login(&self, login: &str) -> Result<EstateAgent> {
        self.unit_of_work("get_estate_agent_by_login", |conn| {
            EstateAgent::find_by_login(conn, login)
        })?
        .ok_or_else(|| ServiceError::not_found(EstateAgent::ENTITY, login))
    }

    pub fn get_all_estate_agents(&self) -> Result<HashSet<EstateAgent>> {
        self.get_all()
    }

    pub fn delete_estate_agent(&self, agent: &EstateAgent) -> Result<()> {
        self.delete(agent)
    }

    // ========================================================================
    // PERSONS
    // ========================================================================

    pub fn add_person(&self, person: &mut Person) -> Result<()> {
        self.add(person)
    }

    pub fn get_person_by_id(&self, id: i64) -> Result<Option<Person>> {
        self.get_by_id(id)
    }

    pub fn get_all_persons(&self) -> Result<HashSet<Person>> {
        self.get_all()
    }

    pub fn delete_person(&self, person: &Person) -> Result<()> {
        self.delete(person)
    }

    // ========================================================================
    // HOUSES
    // ========================================================================

    pub fn add_house(&self, house: &mut House) -> Result<()> {
        self.add(house)
    }

    pub fn get_house_by_id(&self, id: i64) -> Result<Option<House>> {
        self.get_by_id(id)
    }

    pub fn get_all_houses(&self) -> Result<HashSet<House>> {
        self.get_all()
    }

    /// Refresh `agent`, then keep the houses among its estates
    pub fn get_all_houses_for_estate_agent(&self, agent: &mut EstateAgent) -> Result<HashSet<House>> {
        self.refresh(agent)?;
        Ok(agent.houses().cloned().collect())
    }

    pub fn delete_house(&self, house: &House) -> Result<()> {
        self.delete(house)
    }

    // ========================================================================
    // APARTMENTS
    // ========================================================================

    pub fn add_apartment(&self, apartment: &mut Apartment) -> Result<()> {
        self.add(apartment)
    }

    pub fn get_apartment_by_id(&self, id: i64) -> Result<Option<Apartment>> {
        self.get_by_id(id)
    }

    pub fn get_all_apartments(&self) -> Result<HashSet<Apartment>> {
        self.get_all()
    }

    /// Refresh `agent`, then keep the apartments among its estates
    pub fn get_all_apartments_for_estate_agent(
        &self,
        agent: &mut EstateAgent,
    ) -> Result<HashSet<Apartment>> {
        self.refresh(agent)?;
        Ok(agent.apartments().cloned().collect())
    }

    pub fn delete_apartment(&self, apartment: &Apartment) -> Result<()> {
        self.delete(apartment)
    }

    // ========================================================================
    // PURCHASE CONTRACTS
    // ========================================================================

    pub fn add_purchase_contract(&self, contract: &mut PurchaseContract) -> Result<()> {
        self.add(contract)
    }

    pub fn get_purchase_contract_by_id(&self, id: i64) -> Result<Option<PurchaseContract>> {
        self.get_by_id(id)
    }

    pub fn get_all_purchase_contracts(&self) -> Result<HashSet<PurchaseContract>> {
        self.get_all()
    }

    /// Purchase contracts for houses managed by `agent`.
    ///
    /// Two units of work: project the contract ids, then load those contracts.
    pub fn get_all_purchase_contracts_for_estate_agent(
        &self,
        agent: &EstateAgent,
    ) -> Result<HashSet<PurchaseContract>> {
        let manager_id = Self::require_id(agent)?;

        let ids = self.unit_of_work("purchase_contract_ids_for_manager", |conn| {
            PurchaseContract::ids_for_manager(conn, manager_id)
        })?;
        debug!(manager_id, matches = ids.len(), "purchase contract ids projected");

        self.get_all_purchase_contracts_for_ids(&ids)
    }

    /// Bulk load by id list; an empty list returns without touching the store
    pub fn get_all_purchase_contracts_for_ids(&self, ids: &[i64]) -> Result<HashSet<PurchaseContract>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let contracts = self.unit_of_work("purchase_contracts_for_ids", |conn| {
            PurchaseContract::find_by_ids(conn, ids)
        })?;
        Ok(contracts.into_iter().collect())
    }

    pub fn delete_purchase_contract(&self, contract: &PurchaseContract) -> Result<()> {
        self.delete(contract)
    }

    // ========================================================================
    // TENANCY CONTRACTS
    // ========================================================================

    pub fn add_tenancy_contract(&self, contract: &mut TenancyContract) -> Result<()> {
        self.add(contract)
    }

    pub fn get_tenancy_contract_by_id(&self, id: i64) -> Result<Option<TenancyContract>> {
        self.get_by_id(id)
    }

    pub fn get_all_tenancy_contracts(&self) -> Result<HashSet<TenancyContract>> {
        self.get_all()
    }

    /// Tenancy contracts for apartments managed by `agent` (projection, then bulk load)
    pub fn get_all_tenancy_contracts_for_estate_agent(
        &self,
        agent: &EstateAgent,
    ) -> Result<HashSet<TenancyContract>> {
        let manager_id = Self::require_id(agent)?;

        let ids = self.unit_of_work("tenancy_contract_ids_for_manager", |conn| {
            TenancyContract::ids_for_manager(conn, manager_id)
        })?;
        debug!(manager_id, matches = ids.len(), "tenancy contract ids projected");

        self.get_all_tenancy_contracts_for_ids(&ids)
    }

    pub fn get_all_tenancy_contracts_for_ids(&self, ids: &[i64]) -> Result<HashSet<TenancyContract>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let contracts = self.unit_of_work("tenancy_contracts_for_ids", |conn| {
            TenancyContract::find_by_ids(conn, ids)
        })?;
        Ok(contracts.into_iter().collect())
    }

    pub fn delete_tenancy_contract(&self, contract: &TenancyContract) -> Result<()> {
        self.delete(contract)
    }
}
