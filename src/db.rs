// 🗄️ Store boundary - SQLite schema and record mappings
//
// Every entity type maps to one table (table per concrete class). The
// `Record` trait is the seam the service talks to: insert, update, delete and
// load by id or by type. Everything here runs inside a unit of work owned by
// the caller; nothing in this module begins or commits a transaction.

use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::entities::{
    Apartment, ContractBase, Estate, EstateAgent, EstateBase, House, Person, PurchaseContract,
    TenancyContract,
};
use crate::error::Result;

// ============================================================================
// SCHEMA
// ============================================================================

/// Apply connection pragmas from configuration
pub fn configure_connection(conn: &Connection, config: &DatabaseConfig) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;

    // WAL for crash recovery; in-memory databases always report "memory"
    if config.wal && !config.is_in_memory() {
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(journal_mode = %mode, "journal mode set");
    }

    Ok(())
}

/// Create all tables and indexes (idempotent)
pub fn setup_database(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS estate_agent (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            login TEXT NOT NULL,
            password TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS person (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            firstname TEXT NOT NULL,
            name TEXT NOT NULL,
            address TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS house (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            city TEXT NOT NULL,
            postalcode INTEGER NOT NULL,
            street TEXT NOT NULL,
            streetnumber TEXT NOT NULL,
            squarearea INTEGER NOT NULL,
            manager INTEGER NOT NULL REFERENCES estate_agent(id),
            floors INTEGER NOT NULL,
            price INTEGER NOT NULL,
            garden INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS apartment (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            city TEXT NOT NULL,
            postalcode INTEGER NOT NULL,
            street TEXT NOT NULL,
            streetnumber TEXT NOT NULL,
            squarearea INTEGER NOT NULL,
            manager INTEGER NOT NULL REFERENCES estate_agent(id),
            floor INTEGER NOT NULL,
            rent INTEGER NOT NULL,
            rooms INTEGER NOT NULL,
            balcony INTEGER NOT NULL,
            kitchen INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS purchase_contract (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contract_no INTEGER NOT NULL,
            date TEXT NOT NULL,
            place TEXT NOT NULL,
            no_of_installments INTEGER NOT NULL,
            interest_rate INTEGER NOT NULL,
            house_id INTEGER NOT NULL REFERENCES house(id),
            contract_partner_id INTEGER NOT NULL REFERENCES person(id)
        );

        CREATE TABLE IF NOT EXISTS tenancy_contract (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contract_no INTEGER NOT NULL,
            date TEXT NOT NULL,
            place TEXT NOT NULL,
            start_date TEXT NOT NULL,
            duration INTEGER NOT NULL,
            additional_costs INTEGER NOT NULL,
            apartment_id INTEGER NOT NULL REFERENCES apartment(id),
            contract_partner_id INTEGER NOT NULL REFERENCES person(id)
        );

        CREATE INDEX IF NOT EXISTS idx_estate_agent_login ON estate_agent(login);
        CREATE INDEX IF NOT EXISTS idx_house_manager ON house(manager);
        CREATE INDEX IF NOT EXISTS idx_apartment_manager ON apartment(manager);
        CREATE INDEX IF NOT EXISTS idx_purchase_contract_house ON purchase_contract(house_id);
        CREATE INDEX IF NOT EXISTS idx_tenancy_contract_apartment ON tenancy_contract(apartment_id);",
    )?;

    Ok(())
}

/// Row count of a table
pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;

    Ok(count)
}

// ============================================================================
// RECORD TRAIT
// ============================================================================

/// Mapping between an entity type and its table
pub trait Record: Sized {
    /// Entity name used in errors and logs
    const ENTITY: &'static str;

    const TABLE: &'static str;

    fn id(&self) -> Option<i64>;

    /// Write the store-assigned identity back into the entity
    fn assign_id(&mut self, id: i64);

    /// Insert a new row, returning the assigned id
    fn insert(&self, conn: &Connection) -> Result<i64>;

    /// Overwrite the row `id` with the current field values; returns rows changed
    fn update(&self, conn: &Connection, id: i64) -> Result<usize>;

    fn find(conn: &Connection, id: i64) -> Result<Option<Self>>;

    fn find_all(conn: &Connection) -> Result<Vec<Self>>;

    /// Remove the row `id`; returns rows removed
    fn delete(conn: &Connection, id: i64) -> Result<usize> {
        let removed = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", Self::TABLE),
            params![id],
        )?;
        Ok(removed)
    }
}

// ============================================================================
// ROW READERS
// ============================================================================
// Each reader starts at column `at` so joined queries can read several
// entities from one row.

const PERSON_COLUMNS: &str = "p.id, p.firstname, p.name, p.address";
const PERSON_WIDTH: usize = 4;

const HOUSE_COLUMNS: &str = "h.id, h.city, h.postalcode, h.street, h.streetnumber, h.squarearea, \
     h.manager, h.floors, h.price, h.garden";
const HOUSE_WIDTH: usize = 10;

const APARTMENT_COLUMNS: &str = "a.id, a.city, a.postalcode, a.street, a.streetnumber, \
     a.squarearea, a.manager, a.floor, a.rent, a.rooms, a.balcony, a.kitchen";
const APARTMENT_WIDTH: usize = 12;

const AGENT_COLUMNS: &str = "ea.id, ea.name, ea.address, ea.login, ea.password";

const CONTRACT_WIDTH: usize = 6;

fn read_person(row: &Row, at: usize) -> rusqlite::Result<Person> {
    Ok(Person {
        id: Some(row.get(at)?),
        firstname: row.get(at + 1)?,
        name: row.get(at + 2)?,
        address: row.get(at + 3)?,
    })
}

fn read_estate_base(row: &Row, at: usize) -> rusqlite::Result<EstateBase> {
    Ok(EstateBase {
        id: Some(row.get(at)?),
        city: row.get(at + 1)?,
        postal_code: row.get(at + 2)?,
        street: row.get(at + 3)?,
        street_number: row.get(at + 4)?,
        square_area: row.get(at + 5)?,
        manager_id: row.get(at + 6)?,
    })
}

fn read_house(row: &Row, at: usize) -> rusqlite::Result<House> {
    Ok(House {
        estate: read_estate_base(row, at)?,
        floors: row.get(at + 7)?,
        price: row.get(at + 8)?,
        garden: row.get(at + 9)?,
    })
}

fn read_apartment(row: &Row, at: usize) -> rusqlite::Result<Apartment> {
    Ok(Apartment {
        estate: read_estate_base(row, at)?,
        floor: row.get(at + 7)?,
        rent: row.get(at + 8)?,
        rooms: row.get(at + 9)?,
        balcony: row.get(at + 10)?,
        kitchen: row.get(at + 11)?,
    })
}

fn read_agent(row: &Row) -> rusqlite::Result<EstateAgent> {
    Ok(EstateAgent {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        address: row.get(2)?,
        login: row.get(3)?,
        password: row.get(4)?,
        estates: Vec::new(),
    })
}

/// id, contract_no, date, place (the first four contract columns)
fn read_contract_base(row: &Row) -> rusqlite::Result<ContractBase> {
    Ok(ContractBase {
        id: Some(row.get(0)?),
        contract_no: row.get(1)?,
        date: row.get(2)?,
        place: row.get(3)?,
    })
}

/// Ids bound per `IN (...)` statement, well under SQLite's host-parameter limit
pub(crate) const IN_LIST_CHUNK: usize = 500;

fn in_list(len: usize) -> String {
    vec!["?"; len].join(", ")
}

// ============================================================================
// PERSON
// ============================================================================

impl Record for Person {
    const ENTITY: &'static str = "Person";
    const TABLE: &'static str = "person";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn insert(&self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO person (firstname, name, address) VALUES (?1, ?2, ?3)",
            params![self.firstname, self.name, self.address],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection, id: i64) -> Result<usize> {
        let changed = conn.execute(
            "UPDATE person SET firstname = ?1, name = ?2, address = ?3 WHERE id = ?4",
            params![self.firstname, self.name, self.address, id],
        )?;
        Ok(changed)
    }

    fn find(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let person = conn
            .query_row(
                &format!("SELECT {} FROM person p WHERE p.id = ?1", PERSON_COLUMNS),
                params![id],
                |row| read_person(row, 0),
            )
            .optional()?;
        Ok(person)
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM person p ORDER BY p.id",
            PERSON_COLUMNS
        ))?;
        let persons = stmt
            .query_map([], |row| read_person(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(persons)
    }
}

// ============================================================================
// HOUSE
// ============================================================================

impl House {
    pub(crate) fn find_by_manager(conn: &Connection, manager_id: i64) -> Result<Vec<House>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM house h WHERE h.manager = ?1 ORDER BY h.id",
            HOUSE_COLUMNS
        ))?;
        let houses = stmt
            .query_map(params![manager_id], |row| read_house(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(houses)
    }
}

impl Record for House {
    const ENTITY: &'static str = "House";
    const TABLE: &'static str = "house";

    fn id(&self) -> Option<i64> {
        self.estate.id
    }

    fn assign_id(&mut self, id: i64) {
        self.estate.id = Some(id);
    }

    fn insert(&self, conn: &Connection) -> Result<i64> {
        let e = &self.estate;
        conn.execute(
            "INSERT INTO house (
                city, postalcode, street, streetnumber, squarearea, manager,
                floors, price, garden
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                e.city,
                e.postal_code,
                e.street,
                e.street_number,
                e.square_area,
                e.manager_id,
                self.floors,
                self.price,
                self.garden,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection, id: i64) -> Result<usize> {
        let e = &self.estate;
        let changed = conn.execute(
            "UPDATE house
             SET city = ?1, postalcode = ?2, street = ?3, streetnumber = ?4,
                 squarearea = ?5, manager = ?6, floors = ?7, price = ?8, garden = ?9
             WHERE id = ?10",
            params![
                e.city,
                e.postal_code,
                e.street,
                e.street_number,
                e.square_area,
                e.manager_id,
                self.floors,
                self.price,
                self.garden,
                id,
            ],
        )?;
        Ok(changed)
    }

    fn find(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let house = conn
            .query_row(
                &format!("SELECT {} FROM house h WHERE h.id = ?1", HOUSE_COLUMNS),
                params![id],
                |row| read_house(row, 0),
            )
            .optional()?;
        Ok(house)
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!("SELECT {} FROM house h ORDER BY h.id", HOUSE_COLUMNS))?;
        let houses = stmt
            .query_map([], |row| read_house(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(houses)
    }
}

// ============================================================================
// APARTMENT
// ============================================================================

impl Apartment {
    pub(crate) fn find_by_manager(conn: &Connection, manager_id: i64) -> Result<Vec<Apartment>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM apartment a WHERE a.manager = ?1 ORDER BY a.id",
            APARTMENT_COLUMNS
        ))?;
        let apartments = stmt
            .query_map(params![manager_id], |row| read_apartment(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(apartments)
    }
}

impl Record for Apartment {
    const ENTITY: &'static str = "Apartment";
    const TABLE: &'static str = "apartment";

    fn id(&self) -> Option<i64> {
        self.estate.id
    }

    fn assign_id(&mut self, id: i64) {
        self.estate.id = Some(id);
    }

    fn insert(&self, conn: &Connection) -> Result<i64> {
        let e = &self.estate;
        conn.execute(
            "INSERT INTO apartment (
                city, postalcode, street, streetnumber, squarearea, manager,
                floor, rent, rooms, balcony, kitchen
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                e.city,
                e.postal_code,
                e.street,
                e.street_number,
                e.square_area,
                e.manager_id,
                self.floor,
                self.rent,
                self.rooms,
                self.balcony,
                self.kitchen,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection, id: i64) -> Result<usize> {
        let e = &self.estate;
        let changed = conn.execute(
            "UPDATE apartment
             SET city = ?1, postalcode = ?2, street = ?3, streetnumber = ?4,
                 squarearea = ?5, manager = ?6, floor = ?7, rent = ?8, rooms = ?9,
                 balcony = ?10, kitchen = ?11
             WHERE id = ?12",
            params![
                e.city,
                e.postal_code,
                e.street,
                e.street_number,
                e.square_area,
                e.manager_id,
                self.floor,
                self.rent,
                self.rooms,
                self.balcony,
                self.kitchen,
                id,
            ],
        )?;
        Ok(changed)
    }

    fn find(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let apartment = conn
            .query_row(
                &format!("SELECT {} FROM apartment a WHERE a.id = ?1", APARTMENT_COLUMNS),
                params![id],
                |row| read_apartment(row, 0),
            )
            .optional()?;
        Ok(apartment)
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM apartment a ORDER BY a.id",
            APARTMENT_COLUMNS
        ))?;
        let apartments = stmt
            .query_map([], |row| read_apartment(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(apartments)
    }
}

// ============================================================================
// ESTATE AGENT
// ============================================================================

impl EstateAgent {
    /// Load the estates collection of this agent (houses first, then apartments)
    fn load_estates(&mut self, conn: &Connection) -> Result<()> {
        let Some(id) = self.id else {
            self.estates.clear();
            return Ok(());
        };

        let mut estates: Vec<Estate> = House::find_by_manager(conn, id)?
            .into_iter()
            .map(Estate::from)
            .collect();
        estates.extend(
            Apartment::find_by_manager(conn, id)?
                .into_iter()
                .map(Estate::from),
        );

        self.estates = estates;
        Ok(())
    }

    /// First agent with this login, in id order
    pub(crate) fn find_by_login(conn: &Connection, login: &str) -> Result<Option<EstateAgent>> {
        let agent = conn
            .query_row(
                &format!(
                    "SELECT {} FROM estate_agent ea WHERE ea.login = ?1 ORDER BY ea.id LIMIT 1",
                    AGENT_COLUMNS
                ),
                params![login],
                read_agent,
            )
            .optional()?;

        match agent {
            Some(mut agent) => {
                agent.load_estates(conn)?;
                Ok(Some(agent))
            }
            None => Ok(None),
        }
    }
}

impl Record for EstateAgent {
    const ENTITY: &'static str = "EstateAgent";
    const TABLE: &'static str = "estate_agent";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn insert(&self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO estate_agent (name, address, login, password) VALUES (?1, ?2, ?3, ?4)",
            params![self.name, self.address, self.login, self.password],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection, id: i64) -> Result<usize> {
        let changed = conn.execute(
            "UPDATE estate_agent SET name = ?1, address = ?2, login = ?3, password = ?4
             WHERE id = ?5",
            params![self.name, self.address, self.login, self.password, id],
        )?;
        Ok(changed)
    }

    fn find(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let agent = conn
            .query_row(
                &format!("SELECT {} FROM estate_agent ea WHERE ea.id = ?1", AGENT_COLUMNS),
                params![id],
                read_agent,
            )
            .optional()?;

        match agent {
            Some(mut agent) => {
                agent.load_estates(conn)?;
                Ok(Some(agent))
            }
            None => Ok(None),
        }
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM estate_agent ea ORDER BY ea.id",
            AGENT_COLUMNS
        ))?;
        let mut agents = stmt
            .query_map([], read_agent)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for agent in &mut agents {
            agent.load_estates(conn)?;
        }

        Ok(agents)
    }
}

// ============================================================================
// PURCHASE CONTRACT
// ============================================================================

fn purchase_contract_select() -> String {
    format!(
        "SELECT pc.id, pc.contract_no, pc.date, pc.place, pc.no_of_installments, pc.interest_rate,
                {}, {}
         FROM purchase_contract pc
         JOIN house h ON pc.house_id = h.id
         JOIN person p ON pc.contract_partner_id = p.id",
        HOUSE_COLUMNS, PERSON_COLUMNS
    )
}

fn read_purchase_contract(row: &Row) -> rusqlite::Result<PurchaseContract> {
    Ok(PurchaseContract {
        contract: read_contract_base(row)?,
        no_of_installments: row.get(4)?,
        interest_rate: row.get(5)?,
        house: read_house(row, CONTRACT_WIDTH)?,
        contract_partner: read_person(row, CONTRACT_WIDTH + HOUSE_WIDTH)?,
    })
}

impl PurchaseContract {
    /// Ids of purchase contracts whose house is managed by `manager_id`
    pub(crate) fn ids_for_manager(conn: &Connection, manager_id: i64) -> Result<Vec<i64>> {
        let mut stmt = conn.prepare(
            "SELECT pc.id FROM purchase_contract pc
             JOIN house h ON pc.house_id = h.id
             WHERE h.manager = ?1",
        )?;
        let ids = stmt
            .query_map(params![manager_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(ids)
    }

    pub(crate) fn find_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<PurchaseContract>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut contracts = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(IN_LIST_CHUNK) {
            let sql = format!("{} WHERE pc.id IN ({})", purchase_contract_select(), in_list(chunk.len()));
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(chunk.iter()), read_purchase_contract)?
                .collect::<rusqlite::Result<Vec<PurchaseContract>>>()?;
            contracts.extend(rows);
        }

        contracts.sort_by_key(|c| c.contract.id);
        Ok(contracts)
    }
}

impl Record for PurchaseContract {
    const ENTITY: &'static str = "PurchaseContract";
    const TABLE: &'static str = "purchase_contract";

    fn id(&self) -> Option<i64> {
        self.contract.id
    }

    fn assign_id(&mut self, id: i64) {
        self.contract.id = Some(id);
    }

    fn insert(&self, conn: &Connection) -> Result<i64> {
        let c = &self.contract;
        conn.execute(
            "INSERT INTO purchase_contract (
                contract_no, date, place, no_of_installments, interest_rate,
                house_id, contract_partner_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                c.contract_no,
                c.date,
                c.place,
                self.no_of_installments,
                self.interest_rate,
                self.house.id(),
                self.contract_partner.id(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection, id: i64) -> Result<usize> {
        let c = &self.contract;
        let changed = conn.execute(
            "UPDATE purchase_contract
             SET contract_no = ?1, date = ?2, place = ?3, no_of_installments = ?4,
                 interest_rate = ?5, house_id = ?6, contract_partner_id = ?7
             WHERE id = ?8",
            params![
                c.contract_no,
                c.date,
                c.place,
                self.no_of_installments,
                self.interest_rate,
                self.house.id(),
                self.contract_partner.id(),
                id,
            ],
        )?;
        Ok(changed)
    }

    fn find(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let contract = conn
            .query_row(
                &format!("{} WHERE pc.id = ?1", purchase_contract_select()),
                params![id],
                read_purchase_contract,
            )
            .optional()?;
        Ok(contract)
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!("{} ORDER BY pc.id", purchase_contract_select()))?;
        let contracts = stmt
            .query_map([], read_purchase_contract)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(contracts)
    }
}

// ============================================================================
// TENANCY CONTRACT
// ============================================================================

fn tenancy_contract_select() -> String {
    format!(
        "SELECT tc.id, tc.contract_no, tc.date, tc.place, tc.start_date, tc.duration,
                tc.additional_costs, {}, {}
         FROM tenancy_contract tc
         JOIN apartment a ON tc.apartment_id = a.id
         JOIN person p ON tc.contract_partner_id = p.id",
        APARTMENT_COLUMNS, PERSON_COLUMNS
    )
}

fn read_tenancy_contract(row: &Row) -> rusqlite::Result<TenancyContract> {
    // one more leading column than a purchase contract
    let at = CONTRACT_WIDTH + 1;
    Ok(TenancyContract {
        contract: read_contract_base(row)?,
        start_date: row.get(4)?,
        duration: row.get(5)?,
        additional_costs: row.get(6)?,
        apartment: read_apartment(row, at)?,
        contract_partner: read_person(row, at + APARTMENT_WIDTH)?,
    })
}

impl TenancyContract {
    /// Ids of tenancy contracts whose apartment is managed by `manager_id`
    pub(crate) fn ids_for_manager(conn: &Connection, manager_id: i64) -> Result<Vec<i64>> {
        let mut stmt = conn.prepare(
            "SELECT tc.id FROM tenancy_contract tc
             JOIN apartment a ON tc.apartment_id = a.id
             WHERE a.manager = ?1",
        )?;
        let ids = stmt
            .query_map(params![manager_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(ids)
    }

    pub(crate) fn find_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<TenancyContract>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut contracts = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(IN_LIST_CHUNK) {
            let sql = format!("{} WHERE tc.id IN ({})", tenancy_contract_select(), in_list(chunk.len()));
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(chunk.iter()), read_tenancy_contract)?
                .collect::<rusqlite::Result<Vec<TenancyContract>>>()?;
            contracts.extend(rows);
        }

        contracts.sort_by_key(|c| c.contract.id);
        Ok(contracts)
    }
}

impl Record for TenancyContract {
    const ENTITY: &'static str = "TenancyContract";
    const TABLE: &'static str = "tenancy_contract";

    fn id(&self) -> Option<i64> {
        self.contract.id
    }

    fn assign_id(&mut self, id: i64) {
        self.contract.id = Some(id);
    }

    fn insert(&self, conn: &Connection) -> Result<i64> {
        let c = &self.contract;
        conn.execute(
            "INSERT INTO tenancy_contract (
                contract_no, date, place, start_date, duration, additional_costs,
                apartment_id, contract_partner_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                c.contract_no,
                c.date,
                c.place,
                self.start_date,
                self.duration,
                self.additional_costs,
                self.apartment.id(),
                self.contract_partner.id(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection, id: i64) -> Result<usize> {
        let c = &self.contract;
        let changed = conn.execute(
            "UPDATE tenancy_contract
             SET contract_no = ?1, date = ?2, place = ?3, start_date = ?4, duration = ?5,
                 additional_costs = ?6, apartment_id = ?7, contract_partner_id = ?8
             WHERE id = ?9",
            params![
                c.contract_no,
                c.date,
                c.place,
                self.start_date,
                self.duration,
                self.additional_costs,
                self.apartment.id(),
                self.contract_partner.id(),
                id,
            ],
        )?;
        Ok(changed)
    }

    fn find(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let contract = conn
            .query_row(
                &format!("{} WHERE tc.id = ?1", tenancy_contract_select()),
                params![id],
                read_tenancy_contract,
            )
            .optional()?;
        Ok(contract)
    }

    fn find_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!("{} ORDER BY tc.id", tenancy_contract_select()))?;
        let contracts = stmt
            .query_map([], read_tenancy_contract)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(contracts)
    }
}
