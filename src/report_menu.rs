//! Area → person → records lookup flow behind the report screen.
//!
//! Every store call happens inside the handler that triggered it and is
//! finished before the handler returns, so results always land in the
//! order the user asked for them. Store failures are logged and leave the
//! affected list empty; nothing here returns an error to the caller.

use crate::error::{PaylogError, Result};
use crate::fmt;
use crate::models::{Area, Person, Record, DEBIT};
use crate::store::{PaymentStore, RecordSelector};

/// Maximum number of entries in a locally filtered suggestion list.
pub const SUGGESTION_LIMIT: usize = 20;

/// Index the record query relies on.
pub const RECORD_INDEX_FIELDS: &[&str] = &["type", "personId"];

/// A record as shown in the "All Records" table.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRow {
    pub month: String,
    pub amount: String,
    pub recorded_at: String,
}

/// Areas whose name starts with `query`, ignoring case, in list order.
pub fn filter_areas(areas: &[Area], query: &str) -> Vec<Area> {
    if query.is_empty() {
        return vec![];
    }
    let q = query.to_lowercase();
    areas
        .iter()
        .filter(|a| a.name.to_lowercase().starts_with(&q))
        .take(SUGGESTION_LIMIT)
        .cloned()
        .collect()
}

/// Persons whose connection label or name starts with `query`, ignoring
/// case, in list order.
pub fn filter_persons(persons: &[Person], query: &str) -> Vec<Person> {
    if query.is_empty() {
        return vec![];
    }
    let q = query.to_lowercase();
    persons
        .iter()
        .filter(|p| {
            p.connection_label().to_lowercase().starts_with(&q)
                || p.name.to_lowercase().starts_with(&q)
        })
        .take(SUGGESTION_LIMIT)
        .cloned()
        .collect()
}

pub struct ReportMenu<S: PaymentStore> {
    db: Option<S>,
    pub areas: Vec<Area>,
    pub area_query: String,
    pub area_suggestions: Vec<Area>,
    pub selected_area: Option<String>,
    pub persons_in_area: Vec<Person>,
    pub connection_query: String,
    pub connection_suggestions: Vec<Person>,
    pub selected_person_id: Option<String>,
    pub selected_person_name: String,
    pub records: Vec<Record>,
    pub loading: bool,
}

impl<S: PaymentStore> Default for ReportMenu<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PaymentStore> ReportMenu<S> {
    pub fn new() -> Self {
        Self {
            db: None,
            areas: Vec::new(),
            area_query: String::new(),
            area_suggestions: Vec::new(),
            selected_area: None,
            persons_in_area: Vec::new(),
            connection_query: String::new(),
            connection_suggestions: Vec::new(),
            selected_person_id: None,
            selected_person_name: String::new(),
            records: Vec::new(),
            loading: true,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.db.is_some()
    }

    /// Connect to the store and load all areas. `loading` is cleared
    /// whether or not either step succeeds.
    pub fn initialize<F>(&mut self, connect: F)
    where
        F: FnOnce() -> Result<S>,
    {
        match connect() {
            Ok(db) => {
                match db.get_areas() {
                    Ok(areas) => {
                        log::info!("loaded {} areas", areas.len());
                        self.areas = areas;
                    }
                    Err(e) => {
                        log::warn!("failed to load areas: {e}");
                        self.areas.clear();
                    }
                }
                self.db = Some(db);
            }
            Err(e) => log::warn!("store unavailable: {e}"),
        }
        self.loading = false;
    }

    pub fn set_area_query(&mut self, text: &str) {
        self.area_query = text.to_string();
        self.area_suggestions = filter_areas(&self.areas, text);
    }

    /// Choose an area. Everything downstream of the area (person list,
    /// person selection, person search box and records) is reset first. An
    /// empty id clears the area selection.
    pub fn select_area(&mut self, area_id: &str) {
        self.selected_area = (!area_id.is_empty()).then(|| area_id.to_string());
        self.persons_in_area.clear();
        self.selected_person_id = None;
        self.selected_person_name.clear();
        self.records.clear();
        self.connection_query.clear();
        self.connection_suggestions.clear();

        let Some(db) = &self.db else { return };
        if area_id.is_empty() {
            return;
        }
        match db.get_persons_by_area(area_id) {
            Ok(persons) => {
                log::debug!("area {area_id}: {} persons", persons.len());
                self.persons_in_area = persons;
            }
            Err(e) => log::warn!("failed to load persons for area {area_id}: {e}"),
        }
    }

    /// Take the area suggestion at `index`: its name fills the area box and
    /// the suggestion list closes.
    pub fn pick_area_suggestion(&mut self, index: usize) {
        if let Some(area) = self.area_suggestions.get(index).cloned() {
            self.choose_area(area);
        }
    }

    /// Case-insensitive exact match on area name.
    pub fn find_area_by_name(&self, name: &str) -> Option<&Area> {
        let wanted = name.to_lowercase();
        self.areas.iter().find(|a| a.name.to_lowercase() == wanted)
    }

    /// Select an area as if it had been picked from the suggestions.
    pub fn select_area_by_name(&mut self, name: &str) -> Result<()> {
        let area = self
            .find_area_by_name(name)
            .cloned()
            .ok_or_else(|| PaylogError::UnknownArea(name.to_string()))?;
        self.choose_area(area);
        Ok(())
    }

    fn choose_area(&mut self, area: Area) {
        self.area_query = area.name;
        self.area_suggestions.clear();
        self.select_area(&area.id);
    }

    /// Update the connection/name box. With an area selected the area's
    /// persons are filtered locally; otherwise the store's global person
    /// search (when it has one) supplies the suggestions unchanged.
    pub fn set_connection_query(&mut self, text: &str) {
        self.connection_query = text.to_string();
        if text.is_empty() {
            self.connection_suggestions.clear();
            return;
        }

        if self.selected_area.is_some() {
            self.connection_suggestions = filter_persons(&self.persons_in_area, text);
            return;
        }

        let Some(db) = &self.db else { return };
        match db.search_persons(text) {
            Some(Ok(found)) => self.connection_suggestions = found,
            Some(Err(e)) => {
                log::warn!("person search failed for {text:?}: {e}");
                self.connection_suggestions.clear();
            }
            None => {}
        }
    }

    pub fn pick_person_suggestion(&mut self, index: usize) {
        let Some(id) = self.connection_suggestions.get(index).map(|p| p.id.clone()) else {
            return;
        };
        self.select_person(&id);
    }

    /// Choose a person and load their records. The person is looked up in
    /// the area's list and in the open suggestions, so picks from the
    /// global search resolve too.
    pub fn select_person(&mut self, person_id: &str) {
        self.selected_person_id = (!person_id.is_empty()).then(|| person_id.to_string());

        let person = self
            .persons_in_area
            .iter()
            .chain(self.connection_suggestions.iter())
            .find(|p| p.id == person_id)
            .cloned();

        self.selected_person_name = person.as_ref().map(|p| p.name.clone()).unwrap_or_default();
        self.connection_suggestions.clear();
        self.connection_query = person
            .as_ref()
            .map(|p| p.connection_label().to_string())
            .unwrap_or_default();

        self.load_records_for_person(person_id);
    }

    pub fn load_records_for_person(&mut self, person_id: &str) {
        let Some(db) = &self.db else { return };
        if person_id.is_empty() {
            return;
        }

        let loaded = db.ensure_index(RECORD_INDEX_FIELDS).and_then(|_| {
            db.find_records(&RecordSelector {
                record_type: DEBIT,
                person_id,
            })
        });
        match loaded {
            Ok(records) => {
                log::debug!("person {person_id}: {} debit records", records.len());
                self.records = records;
            }
            Err(e) => {
                log::warn!("failed to load records for person {person_id}: {e}");
                self.records.clear();
            }
        }
    }

    pub fn record_rows(&self) -> Vec<RecordRow> {
        self.records
            .iter()
            .map(|r| RecordRow {
                month: r.month.clone(),
                amount: fmt::amount(r.amount),
                recorded_at: fmt::recorded_at(r.created_at.as_deref()),
            })
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.records.iter().map(|r| r.amount).sum()
    }
}
