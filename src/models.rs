/// Record type tag shown by the report screen.
pub const DEBIT: &str = "debit";

#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub area_id: String,
    pub connection_number: Option<String>,
    pub number: Option<String>,
}

impl Person {
    /// Lookup label: connection number, else number, else name.
    /// Only a missing value falls through; an empty one is returned as is.
    pub fn connection_label(&self) -> &str {
        self.connection_number
            .as_deref()
            .or(self.number.as_deref())
            .unwrap_or(&self.name)
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub person_id: String,
    pub record_type: String,
    pub month: String,
    pub amount: f64,
    pub created_at: Option<String>,
}
