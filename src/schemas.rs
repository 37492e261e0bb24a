use serde::{Deserialize, Serialize};

pub type UserNick = String;

/// Amount exactly as typed into the form. Parsing happens at calculation time.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawAmount(String);

impl RawAmount {
    pub fn new(raw: impl Into<String>) -> Self {
        RawAmount(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the typed text. Anything that isn't a finite number is zero.
    pub fn value(&self) -> f64 {
        match self.as_str().trim().parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    pub amount: RawAmount,
    pub is_drinking: bool,
    pub participants: Vec<UserNick>,
}

impl ExpenseEntry {
    pub fn new() -> Self {
        ExpenseEntry {
            amount: RawAmount::default(),
            is_drinking: false,
            participants: vec![String::new()],
        }
    }
}

impl Default for ExpenseEntry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResult {
    pub name: UserNick,
    pub total: f64,
    pub drinking_total: f64,
    pub food_total: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub card_owner: String,
    pub entries: Vec<ExpenseEntry>,
    pub results: Vec<SettlementResult>,
}
