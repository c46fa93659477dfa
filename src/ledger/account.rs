use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{LedgerError, Result};

/// A numeric field as the backend sent it.
///
/// Quantities and amounts arrive as numbers, numeric strings, free text or
/// null. The raw value is kept for display and coerced on demand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged, from = "Value")]
pub enum NumberLike {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl NumberLike {
    /// Numeric value, or 0 when the raw value is not a finite number.
    pub fn coerce(&self) -> f64 {
        let value = match self {
            NumberLike::Number(n) => *n,
            NumberLike::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
            NumberLike::Missing => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

impl From<f64> for NumberLike {
    fn from(value: f64) -> Self {
        NumberLike::Number(value)
    }
}

impl From<&str> for NumberLike {
    fn from(value: &str) -> Self {
        NumberLike::Text(value.to_string())
    }
}

impl From<Value> for NumberLike {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(NumberLike::Missing, NumberLike::Number),
            Value::String(s) => NumberLike::Text(s),
            Value::Bool(b) => NumberLike::Number(if b { 1.0 } else { 0.0 }),
            Value::Null | Value::Array(_) | Value::Object(_) => NumberLike::Missing,
        }
    }
}

impl fmt::Display for NumberLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberLike::Number(n) => write!(f, "{}", crate::report::format::format_number(*n)),
            NumberLike::Text(s) if s.trim().is_empty() => write!(f, "-"),
            NumberLike::Text(s) => write!(f, "{}", s.trim()),
            NumberLike::Missing => write!(f, "-"),
        }
    }
}

/// How a payment reached us
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Medium {
    Cash,
    Transfer,
    Other(String),
}

impl From<String> for Medium {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Cash" => Medium::Cash,
            "Transfer" => Medium::Transfer,
            _ => Medium::Other(value),
        }
    }
}

impl From<Medium> for String {
    fn from(value: Medium) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Medium::Cash => write!(f, "Cash"),
            Medium::Transfer => write!(f, "Transfer"),
            Medium::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Channel used for a `Transfer` payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransferMethod {
    Upi,
    BankTransfer,
    Other(String),
}

impl From<String> for TransferMethod {
    fn from(value: String) -> Self {
        match value.as_str() {
            "UPI" => TransferMethod::Upi,
            "Bank Transfer" => TransferMethod::BankTransfer,
            _ => TransferMethod::Other(value),
        }
    }
}

impl From<TransferMethod> for String {
    fn from(value: TransferMethod) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TransferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMethod::Upi => write!(f, "UPI"),
            TransferMethod::BankTransfer => write!(f, "Bank Transfer"),
            TransferMethod::Other(s) => write!(f, "{s}"),
        }
    }
}

/// A dated sale of some quantity of one product size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleEntry {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub size: String,
    #[serde(default)]
    pub quantity: NumberLike,
}

/// A payment received from the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub amount: NumberLike,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub medium: Option<Medium>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub transfer_method: Option<TransferMethod>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub comment: Option<String>,
}

/// Ledger of a submersible client.
///
/// `balance` is the backend's running balance and is never recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AccountRecord")]
pub struct ClientAccount {
    pub name: String,
    pub entries: Vec<SaleEntry>,
    pub payments: Vec<Payment>,
    #[serde(rename = "calculatedBalance")]
    pub balance: f64,
}

/// Submersible record as stored. The backend may send both balance keys.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    name: String,
    #[serde(default)]
    entries: Vec<SaleEntry>,
    #[serde(default)]
    payments: Vec<Payment>,
    #[serde(default)]
    calculated_balance: Option<NumberLike>,
    #[serde(default)]
    balance: Option<NumberLike>,
}

impl From<AccountRecord> for ClientAccount {
    fn from(record: AccountRecord) -> Self {
        // calculatedBalance is authoritative, balance is the fallback
        let balance = record
            .calculated_balance
            .or(record.balance)
            .map_or(0.0, |value| value.coerce());

        Self {
            name: record.name,
            entries: record.entries,
            payments: record.payments,
            balance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanSale {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub model: String,
    #[serde(default)]
    pub quantity: NumberLike,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub model: String,
    #[serde(default)]
    pub stock: NumberLike,
}

/// Fan clients only track stock, they have no priced ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanAccount {
    pub name: String,
    #[serde(default)]
    pub sales: Vec<FanSale>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default, deserialize_with = "deserialize_coerced")]
    pub balance: f64,
}

/// A client record as served by the backend, tagged by `category`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ClientRecord {
    Fan(FanAccount),
    Submersible(ClientAccount),
}

impl ClientRecord {
    /// Parse a client record from the backend's JSON shape
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| LedgerError::InvalidRecord(e.to_string()))?;

        let category = value
            .get("category")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if category != "fan" && category != "submersible" {
            let name = value
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            let category = if category.is_empty() {
                "uncategorized".to_string()
            } else {
                category
            };
            return Err(LedgerError::UnsupportedCategory { name, category });
        }

        serde_json::from_value(value).map_err(|e| LedgerError::InvalidRecord(e.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            ClientRecord::Fan(fan) => &fan.name,
            ClientRecord::Submersible(account) => &account.name,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            ClientRecord::Fan(_) => "fan",
            ClientRecord::Submersible(_) => "submersible",
        }
    }

    pub fn balance(&self) -> f64 {
        match self {
            ClientRecord::Fan(fan) => fan.balance,
            ClientRecord::Submersible(account) => account.balance,
        }
    }

    /// The priced ledger, only present on submersible clients
    pub fn into_ledger_account(self) -> Result<ClientAccount> {
        match self {
            ClientRecord::Submersible(account) => Ok(account),
            ClientRecord::Fan(fan) => Err(LedgerError::UnsupportedCategory {
                name: fan.name,
                category: "fan".to_string(),
            }),
        }
    }
}

/// Parse a record date, keeping only the calendar day of timestamps
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc().date());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }
    None
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_record_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
}

fn deserialize_identifier<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

fn deserialize_coerced<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(NumberLike::deserialize(deserializer)?.coerce())
}

fn empty_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(T::from))
}
