//! Core expense domain types.

use std::num::ParseIntError;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// A single recorded expense (e.g., a smoothie from the night market).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the database when the expense was created.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub title: String,
    /// How much was spent. Whole amounts are written to JSON without a
    /// fractional part, e.g. `79` rather than `79.0`.
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
    /// Free text notes about the expense.
    pub note: String,
    /// Labels for grouping expenses, in the order they were given.
    pub tags: Vec<String>,
}

impl Expense {
    /// Attach the database `id` to the expense fields in `data`.
    pub fn new(id: ExpenseId, data: ExpenseData) -> Self {
        Self {
            id,
            title: data.title,
            amount: data.amount,
            note: data.note,
            tags: data.tags,
        }
    }
}

/// The JSON body for creating and updating an expense.
///
/// Missing fields and explicit `null`s take their zero value, unknown fields
/// (including `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseData {
    /// What the money was spent on.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// How much was spent.
    #[serde(
        deserialize_with = "null_as_default",
        serialize_with = "serialize_amount"
    )]
    pub amount: f64,
    /// Free text notes about the expense.
    #[serde(deserialize_with = "null_as_default")]
    pub note: String,
    /// Labels for grouping expenses.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Whole numbers up to this size are exactly representable as an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn serialize_amount<S>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if amount.fract() == 0.0 && amount.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

/// Parse an expense ID taken from a request path.
pub fn parse_expense_id(raw_id: &str) -> Result<ExpenseId, ParseIntError> {
    raw_id.parse()
}
