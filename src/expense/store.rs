//! Defines the expense store trait.

use crate::{
    Error,
    expense::{Expense, ExpenseData, ExpenseId},
};

/// Handles the creation, retrieval and updating of expenses.
///
/// Implementations are shared between concurrent requests, so every method
/// takes `&self` and must handle its own synchronization.
pub trait ExpenseStore {
    /// Create a new expense in the store and return it with its generated ID.
    fn create(&self, data: ExpenseData) -> Result<Expense, Error>;

    /// Retrieve an expense from the store.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a stored expense.
    fn get(&self, id: ExpenseId) -> Result<Expense, Error>;

    /// Retrieve every expense in the order they are stored.
    fn get_all(&self) -> Result<Vec<Expense>, Error>;

    /// Replace the fields of the expense `id` with `data`.
    ///
    /// Updating an ID with no stored expense is not an error.
    fn update(&self, id: ExpenseId, data: ExpenseData) -> Result<Expense, Error>;
}
