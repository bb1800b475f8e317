//! Expenses: the domain type, its storage and the REST endpoints.

mod body;
mod create;
mod domain;
mod get;
mod sqlite;
mod store;
mod update;

pub use body::ExpenseBody;
pub use create::create_expense_endpoint;
pub use domain::{Expense, ExpenseData, ExpenseId, parse_expense_id};
pub use get::{get_all_expenses_endpoint, get_expense_endpoint};
pub use sqlite::SQLiteExpenseStore;
pub use store::ExpenseStore;
pub use update::update_expense_endpoint;
