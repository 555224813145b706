//! billsplitlib — проверка разбиения расхода между участниками и сборка
//! запроса на создание расхода (EQUAL / EXACT / PERCENTAGE)

pub mod config;
pub mod error;
pub mod expense;
pub mod model;
pub mod split;
pub mod traits;

pub mod strategies {
    pub mod equal;
    pub mod exact;
    pub mod percentage;
}

pub use config::SplitPolicy;
pub use error::{BillsplitError, FormError, Result, ValidationError};
pub use expense::ExpenseDraft;
pub use model::{CreateExpenseRequest, SplitPayload, SplitType};
pub use split::{build_split, equal_share, even_percentages, SplitBuilder};
