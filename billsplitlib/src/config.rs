//! Политика валидации: допуск сумм и ограничения полей формы.
//! Значения берутся из переменных окружения, при отсутствии — по умолчанию.

use crate::error::{BillsplitError, Result};
use rust_decimal::Decimal;
use std::{env, fmt::Display, str::FromStr};
use tracing::{info, warn};

/// 0.01: суммы и проценты сравниваются с этим абсолютным допуском.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
pub const DEFAULT_MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
pub const DEFAULT_MIN_DESCRIPTION_LEN: usize = 3;
pub const DEFAULT_CURRENCY: &str = "USD";

pub const TOLERANCE_VAR: &str = "BILLSPLIT_TOLERANCE";
pub const MIN_AMOUNT_VAR: &str = "BILLSPLIT_MIN_AMOUNT";
pub const MIN_DESCRIPTION_LEN_VAR: &str = "BILLSPLIT_MIN_DESCRIPTION_LEN";
pub const DEFAULT_CURRENCY_VAR: &str = "BILLSPLIT_DEFAULT_CURRENCY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPolicy {
    pub tolerance: Decimal,
    pub min_amount: Decimal,
    pub min_description_len: usize,
    pub default_currency: String,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_amount: DEFAULT_MIN_AMOUNT,
            min_description_len: DEFAULT_MIN_DESCRIPTION_LEN,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl SplitPolicy {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Источник значений передаётся снаружи, чтобы тесты не трогали окружение.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let policy = Self {
            tolerance: try_load(&lookup, TOLERANCE_VAR, DEFAULT_TOLERANCE)?,
            min_amount: try_load(&lookup, MIN_AMOUNT_VAR, DEFAULT_MIN_AMOUNT)?,
            min_description_len: try_load(
                &lookup,
                MIN_DESCRIPTION_LEN_VAR,
                DEFAULT_MIN_DESCRIPTION_LEN,
            )?,
            default_currency: try_load(
                &lookup,
                DEFAULT_CURRENCY_VAR,
                DEFAULT_CURRENCY.to_string(),
            )?,
        };
        policy.validate()
    }

    pub fn with_tolerance(self, tolerance: Decimal) -> Result<Self> {
        Self { tolerance, ..self }.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.tolerance <= Decimal::ZERO {
            return Err(BillsplitError::Config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.min_amount <= Decimal::ZERO {
            return Err(BillsplitError::Config(format!(
                "minimum amount must be positive, got {}",
                self.min_amount
            )));
        }
        if self.default_currency.trim().is_empty() {
            return Err(BillsplitError::Config("default currency is empty".into()));
        }
        Ok(self)
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
        Some(raw) => raw.trim().parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            BillsplitError::Config(format!("{key}={raw:?}: {e}"))
        }),
    }
}
