//! Calculator data source port.
//!
//! The loader calls this once at start-up. Implementations can be HTTP
//! clients, in-memory fixtures, etc.

use crate::dto::CalculatorData;
use crate::error::LoadError;

/// Port trait for whatever supplies the tariff catalog and exchange rates.
#[async_trait::async_trait]
pub trait CalculatorDataSource: Send + Sync {
    /// Fetches both datasets together.
    async fn fetch(&self) -> Result<CalculatorData, LoadError>;
}
