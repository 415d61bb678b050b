//! In-memory data source.

use pricing_types::{CalculatorData, CalculatorDataSource, ExchangeRateEntry, LoadError, Tariff};

/// Serves a fixed catalog and rate table.
///
/// Useful for development, demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    data: CalculatorData,
}

impl StaticDataSource {
    pub fn new(tariffs: Vec<Tariff>, exchange_rates: Vec<ExchangeRateEntry>) -> Self {
        Self {
            data: CalculatorData {
                tariffs,
                exchange_rates,
            },
        }
    }
}

impl From<CalculatorData> for StaticDataSource {
    fn from(data: CalculatorData) -> Self {
        Self { data }
    }
}

#[async_trait::async_trait]
impl CalculatorDataSource for StaticDataSource {
    async fn fetch(&self) -> Result<CalculatorData, LoadError> {
        Ok(self.data.clone())
    }
}
