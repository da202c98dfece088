//! Forecast outlook port

use async_trait::async_trait;
use domain::{entities::ForecastBlock, value_objects::GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the 3-hour forecast table
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastOutlookPort: Send + Sync {
    /// The "now" column, labelled as such
    async fn get_current_block(
        &self,
        location: &GeoLocation,
    ) -> Result<ForecastBlock, ApplicationError>;

    /// Up to `count` upcoming 3-hour blocks, oldest first
    async fn get_forecast_blocks(
        &self,
        location: &GeoLocation,
        count: usize,
    ) -> Result<Vec<ForecastBlock>, ApplicationError>;
}
