//! Forecast outlook service

use std::{fmt, sync::Arc};

use domain::{
    entities::{DEFAULT_OUTLOOK_BLOCKS, Outlook},
    value_objects::GeoLocation,
};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::ForecastOutlookPort};

/// Builds the current-plus-upcoming forecast table
pub struct OutlookService {
    location: GeoLocation,
    port: Arc<dyn ForecastOutlookPort>,
    blocks: usize,
}

impl fmt::Debug for OutlookService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlookService")
            .field("location", &self.location)
            .field("blocks", &self.blocks)
            .finish_non_exhaustive()
    }
}

impl OutlookService {
    /// Create a service showing the default number of blocks
    #[must_use]
    pub fn new(location: GeoLocation, port: Arc<dyn ForecastOutlookPort>) -> Self {
        Self {
            location,
            port,
            blocks: DEFAULT_OUTLOOK_BLOCKS,
        }
    }

    /// Override the number of upcoming blocks
    #[must_use]
    pub const fn with_blocks(mut self, blocks: usize) -> Self {
        self.blocks = blocks;
        self
    }

    /// Fetch current conditions and the upcoming blocks
    ///
    /// # Errors
    ///
    /// Unlike the snapshot, the outlook needs both halves; either failing
    /// fails the whole table.
    #[instrument(skip(self), fields(location = %self.location, blocks = self.blocks))]
    pub async fn get_outlook(&self) -> Result<Outlook, ApplicationError> {
        if self.blocks == 0 {
            return Err(ApplicationError::InvalidOperation(
                "outlook needs at least one forecast block".into(),
            ));
        }

        let (current, upcoming) = tokio::try_join!(
            self.port.get_current_block(&self.location),
            self.port.get_forecast_blocks(&self.location, self.blocks),
        )?;

        debug!(upcoming = upcoming.len(), "Outlook assembled");
        Ok(Outlook::new(current, upcoming, self.blocks))
    }
}
