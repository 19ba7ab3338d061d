use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};

use crate::config::AppConfig;
use crate::models::ApartmentListing;
use crate::services::composer::MessageComposer;

pub struct AppState {
    pub config: AppConfig,
    pub catalog: Vec<ApartmentListing>,
    pub composer: MessageComposer,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: Vec<ApartmentListing>) -> Self {
        let composer = MessageComposer::new(&config.business_name);
        Self {
            config,
            catalog,
            composer,
        }
    }

    /// Wall-clock time in the business's timezone.
    pub fn local_now(&self) -> NaiveDateTime {
        let offset = FixedOffset::east_opt(self.config.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix());
        Utc::now().with_timezone(&offset).naive_local()
    }
}
