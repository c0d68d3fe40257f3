use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::config::AppConfig;
use crate::db::{BookingStore, UserStore};
use crate::services::validation::BookingRules;

pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub users: Arc<dyn UserStore>,
    pub config: AppConfig,
}

impl AppState {
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    pub fn rules(&self) -> BookingRules<'_> {
        BookingRules {
            today: self.today(),
            service_region: self.config.service_region.as_deref(),
        }
    }
}
