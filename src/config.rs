use std::env;

use crate::errors::AppError;
use crate::models::WeeklyHours;
use crate::services::composer::DEFAULT_BUSINESS_NAME;
use crate::services::whatsapp::normalize_phone;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub business_name: String,
    pub whatsapp_number: String,
    pub catalog_path: Option<String>,
    pub business_hours: WeeklyHours,
    pub utc_offset_minutes: i32,
    pub max_message_length: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            whatsapp_number: "+237656467051".to_string(),
            catalog_path: None,
            business_hours: WeeklyHours::default(),
            utc_offset_minutes: 60,
            max_message_length: 1000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let business_hours = match env::var("BUSINESS_HOURS") {
            Ok(json) if !json.trim().is_empty() => WeeklyHours::from_json(&json)?,
            _ => defaults.business_hours,
        };

        let config = Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            business_name: env::var("BUSINESS_NAME").unwrap_or(defaults.business_name),
            whatsapp_number: env::var("WHATSAPP_NUMBER").unwrap_or(defaults.whatsapp_number),
            catalog_path: env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty()),
            business_hours,
            utc_offset_minutes: env::var("UTC_OFFSET_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.utc_offset_minutes),
            max_message_length: env::var("MAX_MESSAGE_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_message_length),
        };

        // Refuse to start with a number no deep link could be built for.
        normalize_phone(&config.whatsapp_number)?;
        if !(-720..=840).contains(&config.utc_offset_minutes) {
            return Err(AppError::Config(format!(
                "UTC_OFFSET_MINUTES out of range: {}",
                config.utc_offset_minutes
            )));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_number_is_valid() {
        let config = AppConfig::default();
        assert_eq!(normalize_phone(&config.whatsapp_number).unwrap(), "237656467051");
        assert_eq!(config.max_message_length, 1000);
    }
}
