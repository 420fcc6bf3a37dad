use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::controller::MatchSettings;

/// Period length and auto-advance flag, as read and written by `/match/settings`.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate, Clone, Copy, PartialEq, Eq)]
pub struct SettingsDto {
    /// Length of a period in seconds (1 second to 2 hours).
    #[validate(range(min = 1, max = 7200))]
    pub period_length_secs: u32,
    /// Start the next period automatically when the clock runs out.
    pub auto_advance: bool,
}

impl From<MatchSettings> for SettingsDto {
    fn from(value: MatchSettings) -> Self {
        Self {
            period_length_secs: value.period_length_secs,
            auto_advance: value.auto_advance,
        }
    }
}

impl From<SettingsDto> for MatchSettings {
    fn from(value: SettingsDto) -> Self {
        Self {
            period_length_secs: value.period_length_secs,
            auto_advance: value.auto_advance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_is_invalid() {
        let dto = SettingsDto {
            period_length_secs: 0,
            auto_advance: false,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn deserializes_from_json() {
        let dto: SettingsDto =
            serde_json::from_str(r#"{"period_length_secs": 600, "auto_advance": true}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(
            MatchSettings::from(dto),
            MatchSettings {
                period_length_secs: 600,
                auto_advance: true
            }
        );
    }
}
