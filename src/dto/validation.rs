//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest accepted team name, in characters.
pub const MAX_TEAM_NAME_CHARS: usize = 40;

/// Validates that a team name fits on the scoreboard and holds no control characters.
///
/// # Examples
///
/// ```ignore
/// validate_team_name("Lions")      // Ok
/// validate_team_name("Li\nons")    // Err - control character
/// validate_team_name(&"x".repeat(41)) // Err - too long
/// ```
pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    let length = name.chars().count();
    if length > MAX_TEAM_NAME_CHARS {
        let mut err = ValidationError::new("team_name_length");
        err.message = Some(
            format!("Team name must be at most {MAX_TEAM_NAME_CHARS} characters (got {length})")
                .into(),
        );
        return Err(err);
    }

    if name.chars().any(char::is_control) {
        let mut err = ValidationError::new("team_name_format");
        err.message = Some("Team name must not contain control characters".into());
        return Err(err);
    }

    Ok(())
}
