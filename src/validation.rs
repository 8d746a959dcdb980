use colored::Colorize;
use inquire::Text;

use crate::error::AppError;

/// Maximum length for a profile name
const MAX_PROFILE_NAME_LENGTH: usize = 30;
/// Characters that would break the `[profile "<name>"]` section header
const FORBIDDEN_NAME_CHARS: [char; 4] = ['"', ']', '\n', '\\'];
/// Menu entry that cannot double as a profile name
pub const BACK_OPTION: &str = "back";

/// Prompts user for input until valid input is provided
pub fn prompt_until_valid<F>(prompt_message: &str, input_validation: F) -> Result<String, AppError>
where
    F: Fn(&str) -> Result<(), AppError>,
{
    loop {
        let input: String = Text::new(prompt_message).prompt()?;
        match input_validation(&input) {
            Ok(_) => break Ok(input),
            Err(AppError::Validation(msg)) => println!("{}", msg.red()),
            Err(e) => return Err(e),
        }
    }
}

/// Validates a profile name
pub fn validate_profile_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        Err(AppError::Validation("Profile name cannot be empty".to_string()))
    } else if name.chars().count() > MAX_PROFILE_NAME_LENGTH {
        Err(AppError::Validation(format!(
            "Profile name too long (max {} characters)",
            MAX_PROFILE_NAME_LENGTH
        )))
    } else if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        Err(AppError::Validation(format!(
            "Profile name cannot contain {:?}",
            c
        )))
    } else if name == BACK_OPTION {
        Err(AppError::Validation("Profile name cannot be 'back'".to_string()))
    } else {
        Ok(())
    }
}

/// Validates that a required field was filled in
///
/// # Arguments
/// * `field` - Field label used in the message
/// * `value` - Entered value
pub fn validate_required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{} cannot be empty", field)))
    } else {
        Ok(())
    }
}
