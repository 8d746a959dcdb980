use colored::Colorize;
use inquire::{Confirm, Select};

use crate::{
    cli::ProfileFields,
    commands::{self, ensure_store},
    error::AppError,
    git::{CommandRunner, Scope},
    store::ProfileStore,
    validation::{BACK_OPTION, prompt_until_valid, validate_profile_name},
};

/// Runs interactive menu interface
pub fn run_menu<R: CommandRunner>(store: &ProfileStore<R>) -> Result<(), AppError> {
    ensure_store(store)?;
    loop {
        let actions: Vec<&'static str> = vec![
            "use profile",
            "add profile",
            "delete profile",
            "show current profile",
            "show all profiles",
            "quit",
        ];

        let action_selected: &'static str =
            Select::new(&format!("{}", "select action".blue()), actions).prompt()?;

        match action_selected {
            "use profile" => menu_use_profile(store)?,
            "add profile" => menu_add_profile(store)?,
            "delete profile" => menu_delete_profile(store)?,
            "show current profile" => commands::show_current(store, Scope::Global)?,
            "show all profiles" => commands::list_profiles(store, false)?,
            "quit" => {
                println!("{}", "quitting".yellow());
                break Ok(());
            }
            _ => unreachable!("unexpected input"),
        }
    }
}

/// Asks for a stored profile, `None` when the user goes back
fn select_profile<R: CommandRunner>(
    store: &ProfileStore<R>,
    prompt: &str,
) -> Result<Option<String>, AppError> {
    let names: Vec<String> = store.list_profiles()?;
    if names.is_empty() {
        println!("{}", "no profiles found".red());
        return Ok(None);
    }

    let selected: String =
        Select::new(&format!("{}", prompt.blue()), build_profile_choices(&names)).prompt()?;
    Ok((selected != BACK_OPTION).then_some(selected))
}

/// Menu for activating a profile
fn menu_use_profile<R: CommandRunner>(store: &ProfileStore<R>) -> Result<(), AppError> {
    let Some(name) = select_profile(store, "select profile to use:")? else {
        return Ok(());
    };
    let global: bool = Confirm::new("apply globally?").with_default(false).prompt()?;
    commands::use_profile(store, &name, Scope::from_global(global))
}

/// Menu for adding a new profile
fn menu_add_profile<R: CommandRunner>(store: &ProfileStore<R>) -> Result<(), AppError> {
    let name: String = prompt_until_valid(&format!("{}", "enter profile name:".blue()), |input| {
        validate_profile_name(input)?;
        if store.check_profile_exists(input)? {
            return Err(AppError::Validation("Profile already exists".to_string()));
        }
        Ok(())
    })?;
    commands::add_profile(store, &name, ProfileFields::default())
}

/// Menu for deleting a profile
fn menu_delete_profile<R: CommandRunner>(store: &ProfileStore<R>) -> Result<(), AppError> {
    let Some(name) = select_profile(store, "select profile to delete:")? else {
        return Ok(());
    };
    commands::delete_profile(store, &name)
}

/// Builds list of profile names for menu to display
pub fn build_profile_choices(names: &[String]) -> Vec<String> {
    let mut choices: Vec<String> = names.to_vec();
    choices.dedup();
    choices.push(BACK_OPTION.to_string());
    choices
}
