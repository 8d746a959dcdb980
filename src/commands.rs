//! One function per subcommand. Each gates on the config file existing,
//! calls into [`ProfileStore`] and prints the outcome.

use colored::{ColoredString, Colorize};
use inquire::Text;
use serde::Serialize;

use crate::{
    cli::ProfileFields,
    error::AppError,
    git::{CommandRunner, Scope},
    profile::Profile,
    store::{ProfileStore, profile_section},
    validation::{prompt_until_valid, validate_profile_name, validate_required},
};

/// JSON shape of `list --json`
#[derive(Serialize, Debug)]
struct ProfileListing<'a> {
    profiles: &'a [String],
    current: &'a str,
}

fn report<R: CommandRunner>(store: &ProfileStore<R>, message: ColoredString) {
    if !store.config().quiet {
        println!("{}", message);
    }
}

/// Fails with `StoreNotFound` when the git config file is missing
pub fn ensure_store<R: CommandRunner>(store: &ProfileStore<R>) -> Result<(), AppError> {
    if store.has_valid_store() {
        Ok(())
    } else {
        Err(AppError::StoreNotFound(store.config_path().to_path_buf()))
    }
}

/// Fails with `ProfileNotFound` unless a `[profile "<name>"]` section exists
///
/// The config listing match is loose (`work` matches `workshop`), so the
/// section names in the config file must also contain `name` exactly.
pub fn require_profile<R: CommandRunner>(store: &ProfileStore<R>, name: &str) -> Result<(), AppError> {
    if store.check_profile_exists(name)? && store.list_profiles()?.iter().any(|stored| stored == name) {
        Ok(())
    } else {
        Err(AppError::ProfileNotFound(name.to_string()))
    }
}

/// Reads the fields stored under `profile.<name>`
pub fn read_stored_profile<R: CommandRunner>(
    store: &ProfileStore<R>,
    name: &str,
) -> Result<Profile, AppError> {
    Ok(store.get_profile(&profile_section(name))?.renamed(name))
}

/// Builds a profile from the given fields, prompting for the missing ones
fn build_profile(name: &str, fields: ProfileFields) -> Result<Profile, AppError> {
    let interactive = fields.user.is_none() || fields.email.is_none();
    let user_name: String = match fields.user {
        Some(user) => user,
        None => prompt_until_valid(&format!("{}", "enter git username:".blue()), |input| {
            validate_required("Username", input)
        })?,
    };
    let email: String = match fields.email {
        Some(email) => email,
        None => prompt_until_valid(&format!("{}", "enter git email:".blue()), |input| {
            validate_required("Email", input)
        })?,
    };
    let signing_key: Option<String> = match fields.signing_key {
        Some(key) => Some(key),
        None if interactive => {
            Some(Text::new(&format!("{}", "enter signing key (optional):".blue())).prompt()?)
        }
        None => None,
    };
    Ok(Profile::new(name, user_name, email, signing_key))
}

/// Adds a new profile, refusing to overwrite an existing one
pub fn add_profile<R: CommandRunner>(
    store: &ProfileStore<R>,
    name: &str,
    fields: ProfileFields,
) -> Result<(), AppError> {
    validate_profile_name(name)?;
    ensure_store(store)?;
    if store.check_profile_exists(name)? {
        return Err(AppError::ProfileExists(name.to_string()));
    }

    let profile: Profile = build_profile(name, fields)?;
    store.add_profile(&profile)?;
    report(store, format!("profile '{}' added", name).green());
    report(store, profile.to_string().normal());
    Ok(())
}

/// Re-writes an existing profile in place, keeping fields that were not given
///
/// A cleared signing key is unset afterwards. When the profile is the globally
/// active one, `user.*` is refreshed too; local activations are left as they are.
pub fn update_profile<R: CommandRunner>(
    store: &ProfileStore<R>,
    name: &str,
    fields: ProfileFields,
) -> Result<(), AppError> {
    ensure_store(store)?;
    require_profile(store, name)?;

    let existing: Profile = read_stored_profile(store, name)?;
    let profile = Profile::new(
        name,
        fields.user.unwrap_or_else(|| existing.user_name().to_string()),
        fields.email.unwrap_or_else(|| existing.email().to_string()),
        fields
            .signing_key
            .or_else(|| existing.signing_key().map(str::to_string)),
    );
    let key_cleared: bool = existing.signing_key().is_some() && profile.signing_key().is_none();

    store.add_profile(&profile)?;
    if key_cleared {
        store.unset_key(Scope::Global, &format!("{}.signingkey", profile_section(name)))?;
    }

    if store.get_current(Scope::Global)? == name {
        store.set_profile(&profile, Scope::Global)?;
        if key_cleared && store.active_identity()?.signing_key().is_some() {
            store.unset_key(Scope::Global, "user.signingkey")?;
        }
    }

    report(store, format!("profile '{}' updated", name).green());
    report(store, profile.to_string().normal());
    Ok(())
}

/// Deletes a stored profile
pub fn delete_profile<R: CommandRunner>(store: &ProfileStore<R>, name: &str) -> Result<(), AppError> {
    ensure_store(store)?;
    require_profile(store, name)?;
    store.delete_profile(name)?;
    report(store, format!("profile '{}' deleted", name).green());
    Ok(())
}

/// Lists stored profiles, marking the globally active one
pub fn list_profiles<R: CommandRunner>(store: &ProfileStore<R>, json: bool) -> Result<(), AppError> {
    ensure_store(store)?;
    let profiles: Vec<String> = store.list_profiles()?;
    let current: String = store.get_current(Scope::Global)?;

    if json {
        let listing = ProfileListing {
            profiles: &profiles,
            current: &current,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if profiles.is_empty() {
        report(store, "no profiles found".yellow());
        return Ok(());
    }
    for profile in &profiles {
        if *profile == current {
            println!("{} {}", "*".green(), profile.green());
        } else {
            println!("  {}", profile);
        }
    }
    Ok(())
}

/// Activates a stored profile in the chosen scope
pub fn use_profile<R: CommandRunner>(
    store: &ProfileStore<R>,
    name: &str,
    scope: Scope,
) -> Result<(), AppError> {
    ensure_store(store)?;
    require_profile(store, name)?;
    let profile: Profile = read_stored_profile(store, name)?;
    store.set_profile(&profile, scope)?;

    let scope_label = match scope {
        Scope::Global => "globally",
        Scope::Local => "locally",
    };
    report(
        store,
        format!("switched to profile '{}' {}", name, scope_label).green(),
    );
    Ok(())
}

/// Shows the active profile name
pub fn show_current<R: CommandRunner>(store: &ProfileStore<R>, scope: Scope) -> Result<(), AppError> {
    ensure_store(store)?;
    let current: String = store.get_current(scope)?;
    if store.config().quiet {
        println!("{}", current);
    } else if current.is_empty() {
        println!("{}", "no profile active".yellow());
    } else {
        println!("{} {}", "current profile:".blue(), current);
    }
    Ok(())
}

/// Shows a stored profile, or the active identity when no name is given
pub fn show_profile<R: CommandRunner>(
    store: &ProfileStore<R>,
    name: Option<&str>,
    json: bool,
) -> Result<(), AppError> {
    ensure_store(store)?;
    let profile: Profile = match name {
        Some(name) => {
            require_profile(store, name)?;
            read_stored_profile(store, name)?
        }
        None => store.active_identity()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("{}", profile);
    }
    Ok(())
}
