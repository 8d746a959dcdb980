use std::fmt;

use serde::Serialize;

/// Represents a Git identity profile stored in the git config
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Profile name, used as the `[profile "<name>"]` subsection
    name: String,
    /// Git username (user.name)
    user_name: String,
    /// Git email address (user.email)
    email: String,
    /// Optional signing key (user.signingkey)
    #[serde(skip_serializing_if = "Option::is_none")]
    signing_key: Option<String>,
}

impl Profile {
    /// Builds a profile. An empty signing key is treated as no signing key.
    pub fn new(
        name: impl Into<String>,
        user_name: impl Into<String>,
        email: impl Into<String>,
        signing_key: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            user_name: user_name.into(),
            email: email.into(),
            signing_key: signing_key.filter(|key| !key.is_empty()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn signing_key(&self) -> Option<&str> {
        self.signing_key.as_deref()
    }

    /// Same identity under a different profile name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.name)?;
        writeln!(f, "  name:       {}", self.user_name)?;
        write!(f, "  email:      {}", self.email)?;
        if let Some(key) = &self.signing_key {
            write!(f, "\n  signingkey: {}", key)?;
        }
        Ok(())
    }
}
