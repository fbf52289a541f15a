//! Account settings: `profile/state`.

use flux_derive::state;
use serde::Serialize;

/// Profile fields mirrored to local storage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
}

impl ProfileField {
    pub const ALL: [ProfileField; 3] = [ProfileField::Name, ProfileField::Email, ProfileField::Phone];

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl Profile {
    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
        }
    }

    pub fn set_field(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Name => self.name = value,
            ProfileField::Email => self.email = value,
            ProfileField::Phone => self.phone = value,
        }
    }
}

#[state("profile/state")]
#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileState {
    pub profile: Profile,
    /// Edited since the last load or save.
    pub dirty: bool,
    /// The last save succeeded and nothing changed since.
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
