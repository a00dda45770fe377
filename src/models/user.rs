use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::PostSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// The five profile fields a user can fill in. Each one pays a one-time
/// completion bonus the first time it is ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    ProfileImage,
    Linkedin,
    Instagram,
    Twitter,
    Gmail,
}

impl ProfileField {
    pub const ALL: [ProfileField; 5] = [
        ProfileField::ProfileImage,
        ProfileField::Linkedin,
        ProfileField::Instagram,
        ProfileField::Twitter,
        ProfileField::Gmail,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "profileImage" => Some(Self::ProfileImage),
            "linkedin" => Some(Self::Linkedin),
            "instagram" => Some(Self::Instagram),
            "twitter" => Some(Self::Twitter),
            "gmail" => Some(Self::Gmail),
            _ => None,
        }
    }

    /// JSON path of this field inside the `profile` and
    /// `completed_fields` documents.
    pub fn json_path(&self) -> &'static str {
        match self {
            Self::ProfileImage => "$.profileImage",
            Self::Linkedin => "$.linkedin",
            Self::Instagram => "$.instagram",
            Self::Twitter => "$.twitter",
            Self::Gmail => "$.gmail",
        }
    }

    /// One-time completion bonus in credits.
    pub fn bonus(&self) -> i64 {
        match self {
            Self::ProfileImage => 20,
            _ => 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub profile_image: String,
    pub linkedin: String,
    pub instagram: String,
    pub twitter: String,
    pub gmail: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletedFields {
    pub profile_image: bool,
    pub linkedin: bool,
    pub instagram: bool,
    pub twitter: bool,
    pub gmail: bool,
}

impl CompletedFields {
    pub fn get(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::ProfileImage => self.profile_image,
            ProfileField::Linkedin => self.linkedin,
            ProfileField::Instagram => self.instagram,
            ProfileField::Twitter => self.twitter,
            ProfileField::Gmail => self.gmail,
        }
    }
}

/// One user document. The nested maps and the two post arrays live in
/// JSON columns and are always mutated through single-statement updates
/// so the award-once invariants hold under concurrent requests.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub credits: i64,
    #[sqlx(json)]
    pub profile: Profile,
    #[sqlx(json)]
    pub completed_fields: CompletedFields,
    pub last_login: Option<NaiveDate>,
    #[sqlx(json)]
    pub saved_posts: Vec<PostSnapshot>,
    #[sqlx(json)]
    pub reported_posts: Vec<PostSnapshot>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Roster row for the admin panel.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub credits: i64,
    pub role: Role,
}
