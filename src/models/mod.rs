mod post;
mod user;

pub use post::{Metrics, Platform, Post, PostSnapshot};
pub use user::{CompletedFields, Profile, ProfileField, Role, User, UserSummary};
