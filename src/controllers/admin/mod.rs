pub mod credits;
pub mod users;
