pub mod me;
pub mod report;
pub mod reported;
pub mod save;
pub mod saved;
pub mod update_profile;
