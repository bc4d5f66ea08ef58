pub mod formatting;
pub mod mentions;
pub mod permissions;
