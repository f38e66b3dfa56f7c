pub mod errors;
pub mod db;
pub mod collection;
pub mod reel;
pub mod ordered_record;
pub mod contact_info;
pub mod admin_user;

pub use collection::{Collection, FieldKind, FieldSpec};

#[cfg(test)]
mod tests;
