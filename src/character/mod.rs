pub mod catalog;

pub use catalog::{Character, CharacterCatalog};
