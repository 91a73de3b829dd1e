pub mod case;
pub mod mapping;
