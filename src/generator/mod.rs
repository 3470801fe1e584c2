pub mod locations;
pub mod script;
