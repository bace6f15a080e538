pub mod generate;
pub mod prompt;
pub mod recover;
pub mod repair;
pub mod validate;
