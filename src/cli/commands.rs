pub mod build;
pub mod config;
pub mod events;
pub mod inspect;
pub mod print;
pub mod serve;
