pub mod db;
pub mod engine;
pub mod map;
pub mod profile;
pub mod view;
