pub mod api;
pub mod cli;
pub mod db;
pub mod paths;

pub fn welcome() -> &'static str {
    "Welcome to Estetica Plus!"
}
