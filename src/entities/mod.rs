pub mod prelude;

pub mod tasks;
pub mod users;
