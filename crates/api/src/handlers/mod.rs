pub mod auth;
pub mod collection;
pub mod figures;
pub mod series;
pub mod users;
