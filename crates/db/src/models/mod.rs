pub mod figure;
pub mod series;
pub mod user;
