pub mod admin;
pub mod panels;
pub mod plot;
pub mod views;
