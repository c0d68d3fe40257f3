pub mod auth;
pub mod booking;
pub mod conflict;
pub mod consultation;
pub mod deposit;
pub mod profile;
pub mod quote;
pub mod screens;
pub mod validation;
