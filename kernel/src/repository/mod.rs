pub mod payment;
pub mod reservation;
pub mod slot;
pub mod user;
pub mod vehicle;
