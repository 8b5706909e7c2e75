pub mod audit;
pub mod auth;
pub mod id;
pub mod notification;
pub mod reservation;
pub mod role;
pub mod space;
pub mod user;
