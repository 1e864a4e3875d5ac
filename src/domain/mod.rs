pub mod business_hours;
pub mod clock;
pub mod id;
pub mod pricing;
pub mod reservation;
pub mod resource;
pub mod scheduler;
pub mod slot;
pub mod store;
pub mod user;
