pub mod booking;
pub mod employee;
pub mod offer;
pub mod opening_hours;
pub mod service;
pub mod slot;
pub mod time_range;
