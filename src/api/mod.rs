pub mod context;
pub mod employee;
pub mod home;
