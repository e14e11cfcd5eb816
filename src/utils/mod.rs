pub mod currency;
pub mod email_registry;
pub mod locale;
pub mod paging;
pub mod random;
pub mod timezone;
