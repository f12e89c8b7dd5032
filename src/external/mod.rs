pub mod catalog;
pub mod console;
pub mod geolocation;
