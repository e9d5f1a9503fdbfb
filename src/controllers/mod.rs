pub mod home_controller;
pub mod cart_controller;
pub mod realtime_controller;
