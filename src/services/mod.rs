pub mod api;
pub mod storage;
pub mod cart_service;
