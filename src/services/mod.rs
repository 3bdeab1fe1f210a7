pub mod cart_service;
pub mod menu_service;
pub mod order_service;
pub mod review_service;
pub mod stats_service;
pub mod user_service;
