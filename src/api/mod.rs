pub mod auth;
pub mod health;
pub mod meal_requests;
pub mod meals;
pub mod packages;
pub mod payments;
pub mod reviews;
pub mod swagger;
pub mod upcoming;
pub mod users;
