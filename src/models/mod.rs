pub mod meal;
pub mod meal_request;
pub mod package;
pub mod payment;
pub mod review;
pub mod user;

pub use meal::*;
pub use meal_request::*;
pub use package::*;
pub use payment::*;
pub use review::*;
pub use user::*;
