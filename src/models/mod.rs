pub mod product;
pub mod response;
pub mod user;
