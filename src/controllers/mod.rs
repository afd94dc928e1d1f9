pub mod admin;
pub mod coach;
pub mod course;
pub mod credit_package;
pub mod skill;
pub mod user;
