pub mod coach;
pub mod course;
pub mod course_booking;
pub mod credit_package;
pub mod credit_purchase;
pub mod skill;
pub mod user;
