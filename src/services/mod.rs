//! Domain operations. Each function takes the store handle it works on and
//! returns an [`AppError`](crate::error::AppError) for every rejected request;
//! none of them know about HTTP.

pub mod account;
pub mod booking;
pub mod catalog;
pub mod coach;
pub mod course;
pub mod credit;
pub mod ledger;
