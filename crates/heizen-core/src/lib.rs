//! Types shared by every Heizen feature crate

mod error;

pub use error::{ErrorBody, ErrorDetails, HttpError};
