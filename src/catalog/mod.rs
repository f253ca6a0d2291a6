mod client;
mod exercise;
mod filter;

pub use client::{ExerciseDbClient, FetchError, RequestGate, RequestTicket};
pub use exercise::{Exercise, BODY_PARTS};
pub use filter::{BodyPartFilter, ExerciseFilter};
