pub mod controller;
pub mod request;
pub mod scratch;
