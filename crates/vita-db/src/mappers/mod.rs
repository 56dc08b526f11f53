//! Model → entity conversions

mod health;
mod profile;
mod social;
