//! Wire and domain types shared by the employee backend and its clients.

pub mod domain;
pub mod error;
pub mod protocol;
