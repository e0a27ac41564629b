//! Domain logic for the Fincount service: error taxonomy, identifiers,
//! closed enumerations, validation and ownership policy. No I/O.

pub mod batch;
pub mod catalog;
pub mod error;
pub mod ownership;
pub mod pagination;
pub mod types;
pub mod validation;
