//! Backend for the Belong residential care site: the inquiry wizards that
//! families, case managers and job seekers step through, and the expandable
//! content cards on the marketing pages.

pub mod cards;
pub mod config;
pub mod error;
pub mod flows;
pub mod intake;
pub mod telemetry;
pub mod wizard;
