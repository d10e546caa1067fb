//! Client library for the timedesk timesheet and project-billing backend.
//!
//! The interesting part lives in [`assignments`]: the project modal's
//! role/employee editing session and the save-time reconciliation that
//! converges server state with the edited list. [`form`] ties the editing
//! session to the project draft and the save sequence; [`report`] covers
//! the daily timesheet report screen.

pub mod api;
pub mod assignments;
pub mod config;
pub mod credentials;
pub mod error;
pub mod form;
pub mod models;
pub mod notify;
pub mod report;

pub use api::{ApiClient, ProjectApi};
pub use error::{AppError, Result};
