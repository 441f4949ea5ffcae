//! `storefront-client`
//!
//! **Responsibility:** the networked half of the product form.
//!
//! This crate provides:
//! - configuration (`ClientConfig`)
//! - the login call (`AuthApi`)
//! - multipart product creation (`ProductApi`, `HttpProductApi`)
//! - the submission pipeline tying form, session and notifications together

pub mod api;
pub mod auth_api;
pub mod config;
pub mod error;
mod http;
pub mod pipeline;

pub use api::{HttpProductApi, ProductApi};
pub use auth_api::AuthApi;
pub use config::{ClientConfig, ConfigError};
pub use error::{LoginError, SubmissionError};
pub use pipeline::{PendingSubmission, SUCCESS_MESSAGE, SubmissionPipeline};
