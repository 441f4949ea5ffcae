//! Submission pipeline: form -> request -> user feedback.
//!
//! Split into three steps so a caller that keeps the form interactive only
//! borrows it before and after the network wait:
//!
//! 1. [`SubmissionPipeline::prepare`] checks the session and the form and
//!    moves the form to `Submitting`.
//! 2. [`SubmissionPipeline::send`] performs the single request.
//! 3. [`SubmissionPipeline::apply`] emits exactly one notification and
//!    clears (success) or keeps (failure) the form.
//!
//! [`SubmissionPipeline::submit`] runs all three in order and holds the form
//! for the whole call.

use std::sync::Arc;

use storefront_auth::{AuthContext, Session};
use storefront_core::{Notification, Notifier};
use storefront_products::{ProductForm, ProductPayload};

use crate::api::ProductApi;
use crate::error::SubmissionError;

pub const SUCCESS_MESSAGE: &str = "product created successful!";

/// A submission that passed the gate and validation, waiting to be sent.
///
/// Owns a copy of the session, so a logout after `prepare` does not affect
/// the request.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    payload: ProductPayload,
    session: Session,
}

pub struct SubmissionPipeline<A> {
    api: A,
    notifier: Arc<dyn Notifier>,
}

impl<A: ProductApi> SubmissionPipeline<A> {
    pub fn new(api: A, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Gate + field validation. Sends nothing and notifies nothing.
    pub fn prepare(
        &self,
        form: &mut ProductForm,
        auth: &AuthContext,
    ) -> Result<PendingSubmission, SubmissionError> {
        let session = auth
            .current_session()
            .cloned()
            .ok_or(SubmissionError::Unauthenticated)?;

        let payload = form.begin_submission()?;
        Ok(PendingSubmission { payload, session })
    }

    /// Perform the request. Single attempt.
    pub async fn send(&self, pending: &PendingSubmission) -> Result<(), SubmissionError> {
        self.api
            .create_product(&pending.payload, &pending.session)
            .await
    }

    /// Route the outcome back to the form and the user.
    pub fn apply(&self, form: &mut ProductForm, outcome: &Result<(), SubmissionError>) {
        match outcome {
            Ok(()) => {
                tracing::info!("product created");
                self.notifier.notify(Notification::success(SUCCESS_MESSAGE));
                form.submission_succeeded();
            }
            Err(e) => {
                tracing::warn!(error = %e, "product submission failed");
                self.notifier.notify(Notification::error(e.to_string()));
                form.submission_failed();
            }
        }
    }

    /// Prepare, send and apply in one go.
    pub async fn submit(
        &self,
        form: &mut ProductForm,
        auth: &AuthContext,
    ) -> Result<(), SubmissionError> {
        let pending = match self.prepare(form, auth) {
            Ok(pending) => pending,
            Err(e) => {
                tracing::debug!(error = %e, "submission not started");
                return Err(e);
            }
        };

        let outcome = self.send(&pending).await;
        self.apply(form, &outcome);
        outcome
    }
}
