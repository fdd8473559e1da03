//! Submission state machine and user-visible alerts.

use crate::dto::api::SubmitResponse;
use crate::forms::reception::ReceptionActPayload;
use crate::state::{Command, LookupResult, ReceptionState};

/// Message shown when the submit request itself failed.
pub const TRANSPORT_ERROR_MESSAGE: &str = "Произошла ошибка при сохранении акта";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    /// The act was posted and no response has arrived yet.
    Submitting,
    /// The server created the act; the confirmation dialog is open.
    Succeeded { act_number: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    /// The form is incomplete; nothing was sent.
    Validation,
    /// The request could not be completed.
    Transport,
    /// The server refused the act.
    Application,
}

/// Blocking message the receptionist must acknowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl ReceptionState {
    pub fn can_submit(&self) -> bool {
        self.phase != SubmissionPhase::Submitting
    }

    pub(crate) fn request_submit(&mut self) -> Vec<Command> {
        if !self.can_submit() {
            log::warn!("Ignoring submit while a reception act is being saved");
            return Vec::new();
        }

        match ReceptionActPayload::try_from(&*self) {
            Ok(payload) => {
                log::info!(
                    "Submitting reception act with {} equipment entries",
                    payload.equipment_list.len()
                );
                self.alert = None;
                self.phase = SubmissionPhase::Submitting;
                vec![Command::SubmitAct { payload }]
            }
            Err(err) => {
                log::warn!("Reception act rejected: {err:?}");
                self.alert = Some(Alert::new(AlertKind::Validation, err.to_string()));
                self.phase = SubmissionPhase::Editing;
                Vec::new()
            }
        }
    }

    pub(crate) fn submit_completed(&mut self, result: LookupResult<SubmitResponse>) {
        if self.phase != SubmissionPhase::Submitting {
            log::warn!("Dropping submit response outside of submission");
            return;
        }

        match result {
            Ok(SubmitResponse {
                success: true,
                act_number,
                ..
            }) => {
                let act_number = act_number.unwrap_or_default();
                log::info!("Reception act {act_number} created");
                self.phase = SubmissionPhase::Succeeded { act_number };
            }
            Ok(SubmitResponse { error, .. }) => {
                let error = error.unwrap_or_default();
                log::error!("Server rejected reception act: {error}");
                self.alert = Some(Alert::new(
                    AlertKind::Application,
                    format!("Ошибка: {error}"),
                ));
                self.phase = SubmissionPhase::Editing;
            }
            Err(err) => {
                log::error!("Failed to save reception act: {err}");
                self.alert = Some(Alert::new(AlertKind::Transport, TRANSPORT_ERROR_MESSAGE));
                self.phase = SubmissionPhase::Editing;
            }
        }
    }

    pub(crate) fn close_confirmation(&mut self) {
        if matches!(self.phase, SubmissionPhase::Succeeded { .. }) {
            self.phase = SubmissionPhase::Editing;
        }
    }
}
