//! Form definitions and payload assembly for the reception act.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::EntryIndex;

pub mod client;
pub mod reception;

#[derive(Debug, Error)]
/// Errors that abort a submission before anything is sent.
///
/// The messages are shown to the receptionist as is.
pub enum FormError {
    #[error("Пожалуйста, выберите или создайте клиента")]
    NoClient,

    #[error("Заполните обязательные поля нового клиента")]
    InvalidNewClient(#[from] ValidationErrors),

    #[error("Пожалуйста, заполните все обязательные поля для оборудования")]
    IncompleteEquipment { index: EntryIndex },

    #[error("Пожалуйста, добавьте хотя бы одно оборудование")]
    NoEquipment,
}
