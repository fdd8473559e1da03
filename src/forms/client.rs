use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::client::ClientRecord;
use crate::domain::types::ClientId;
use crate::forms::FormError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Free-entry fields shown when the "new client" toggle is on.
pub struct NewClientForm {
    pub short_name: String,
    pub full_name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// Single field of [`NewClientForm`] being edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NewClientField {
    ShortName(String),
    FullName(String),
    ContactPerson(String),
    Phone(String),
    Email(String),
    Address(String),
}

impl NewClientForm {
    pub fn apply(&mut self, field: NewClientField) {
        match field {
            NewClientField::ShortName(value) => self.short_name = value,
            NewClientField::FullName(value) => self.full_name = value,
            NewClientField::ContactPerson(value) => self.contact_person = value,
            NewClientField::Phone(value) => self.phone = value,
            NewClientField::Email(value) => self.email = value,
            NewClientField::Address(value) => self.address = value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Validate)]
/// Client section of the act when the client is created together with it.
pub struct NewClientPayload {
    #[validate(length(min = 1, max = 50))]
    pub short_name: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(length(min = 1, max = 200))]
    pub contact_person: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
}

impl TryFrom<&NewClientForm> for NewClientPayload {
    type Error = FormError;

    fn try_from(form: &NewClientForm) -> Result<Self, Self::Error> {
        let payload = Self {
            short_name: form.short_name.trim().to_string(),
            full_name: form.full_name.trim().to_string(),
            contact_person: form.contact_person.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: Some(form.email.trim().to_lowercase()).filter(|s| !s.is_empty()),
            address: Some(form.address.trim().to_string()).filter(|s| !s.is_empty()),
        };
        payload.validate()?;
        Ok(payload)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Client section of the act when an existing client was chosen.
pub struct ExistingClientPayload {
    pub id: ClientId,
    /// Contact person for this act, possibly edited by the receptionist.
    pub contact_person: String,
    /// Contact phone for this act, possibly edited by the receptionist.
    pub phone: String,
}

impl ExistingClientPayload {
    pub fn new(record: &ClientRecord, contact_person: &str, phone: &str) -> Self {
        Self {
            id: record.id,
            contact_person: contact_person.trim().to_string(),
            phone: phone.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClientPayload {
    New(NewClientPayload),
    Existing(ExistingClientPayload),
}

impl ClientPayload {
    pub fn contact_person(&self) -> &str {
        match self {
            ClientPayload::New(client) => &client.contact_person,
            ClientPayload::Existing(client) => &client.contact_person,
        }
    }

    pub fn phone(&self) -> &str {
        match self {
            ClientPayload::New(client) => &client.phone,
            ClientPayload::Existing(client) => &client.phone,
        }
    }
}
