use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ClientShortName};

/// Client record returned by the client directory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientRecord {
    pub id: ClientId,
    pub short_name: ClientShortName,
    pub full_name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl ClientRecord {
    #[must_use]
    pub fn new(
        id: ClientId,
        short_name: ClientShortName,
        full_name: String,
        contact_person: String,
        phone: String,
        email: Option<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            id,
            short_name,
            full_name: full_name.trim().to_string(),
            contact_person: contact_person.trim().to_string(),
            phone: phone.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
