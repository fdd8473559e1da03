//! Assembly of the reception act document posted to the server.

use serde::Serialize;

use crate::domain::equipment::{EquipmentEntry, GuaranteeType};
use crate::domain::types::ModelId;
use crate::forms::FormError;
use crate::forms::client::{ClientPayload, ExistingClientPayload, NewClientPayload};
use crate::state::{ClientSelection, ReceptionState};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One accepted piece of equipment.
pub struct EquipmentPayload {
    pub model_id: ModelId,
    pub serial_number: String,
    pub inventory_number: String,
    pub defect_description: String,
    pub guarantee_type: GuaranteeType,
}

impl EquipmentPayload {
    fn try_from_entry(entry: &EquipmentEntry) -> Result<Self, FormError> {
        let model_id = entry
            .resolved_model()
            .ok_or(FormError::IncompleteEquipment { index: entry.index })?;

        Ok(Self {
            model_id,
            serial_number: entry.serial_number_or_default(),
            inventory_number: entry.inventory_number.trim().to_string(),
            defect_description: entry.defect_description.trim().to_string(),
            guarantee_type: entry.guarantee,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Complete reception act as expected by the create endpoint.
pub struct ReceptionActPayload {
    pub client: ClientPayload,
    pub contact_person: String,
    pub contact_phone: String,
    pub guarantee_type: GuaranteeType,
    pub equipment_list: Vec<EquipmentPayload>,
}

impl TryFrom<&ClientSelection> for ClientPayload {
    type Error = FormError;

    fn try_from(selection: &ClientSelection) -> Result<Self, Self::Error> {
        match selection {
            ClientSelection::New(form) => Ok(ClientPayload::New(NewClientPayload::try_from(form)?)),
            ClientSelection::Existing {
                record,
                contact_person,
                phone,
            } => Ok(ClientPayload::Existing(ExistingClientPayload::new(
                record,
                contact_person,
                phone,
            ))),
            ClientSelection::None => Err(FormError::NoClient),
        }
    }
}

impl TryFrom<&ReceptionState> for ReceptionActPayload {
    type Error = FormError;

    /// Validates the whole form; nothing is produced unless every part is complete.
    fn try_from(state: &ReceptionState) -> Result<Self, Self::Error> {
        let client = ClientPayload::try_from(state.client().selection())?;

        let equipment_list = state
            .entries()
            .map(|entry| EquipmentPayload::try_from_entry(&entry.entry))
            .collect::<Result<Vec<_>, _>>()?;

        if equipment_list.is_empty() {
            return Err(FormError::NoEquipment);
        }

        Ok(Self {
            contact_person: client.contact_person().to_string(),
            contact_phone: client.phone().to_string(),
            client,
            guarantee_type: state.act_guarantee(),
            equipment_list,
        })
    }
}
