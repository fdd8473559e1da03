//! Equipment entries of a reception act.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{BrandId, CategoryId, EntryIndex, ModelId, TypeConstraintError};

/// Serial number sent when the receptionist leaves the field blank.
pub const MISSING_SERIAL_NUMBER: &str = "Без номера";

/// Guarantee terms under which a piece of equipment is accepted.
///
/// The wire codes are the option values used by the reception page.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GuaranteeType {
    #[default]
    #[serde(rename = "DEFAULT")]
    None,
    #[serde(rename = "WARNING")]
    Factory,
    #[serde(rename = "DANGER")]
    ServiceCenter,
}

impl GuaranteeType {
    pub const ALL: [GuaranteeType; 3] = [
        GuaranteeType::None,
        GuaranteeType::Factory,
        GuaranteeType::ServiceCenter,
    ];

    /// Code posted to the server.
    pub const fn code(self) -> &'static str {
        match self {
            GuaranteeType::None => "DEFAULT",
            GuaranteeType::Factory => "WARNING",
            GuaranteeType::ServiceCenter => "DANGER",
        }
    }

    /// Human readable label shown in the guarantee selector.
    pub const fn label(self) -> &'static str {
        match self {
            GuaranteeType::None => "Без гарантии",
            GuaranteeType::Factory => "Заводская гарантия",
            GuaranteeType::ServiceCenter => "Гарантия сервисного центра",
        }
    }
}

impl Display for GuaranteeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for GuaranteeType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GuaranteeType::ALL
            .into_iter()
            .find(|guarantee| guarantee.code() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(s.to_string()))
    }
}

/// One piece of equipment being handed in.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquipmentEntry {
    pub index: EntryIndex,
    pub category: Option<CategoryId>,
    pub brand: Option<BrandId>,
    pub model: Option<ModelId>,
    pub serial_number: String,
    pub inventory_number: String,
    pub defect_description: String,
    pub guarantee: GuaranteeType,
}

impl EquipmentEntry {
    #[must_use]
    pub fn new(index: EntryIndex) -> Self {
        Self {
            index,
            category: None,
            brand: None,
            model: None,
            serial_number: String::new(),
            inventory_number: String::new(),
            defect_description: String::new(),
            guarantee: GuaranteeType::default(),
        }
    }

    /// Returns the chosen model when the whole category/brand/model chain is set.
    pub fn resolved_model(&self) -> Option<ModelId> {
        match (self.category, self.brand, self.model) {
            (Some(_), Some(_), Some(model)) => Some(model),
            _ => None,
        }
    }

    /// Serial number to submit, falling back to the "no number" sentinel.
    pub fn serial_number_or_default(&self) -> String {
        let trimmed = self.serial_number.trim();
        if trimmed.is_empty() {
            MISSING_SERIAL_NUMBER.to_string()
        } else {
            trimmed.to_string()
        }
    }
}
