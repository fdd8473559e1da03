//! Wire formats of the reception endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Brand, EquipmentModel};
use crate::domain::client::ClientRecord;
use crate::domain::types::{
    BrandId, BrandName, ClientId, ClientShortName, ModelFullName, ModelId, TypeConstraintError,
};

/// Item of `GET /api/brands/?category_id=<id>`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BrandDto {
    pub id: i32,
    pub name: String,
}

/// Item of `GET /api/models/?brand_id=<id>`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelDto {
    pub id: i32,
    pub full_name: String,
}

/// Item of `GET /api/search-clients/?q=<text>`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientDto {
    pub id: i32,
    pub short_name: String,
    pub full_name: String,
    pub contact_person: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Body returned by the create endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub act_number: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TryFrom<BrandDto> for Brand {
    type Error = TypeConstraintError;

    fn try_from(dto: BrandDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BrandId::new(dto.id)?,
            name: BrandName::new(dto.name)?,
        })
    }
}

impl TryFrom<ModelDto> for EquipmentModel {
    type Error = TypeConstraintError;

    fn try_from(dto: ModelDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ModelId::new(dto.id)?,
            full_name: ModelFullName::new(dto.full_name)?,
        })
    }
}

impl TryFrom<ClientDto> for ClientRecord {
    type Error = TypeConstraintError;

    fn try_from(dto: ClientDto) -> Result<Self, Self::Error> {
        Ok(ClientRecord::new(
            ClientId::new(dto.id)?,
            ClientShortName::new(dto.short_name)?,
            dto.full_name,
            dto.contact_person,
            dto.phone,
            dto.email,
            dto.address,
        ))
    }
}
