//! Read-only equipment catalog: categories, brands and models.

use serde::{Deserialize, Serialize};

use crate::domain::types::{BrandId, BrandName, CategoryId, CategoryName, ModelFullName, ModelId};

/// Equipment category rendered into the page by the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
}

/// Brand available within one category.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    pub id: BrandId,
    pub name: BrandName,
}

/// Concrete model of a brand, labeled by its full display name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquipmentModel {
    pub id: ModelId,
    pub full_name: ModelFullName,
}

/// Anything that can be offered as an option of a cascading selector.
pub trait CatalogOption {
    type Id: Copy + Eq;

    fn option_id(&self) -> Self::Id;

    fn label(&self) -> &str;
}

impl CatalogOption for Category {
    type Id = CategoryId;

    fn option_id(&self) -> CategoryId {
        self.id
    }

    fn label(&self) -> &str {
        self.name.as_str()
    }
}

impl CatalogOption for Brand {
    type Id = BrandId;

    fn option_id(&self) -> BrandId {
        self.id
    }

    fn label(&self) -> &str {
        self.name.as_str()
    }
}

impl CatalogOption for EquipmentModel {
    type Id = ModelId;

    fn option_id(&self) -> ModelId {
        self.id
    }

    fn label(&self) -> &str {
        self.full_name.as_str()
    }
}
