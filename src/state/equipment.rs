//! Equipment list manager: stable entry indices and cascading selectors.

use crate::domain::catalog::{Brand, CatalogOption, EquipmentModel};
use crate::domain::equipment::{EquipmentEntry, GuaranteeType};
use crate::domain::types::{BrandId, CategoryId, EntryIndex, ModelId};
use crate::state::{Command, LookupResult, ReceptionState, Ticket};

/// Availability of a dependent selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectStatus {
    /// The parent level has no value yet.
    Disabled,
    /// Options are being fetched by the request carrying this ticket.
    Loading(Ticket),
    /// Options are present and a value may be picked.
    Ready,
    /// The lookup failed; the selector stays unusable until the parent changes.
    Failed,
}

/// Selector whose options depend on the value chosen one level up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeSelect<T> {
    options: Vec<T>,
    status: SelectStatus,
}

impl<T: CatalogOption> CascadeSelect<T> {
    pub fn disabled() -> Self {
        Self {
            options: Vec::new(),
            status: SelectStatus::Disabled,
        }
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn status(&self) -> SelectStatus {
        self.status
    }

    pub fn is_enabled(&self) -> bool {
        self.status == SelectStatus::Ready
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.options.iter().any(|option| option.option_id() == id)
    }

    fn disable(&mut self) {
        self.options.clear();
        self.status = SelectStatus::Disabled;
    }

    fn begin_loading(&mut self, ticket: Ticket) {
        self.options.clear();
        self.status = SelectStatus::Loading(ticket);
    }

    fn awaits(&self, ticket: Ticket) -> bool {
        self.status == SelectStatus::Loading(ticket)
    }

    fn fill(&mut self, options: Vec<T>) {
        self.options = options;
        self.status = SelectStatus::Ready;
    }

    fn fail(&mut self) {
        self.options.clear();
        self.status = SelectStatus::Failed;
    }
}

/// Edit of one free-form field of an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryField {
    SerialNumber(String),
    InventoryNumber(String),
    DefectDescription(String),
    Guarantee(GuaranteeType),
}

/// An equipment entry together with its dependent selectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryState {
    pub entry: EquipmentEntry,
    pub brands: CascadeSelect<Brand>,
    pub models: CascadeSelect<EquipmentModel>,
}

impl EntryState {
    fn new(index: EntryIndex) -> Self {
        Self {
            entry: EquipmentEntry::new(index),
            brands: CascadeSelect::disabled(),
            models: CascadeSelect::disabled(),
        }
    }

    pub fn index(&self) -> EntryIndex {
        self.entry.index
    }
}

impl ReceptionState {
    pub(crate) fn add_entry(&mut self) -> EntryIndex {
        let index = self.next_index;
        self.next_index = index.next();
        self.entries.insert(index, EntryState::new(index));
        log::debug!("Added equipment entry #{index}");
        index
    }

    pub(crate) fn remove_entry(&mut self, index: EntryIndex) {
        if self.entries.remove(&index).is_some() {
            log::debug!("Removed equipment entry #{index}");
        }
    }

    pub(crate) fn select_category(
        &mut self,
        index: EntryIndex,
        category: Option<CategoryId>,
    ) -> Vec<Command> {
        if let Some(id) = category
            && !self.categories.iter().any(|c| c.id == id)
        {
            log::warn!("Ignoring unknown category {id} for entry #{index}");
            return Vec::new();
        }
        if !self.entries.contains_key(&index) {
            return Vec::new();
        }

        let ticket = category.map(|_| self.issue_ticket());
        let Some(state) = self.entries.get_mut(&index) else {
            return Vec::new();
        };

        state.entry.category = category;
        state.entry.brand = None;
        state.entry.model = None;
        state.models.disable();

        match (category, ticket) {
            (Some(category), Some(ticket)) => {
                state.brands.begin_loading(ticket);
                vec![Command::FetchBrands {
                    entry: index,
                    category,
                    ticket,
                }]
            }
            _ => {
                state.brands.disable();
                Vec::new()
            }
        }
    }

    pub(crate) fn select_brand(&mut self, index: EntryIndex, brand: Option<BrandId>) -> Vec<Command> {
        let known = match (self.entries.get(&index), brand) {
            (None, _) => return Vec::new(),
            (Some(state), Some(id)) => state.brands.contains(id),
            (Some(_), None) => true,
        };
        if !known {
            log::warn!("Ignoring brand {brand:?} not offered to entry #{index}");
            return Vec::new();
        }

        let ticket = brand.map(|_| self.issue_ticket());
        let Some(state) = self.entries.get_mut(&index) else {
            return Vec::new();
        };

        state.entry.brand = brand;
        state.entry.model = None;

        match (brand, ticket) {
            (Some(brand), Some(ticket)) => {
                state.models.begin_loading(ticket);
                vec![Command::FetchModels {
                    entry: index,
                    brand,
                    ticket,
                }]
            }
            _ => {
                state.models.disable();
                Vec::new()
            }
        }
    }

    pub(crate) fn select_model(&mut self, index: EntryIndex, model: Option<ModelId>) {
        let Some(state) = self.entries.get_mut(&index) else {
            return;
        };
        if let Some(id) = model
            && !state.models.contains(id)
        {
            log::warn!("Ignoring model {id} not offered to entry #{index}");
            return;
        }
        state.entry.model = model;
    }

    pub(crate) fn edit_entry(&mut self, index: EntryIndex, field: EntryField) {
        let Some(state) = self.entries.get_mut(&index) else {
            return;
        };
        let entry = &mut state.entry;
        match field {
            EntryField::SerialNumber(value) => entry.serial_number = value,
            EntryField::InventoryNumber(value) => entry.inventory_number = value,
            EntryField::DefectDescription(value) => entry.defect_description = value,
            EntryField::Guarantee(value) => entry.guarantee = value,
        }
    }

    pub(crate) fn brands_loaded(
        &mut self,
        index: EntryIndex,
        ticket: Ticket,
        result: LookupResult<Vec<Brand>>,
    ) {
        let Some(state) = self.entries.get_mut(&index) else {
            log::debug!("Dropping brands for removed entry #{index}");
            return;
        };
        if !state.brands.awaits(ticket) {
            log::debug!("Dropping stale brands response for entry #{index}");
            return;
        }

        state.models.disable();
        match result {
            Ok(brands) => state.brands.fill(brands),
            Err(err) => {
                state.brands.fail();
                self.push_notice(format!(
                    "Не удалось загрузить бренды для оборудования #{}: {err}",
                    index.get() + 1
                ));
            }
        }
    }

    pub(crate) fn models_loaded(
        &mut self,
        index: EntryIndex,
        ticket: Ticket,
        result: LookupResult<Vec<EquipmentModel>>,
    ) {
        let Some(state) = self.entries.get_mut(&index) else {
            log::debug!("Dropping models for removed entry #{index}");
            return;
        };
        if !state.models.awaits(ticket) {
            log::debug!("Dropping stale models response for entry #{index}");
            return;
        }

        match result {
            Ok(models) => state.models.fill(models),
            Err(err) => {
                state.models.fail();
                self.push_notice(format!(
                    "Не удалось загрузить модели для оборудования #{}: {err}",
                    index.get() + 1
                ));
            }
        }
    }
}
