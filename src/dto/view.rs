//! View model derived from [`ReceptionState`] for rendering.

use serde::Serialize;

use crate::domain::catalog::CatalogOption;
use crate::domain::equipment::{GuaranteeType, MISSING_SERIAL_NUMBER};
use crate::forms::client::NewClientForm;
use crate::state::{
    AlertKind, CascadeSelect, ClientSelection, EntryState, ReceptionState, SelectStatus,
    SubmissionPhase,
};

pub const CATEGORY_PLACEHOLDER: &str = "Выберите категорию";
pub const BRAND_PLACEHOLDER: &str = "Выберите бренд";
pub const BRAND_BLOCKED_PLACEHOLDER: &str = "Сначала выберите категорию";
pub const MODEL_PLACEHOLDER: &str = "Выберите модель";
pub const MODEL_BLOCKED_PLACEHOLDER: &str = "Сначала выберите бренд";
pub const LOADING_PLACEHOLDER: &str = "Загрузка...";
pub const FAILED_PLACEHOLDER: &str = "Не удалось загрузить список";

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SelectView {
    /// Empty-value option shown first.
    pub placeholder: Option<String>,
    pub options: Vec<OptionView>,
    pub enabled: bool,
}

impl SelectView {
    fn from_options<'a, T, I>(placeholder: &str, options: I, selected: Option<T::Id>) -> Self
    where
        T: CatalogOption + 'a,
        T::Id: ToString,
        I: IntoIterator<Item = &'a T>,
    {
        Self {
            placeholder: Some(placeholder.to_string()),
            options: options
                .into_iter()
                .map(|option| OptionView {
                    value: option.option_id().to_string(),
                    label: option.label().to_string(),
                    selected: Some(option.option_id()) == selected,
                })
                .collect(),
            enabled: true,
        }
    }

    fn cascade<T>(select: &CascadeSelect<T>, selected: Option<T::Id>, ready: &str, blocked: &str) -> Self
    where
        T: CatalogOption,
        T::Id: ToString,
    {
        let placeholder = match select.status() {
            SelectStatus::Disabled => blocked,
            SelectStatus::Loading(_) => LOADING_PLACEHOLDER,
            SelectStatus::Ready => ready,
            SelectStatus::Failed => FAILED_PLACEHOLDER,
        };
        let mut view = Self::from_options(placeholder, select.options(), selected);
        view.enabled = select.is_enabled();
        view
    }

    fn guarantee(selected: GuaranteeType) -> Self {
        Self {
            placeholder: None,
            options: GuaranteeType::ALL
                .into_iter()
                .map(|guarantee| OptionView {
                    value: guarantee.code().to_string(),
                    label: guarantee.label().to_string(),
                    selected: guarantee == selected,
                })
                .collect(),
            enabled: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EntryView {
    pub index: u32,
    /// One-based number shown in the entry header.
    pub number: u32,
    pub category: SelectView,
    pub brand: SelectView,
    pub model: SelectView,
    pub serial_number: String,
    pub serial_placeholder: &'static str,
    pub inventory_number: String,
    pub defect_description: String,
    pub guarantee: SelectView,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CandidateView {
    pub id: i32,
    pub short_name: String,
    pub contact_person: String,
    pub phone: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SelectedClientView {
    pub id: i32,
    pub short_name: String,
    pub full_name: String,
    pub contact_person: String,
    pub phone: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ClientPanelView {
    pub query: String,
    pub candidates: Vec<CandidateView>,
    pub candidates_visible: bool,
    pub new_client: bool,
    pub selected: Option<SelectedClientView>,
    pub new_client_form: NewClientForm,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct AlertView {
    pub kind: &'static str,
    pub message: String,
}

/// Everything the page needs to draw the reception form.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ReceptionView {
    pub entries: Vec<EntryView>,
    pub client: ClientPanelView,
    pub act_guarantee: SelectView,
    pub submit_enabled: bool,
    pub alert: Option<AlertView>,
    pub notices: Vec<String>,
    /// Act number shown in the confirmation dialog.
    pub confirmation: Option<String>,
}

impl EntryView {
    fn new(state: &ReceptionState, entry_state: &EntryState) -> Self {
        let entry = &entry_state.entry;
        Self {
            index: entry.index.get(),
            number: entry.index.get() + 1,
            category: SelectView::from_options(
                CATEGORY_PLACEHOLDER,
                state.categories(),
                entry.category,
            ),
            brand: SelectView::cascade(
                &entry_state.brands,
                entry.brand,
                BRAND_PLACEHOLDER,
                BRAND_BLOCKED_PLACEHOLDER,
            ),
            model: SelectView::cascade(
                &entry_state.models,
                entry.model,
                MODEL_PLACEHOLDER,
                MODEL_BLOCKED_PLACEHOLDER,
            ),
            serial_number: entry.serial_number.clone(),
            serial_placeholder: MISSING_SERIAL_NUMBER,
            inventory_number: entry.inventory_number.clone(),
            defect_description: entry.defect_description.clone(),
            guarantee: SelectView::guarantee(entry.guarantee),
        }
    }
}

impl From<&ReceptionState> for ClientPanelView {
    fn from(state: &ReceptionState) -> Self {
        let client = state.client();
        let selected = match client.selection() {
            ClientSelection::Existing {
                record,
                contact_person,
                phone,
            } => Some(SelectedClientView {
                id: record.id.get(),
                short_name: record.short_name.as_str().to_string(),
                full_name: record.full_name.clone(),
                contact_person: contact_person.clone(),
                phone: phone.clone(),
            }),
            _ => None,
        };

        Self {
            query: client.query().to_string(),
            candidates: client
                .candidates()
                .iter()
                .map(|c| CandidateView {
                    id: c.id.get(),
                    short_name: c.short_name.as_str().to_string(),
                    contact_person: c.contact_person.clone(),
                    phone: c.phone.clone(),
                })
                .collect(),
            candidates_visible: client.candidates_visible(),
            new_client: client.is_new_client(),
            selected,
            new_client_form: client.new_client_form().clone(),
        }
    }
}

impl From<&ReceptionState> for ReceptionView {
    fn from(state: &ReceptionState) -> Self {
        let alert = state.alert().map(|alert| AlertView {
            kind: match alert.kind {
                AlertKind::Validation => "warning",
                AlertKind::Transport | AlertKind::Application => "danger",
            },
            message: alert.message.clone(),
        });
        let confirmation = match state.phase() {
            SubmissionPhase::Succeeded { act_number } => Some(act_number.clone()),
            _ => None,
        };

        Self {
            entries: state
                .entries()
                .map(|entry| EntryView::new(state, entry))
                .collect(),
            client: ClientPanelView::from(state),
            act_guarantee: SelectView::guarantee(state.act_guarantee()),
            submit_enabled: state.can_submit(),
            alert,
            notices: state
                .notices()
                .iter()
                .map(|notice| notice.message.clone())
                .collect(),
            confirmation,
        }
    }
}
