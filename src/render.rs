//! Tera rendering of the reception form fragments.

use tera::{Context, Tera};

use crate::dto::view::{ClientPanelView, EntryView, ReceptionView};
use crate::services::ServiceResult;

const TEMPLATES: [(&str, &str); 4] = [
    (
        "reception/select.html",
        include_str!("../templates/reception/select.html"),
    ),
    (
        "reception/entry.html",
        include_str!("../templates/reception/entry.html"),
    ),
    (
        "reception/client.html",
        include_str!("../templates/reception/client.html"),
    ),
    (
        "reception/form.html",
        include_str!("../templates/reception/form.html"),
    ),
];

/// Renders [`ReceptionView`] and its parts to HTML.
pub struct ReceptionRenderer {
    tera: Tera,
}

impl ReceptionRenderer {
    /// Loads the bundled templates. HTML output is autoescaped.
    pub fn new() -> ServiceResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    pub fn render_form(&self, view: &ReceptionView) -> ServiceResult<String> {
        let mut context = Context::new();
        context.insert("reception", view);
        self.render("reception/form.html", &context)
    }

    pub fn render_entry(&self, entry: &EntryView) -> ServiceResult<String> {
        let mut context = Context::new();
        context.insert("entry", entry);
        self.render("reception/entry.html", &context)
    }

    pub fn render_client_panel(&self, client: &ClientPanelView) -> ServiceResult<String> {
        let mut context = Context::new();
        context.insert("client", client);
        self.render("reception/client.html", &context)
    }

    fn render(&self, template: &str, context: &Context) -> ServiceResult<String> {
        self.tera.render(template, context).map_err(|err| {
            log::error!("Failed to render {template}: {err}");
            err.into()
        })
    }
}
