use crate::domain::Domain;

#[derive(Debug, Clone, PartialEq)]
pub enum UiElementKind {
    Label { text: String },
    Button { caption: String, active: bool },
}

/// 2D overlay descriptor. Widgets themselves are drawn by the host UI.
#[derive(Debug, Clone, PartialEq)]
pub struct UiElement {
    /// Stable key for the host UI's reconciliation.
    pub key: String,
    pub domain: Domain,
    pub kind: UiElementKind,
}

impl UiElement {
    pub fn label(key: impl Into<String>, domain: Domain, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            domain,
            kind: UiElementKind::Label { text: text.into() },
        }
    }

    pub fn button(
        key: impl Into<String>,
        domain: Domain,
        caption: impl Into<String>,
        active: bool,
    ) -> Self {
        Self {
            key: key.into(),
            domain,
            kind: UiElementKind::Button {
                caption: caption.into(),
                active,
            },
        }
    }
}
