//! Toolbar palette of field templates.

use super::field::{Field, FieldType};

/// One toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteItem {
    pub field_type: FieldType,
    /// Display name shown on the button ("Single line", "Dropdown", ...).
    pub label: &'static str,
}

impl PaletteItem {
    const fn new(field_type: FieldType, label: &'static str) -> Self {
        Self { field_type, label }
    }

    /// Build a fresh field from this template.
    ///
    /// The id is `{type}-{timestamp_ms}`; the label and placeholder derive
    /// from the display name.
    pub fn build(&self, timestamp_ms: i64) -> Field {
        Field::new(
            format!("{}-{}", self.field_type.as_str(), timestamp_ms),
            self.field_type,
            format!("New {}", self.label),
        )
        .with_placeholder(format!("Enter {}", self.label.to_lowercase()))
    }
}

/// A titled group of palette items.
#[derive(Debug, Clone, Copy)]
pub struct PaletteCategory {
    pub name: &'static str,
    pub items: &'static [PaletteItem],
}

/// Palette categories in toolbar order.
pub const PALETTE: &[PaletteCategory] = &[
    PaletteCategory {
        name: "Short Text",
        items: &[
            PaletteItem::new(FieldType::Text, "Single line"),
            PaletteItem::new(FieldType::Email, "Email"),
            PaletteItem::new(FieldType::Password, "Password"),
        ],
    },
    PaletteCategory {
        name: "Long Text",
        items: &[PaletteItem::new(FieldType::Textarea, "Multiline")],
    },
    PaletteCategory {
        name: "Options",
        items: &[
            PaletteItem::new(FieldType::Select, "Dropdown"),
            PaletteItem::new(FieldType::Radio, "Multiple Choice"),
        ],
    },
    PaletteCategory {
        name: "Yes/No",
        items: &[
            PaletteItem::new(FieldType::Switch, "Switch"),
            PaletteItem::new(FieldType::Checkbox, "Single Checkbox"),
        ],
    },
    PaletteCategory {
        name: "Numbers",
        items: &[PaletteItem::new(FieldType::Number, "Number")],
    },
    PaletteCategory {
        name: "Date and Time",
        items: &[PaletteItem::new(FieldType::Date, "Date")],
    },
];

/// Look up the palette entry for a field type.
pub fn palette_item(field_type: FieldType) -> PaletteItem {
    PALETTE
        .iter()
        .flat_map(|category| category.items.iter())
        .copied()
        .find(|item| item.field_type == field_type)
        .unwrap_or(PaletteItem {
            field_type,
            label: field_type.as_str(),
        })
}

/// Case-insensitive search over category names and item labels.
pub fn search(query: &str) -> Vec<PaletteItem> {
    let query = query.trim().to_lowercase();
    let query = query.as_str();
    PALETTE
        .iter()
        .flat_map(|category| {
            let category_match = category.name.to_lowercase().contains(query);
            category.items.iter().copied().filter(move |item| {
                category_match
                    || item.label.to_lowercase().contains(query)
                    || item.field_type.as_str().contains(query)
            })
        })
        .collect()
}
