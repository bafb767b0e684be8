use crate::display::{self, NOT_AVAILABLE, NO_DESCRIPTION, UNKNOWN};
use crate::model::Record;

/// Which record field fills an attribute-table row, and how it is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    WarrantyInformation,
    ReturnPolicy,
    AvailabilityStatus,
    PrepTime,
    CookTime,
    Servings,
}

impl Field {
    pub fn display(self, record: &Record) -> String {
        match self {
            Field::Description => {
                display::text_or(record.description.as_deref(), NO_DESCRIPTION)
            }
            Field::WarrantyInformation => {
                display::text_or(record.warranty_information.as_deref(), NOT_AVAILABLE)
            }
            Field::ReturnPolicy => display::text_or(record.return_policy.as_deref(), NOT_AVAILABLE),
            Field::AvailabilityStatus => {
                display::text_or(record.availability_status.as_deref(), NOT_AVAILABLE)
            }
            Field::PrepTime => display::minutes_or_na(record.prep_minutes()),
            Field::CookTime => display::minutes_or_na(record.cook_minutes()),
            Field::Servings => display::count_or_na(record.servings),
        }
    }
}

/// The line shown directly under the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtitle {
    Brand,
    Category,
}

impl Subtitle {
    pub fn display(self, record: &Record) -> String {
        match self {
            Subtitle::Brand => display::text_or(record.brand.as_deref(), UNKNOWN),
            Subtitle::Category => format!(
                "Category: {}",
                display::text_or(record.category.as_deref(), UNKNOWN)
            ),
        }
    }
}

/// Everything that differs between the product page and the recipe page.
#[derive(Debug, Clone, Copy)]
pub struct VariantOptions {
    pub noun: &'static str,
    pub subtitle: Subtitle,
    pub show_pricing: bool,
    pub show_shipping: bool,
    /// Description rendered as a paragraph above the table instead of a row.
    pub description_paragraph: bool,
    pub rows: &'static [(&'static str, Field)],
    pub loading_placeholder: Option<&'static str>,
    pub failure_message: &'static str,
}

pub const PRODUCT: VariantOptions = VariantOptions {
    noun: "product",
    subtitle: Subtitle::Brand,
    show_pricing: true,
    show_shipping: true,
    description_paragraph: false,
    rows: &[
        ("Description", Field::Description),
        ("Warranty information", Field::WarrantyInformation),
        ("Return policy", Field::ReturnPolicy),
        ("Status", Field::AvailabilityStatus),
    ],
    loading_placeholder: None,
    failure_message: "Failed to load product data.",
};

pub const RECIPE: VariantOptions = VariantOptions {
    noun: "recipe",
    subtitle: Subtitle::Category,
    show_pricing: false,
    show_shipping: false,
    description_paragraph: true,
    rows: &[
        ("Prep Time", Field::PrepTime),
        ("Cook Time", Field::CookTime),
        ("Servings", Field::Servings),
    ],
    loading_placeholder: Some("Loading..."),
    failure_message: "Failed to load recipe data.",
};
