use crate::display::{self, DiscountFormula, RatingTier, NOT_AVAILABLE, NO_DESCRIPTION, NO_TITLE};
use crate::model::Record;
use crate::variant::VariantOptions;
use serde::Serialize;

/// Everything the detail layout displays, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    /// Thumbnail rail, in record order.
    pub thumbnails: Vec<String>,
    /// First image, if any.
    pub primary_image: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub rating: RatingChip,
    pub reviews: ReviewSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingChip {
    pub label: String,
    pub tier: RatingTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub count: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pricing {
    pub price: String,
    /// `Extra 20% Off`, present only with a positive discount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_label: Option<String>,
    /// Struck-through comparison amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub label: String,
    pub value: String,
}

impl DetailView {
    pub fn build(record: &Record, options: &VariantOptions, formula: DiscountFormula) -> Self {
        let thumbnails: Vec<String> = record.image_urls().into_iter().map(String::from).collect();
        let primary_image = thumbnails.first().cloned();

        let review_count = display::review_count(record.reviews.as_deref());

        let pricing = options.show_pricing.then(|| build_pricing(record, formula));
        let shipping = options
            .show_shipping
            .then(|| display::text_or(record.shipping_information.as_deref(), NOT_AVAILABLE));
        let description = options
            .description_paragraph
            .then(|| display::text_or(record.description.as_deref(), NO_DESCRIPTION));

        let attributes = options
            .rows
            .iter()
            .map(|(label, field)| Attribute {
                label: (*label).to_string(),
                value: field.display(record),
            })
            .collect();

        DetailView {
            thumbnails,
            primary_image,
            title: display::text_or(record.title_text(), NO_TITLE),
            subtitle: options.subtitle.display(record),
            rating: RatingChip {
                label: display::rating_label(record.rating),
                tier: RatingTier::from_rating(record.rating),
            },
            reviews: ReviewSummary {
                count: review_count,
                label: display::review_label(review_count),
            },
            pricing,
            shipping,
            description,
            attributes,
        }
    }
}

fn build_pricing(record: &Record, formula: DiscountFormula) -> Pricing {
    let price = match record.price {
        Some(p) if p.is_finite() => p,
        _ => {
            return Pricing {
                price: NOT_AVAILABLE.to_string(),
                discount_label: None,
                compare_at: None,
            }
        }
    };

    match record.discount_percentage {
        Some(d) if d.is_finite() && d > 0.0 => Pricing {
            price: display::format_price(price),
            discount_label: Some(format!("Extra {}% Off", display::format_number(d))),
            compare_at: Some(display::format_price(formula.apply(price, d))),
        },
        _ => Pricing {
            price: display::format_price(price),
            discount_label: None,
            compare_at: None,
        },
    }
}
