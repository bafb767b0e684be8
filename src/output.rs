use crate::cli::OutputFormat;
use crate::controller::ViewState;
use crate::display::DiscountFormula;
use crate::error::DetailError;
use crate::variant::VariantOptions;
use crate::view::DetailView;

/// Renders the controller state. A failed read renders the variant's failure
/// message and nothing else.
pub fn render(
    state: &ViewState,
    options: &VariantOptions,
    formula: DiscountFormula,
    format: OutputFormat,
) -> Result<String, DetailError> {
    match (state, format) {
        (ViewState::Loaded(record), OutputFormat::Markdown) => Ok(format_detail(
            &DetailView::build(record, options, formula),
        )),
        (ViewState::Loaded(record), OutputFormat::Json) => {
            let view = DetailView::build(record, options, formula);
            Ok(format!("{}\n", serde_json::to_string_pretty(&view)?))
        }
        (ViewState::Failed, OutputFormat::Markdown) => {
            Ok(format!("{}\n", options.failure_message))
        }
        (ViewState::Failed, OutputFormat::Json) => Ok(format!(
            "{}\n",
            serde_json::json!({ "error": options.failure_message })
        )),
        (ViewState::Loading, _) => Ok(options
            .loading_placeholder
            .map(|text| format!("{}\n", text))
            .unwrap_or_default()),
        (ViewState::Idle, _) => Ok(String::new()),
    }
}

pub fn format_detail(view: &DetailView) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", view.title));
    format_images(view, &mut out);
    format_primary_image(view, &mut out);
    format_panel(view, &mut out);

    out
}

fn format_images(view: &DetailView, out: &mut String) {
    out.push_str("## Images\n");
    if view.thumbnails.is_empty() {
        out.push_str("(none)\n");
    }
    for (i, url) in view.thumbnails.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, url));
    }
    out.push('\n');
}

fn format_primary_image(view: &DetailView, out: &mut String) {
    out.push_str("## Primary Image\n");
    out.push_str(view.primary_image.as_deref().unwrap_or("(none)"));
    out.push_str("\n\n");
}

fn format_panel(view: &DetailView, out: &mut String) {
    out.push_str("## Details\n");
    out.push_str(&format!("**{}**\n\n", view.subtitle));
    out.push_str(&format!(
        "- **Rating:** ★ {} [{}]\n",
        view.rating.label, view.rating.tier
    ));
    out.push_str(&format!("- **Reviews:** {}\n", view.reviews.label));

    if let Some(ref pricing) = view.pricing {
        if let Some(ref label) = pricing.discount_label {
            out.push_str(&format!("- **{}**\n", label));
        }
        match pricing.compare_at {
            Some(ref compare_at) => out.push_str(&format!(
                "- **Price:** {} ~~{}~~\n",
                pricing.price, compare_at
            )),
            None => out.push_str(&format!("- **Price:** {}\n", pricing.price)),
        }
    }
    if let Some(ref shipping) = view.shipping {
        out.push_str(&format!("- **Shipping:** _{}_\n", shipping));
    }
    out.push('\n');

    if let Some(ref description) = view.description {
        out.push_str(description);
        out.push_str("\n\n");
    }

    if !view.attributes.is_empty() {
        out.push_str("| Field | Value |\n");
        out.push_str("|---|---|\n");
        for attribute in &view.attributes {
            out.push_str(&format!(
                "| {} | {} |\n",
                table_cell(&attribute.label),
                table_cell(&attribute.value)
            ));
        }
        out.push('\n');
    }
}

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
