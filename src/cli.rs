use crate::variant::{self, VariantOptions};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "detail-view",
    version,
    about = "Render recipe and product detail pages from the DummyJSON API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// API base URL (default: https://dummyjson.com)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Compute the struck-through price as floor(price + discount/100)
    #[arg(long, global = true)]
    pub legacy_discount: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a recipe detail page
    Recipe {
        /// Record id or full record URL
        id_or_url: String,
    },

    /// Show a product detail page
    Product {
        /// Record id or full record URL
        id_or_url: String,
    },

    /// Read ids from stdin, one per line, and render each as it arrives
    Browse {
        /// Which detail page layout to use
        #[arg(long, value_enum, default_value_t = Variant::Recipe)]
        variant: Variant,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    Product,
    Recipe,
}

impl Variant {
    pub fn options(self) -> &'static VariantOptions {
        match self {
            Variant::Product => &variant::PRODUCT,
            Variant::Recipe => &variant::RECIPE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use testresult::TestResult;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from([
            "detail-view",
            "product",
            "5",
            "--format",
            "json",
            "--legacy-discount",
        ])?;
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.legacy_discount);
        assert!(matches!(cli.command, Commands::Product { ref id_or_url } if id_or_url == "5"));
        Ok(())
    }

    #[test]
    fn browse_defaults_to_recipe() -> TestResult {
        let cli = Cli::try_parse_from(["detail-view", "browse"])?;
        assert!(matches!(
            cli.command,
            Commands::Browse {
                variant: Variant::Recipe
            }
        ));
        assert_eq!(cli.format, OutputFormat::Markdown);
        Ok(())
    }
}
