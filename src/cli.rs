use crate::{articles::DEFAULT_CATEGORY, surface::OutputFormat};
use clap::{Args, Parser, Subcommand};

/// Fake-news detector
///
/// Sends headlines to the prediction service and keeps per-article view
/// counts in the local database.
#[derive(Parser, Debug)]
#[command(name = "detector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check TEXT (or stdin when no TEXT is given) with the prediction service
    Check(CheckCommand),

    /// Show the last stashed prediction result
    Outcome,

    /// List the articles of a category with their view counts
    Articles {
        /// health, politics or commerce
        #[arg(default_value = DEFAULT_CATEGORY)]
        category: String,
    },

    /// Count one view of an article
    View {
        /// Article id, e.g. health-article-2
        article_id: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CheckCommand {
    /// Print the result as a markup fragment
    #[arg(long)]
    pub markup: bool,

    /// Text to check; words are joined with single spaces
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}

impl CheckCommand {
    /// Text given on the command line, if any.
    pub fn text(&self) -> Option<String> {
        (!self.text.is_empty()).then(|| self.text.join(" "))
    }

    pub fn format(&self) -> OutputFormat {
        if self.markup {
            OutputFormat::Markup
        } else {
            OutputFormat::Text
        }
    }
}
