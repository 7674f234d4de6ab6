use clap::Args;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::feedback;

#[derive(Args, Debug)]
pub struct FeedbackArgs {
    #[arg(required = true, help = "Entry text; multiple words are joined with spaces")]
    pub text: Vec<String>,
}

/// Runs the generator locally; no server or credentials involved
pub fn handle(args: FeedbackArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let content = args.text.join(" ");
    let generated = feedback::generate(&content);

    output_success(
        &output_format,
        &generated,
        Some(json!({
            "feedback": generated,
            "words": feedback::word_count(&content),
        })),
    )
}
