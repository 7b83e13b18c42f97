use crate::prelude::{println, *};
use colored::Colorize;
use serde::Serialize;
use triviaviz_core::grouping::{distinct_categories, group_by_category, CategoryGrouping};
use triviaviz_core::opentdb::DEFAULT_AMOUNT;
use triviaviz_core::sorting::{get_sorted_category_grouping, SortingOptions};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct CategoriesOptions {
    /// Number of questions to fetch (1-50)
    #[arg(short, long, env = "TRIVIA_AMOUNT", default_value_t = DEFAULT_AMOUNT)]
    pub amount: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Categories present in a batch, with their question counts
#[derive(Debug, Serialize, Clone)]
pub struct CategoriesOutput {
    pub total_questions: usize,
    /// Category names, sorted by code point
    pub categories: Vec<String>,
    /// Counts in the order each category first appeared in the batch
    pub groupings: Vec<CategoryGrouping>,
}

pub async fn run(options: CategoriesOptions, global: crate::Global) -> Result<()> {
    let output = categories_data(&global, options.amount).await?;

    if options.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_categories_table(&output));
    }

    Ok(())
}

/// Fetches a batch of questions and returns the categories it contains
pub async fn categories_data(global: &crate::Global, amount: u32) -> Result<CategoriesOutput> {
    let questions = super::fetch_batch(global, amount).await?;

    Ok(CategoriesOutput {
        total_questions: questions.len(),
        categories: distinct_categories(&questions),
        groupings: group_by_category(&questions),
    })
}

fn format_categories_table(output: &CategoriesOutput) -> String {
    if output.groupings.is_empty() {
        return format!("{}\n", "No data to show.".yellow());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![b -> "CATEGORY", b -> "QUESTIONS"]);

    for grouping in get_sorted_category_grouping(&output.groupings, SortingOptions::default()) {
        table.add_row(prettytable::row![grouping.category, r -> grouping.count]);
    }

    format!(
        "{}\n{} {}\n",
        table,
        output.total_questions.to_string().bright_cyan().bold(),
        "questions in total".bright_white()
    )
}
