use crate::prelude::{println, *};
use colored::Colorize;
use serde::Serialize;
use triviaviz_core::grouping::filter_by_category;
use triviaviz_core::opentdb::{QuestionType, TriviaQuestion, DEFAULT_AMOUNT};
use triviaviz_core::text::capitalize;

const QUESTION_WIDTH: usize = 60;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Number of questions to fetch (1-50)
    #[arg(short, long, env = "TRIVIA_AMOUNT", default_value_t = DEFAULT_AMOUNT)]
    pub amount: u32,

    /// Only list questions from this category
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Show the correct answer next to each question
    #[arg(long)]
    pub answers: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Questions of one batch, optionally filtered to a category
#[derive(Debug, Serialize, Clone)]
pub struct ListOutput {
    pub total_fetched: usize,
    pub filter: Option<String>,
    pub questions: Vec<TriviaQuestion>,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    let output = list_data(&global, options.amount, options.filter.clone()).await?;

    if options.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_list_table(&output, options.answers));
    }

    Ok(())
}

/// Fetches a batch of questions and keeps the ones matching `filter`
pub async fn list_data(
    global: &crate::Global,
    amount: u32,
    filter: Option<String>,
) -> Result<ListOutput> {
    let questions = super::fetch_batch(global, amount).await?;

    let filtered = filter_by_category(&questions, filter.as_deref())
        .into_iter()
        .cloned()
        .collect();

    Ok(ListOutput {
        total_fetched: questions.len(),
        filter,
        questions: filtered,
    })
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

fn format_list_table(output: &ListOutput, answers: bool) -> String {
    if output.questions.is_empty() {
        return format!("{}\n", "No questions to show.".yellow());
    }

    let mut table = new_table();
    if answers {
        table.add_row(prettytable::row![b -> "#", b -> "DIFFICULTY", b -> "CATEGORY", b -> "QUESTION", b -> "ANSWER"]);
    } else {
        table.add_row(prettytable::row![b -> "#", b -> "DIFFICULTY", b -> "CATEGORY", b -> "QUESTION"]);
    }

    for (idx, question) in output.questions.iter().enumerate() {
        let kind = match question.question_type {
            QuestionType::Multiple => "",
            QuestionType::Boolean => " (T/F)",
        };
        let text = format!("{}{kind}", truncate_text(&question.question, QUESTION_WIDTH));
        let difficulty = capitalize(question.difficulty.as_str());

        if answers {
            table.add_row(prettytable::row![
                idx + 1,
                difficulty,
                question.category,
                text,
                question.correct_answer
            ]);
        } else {
            table.add_row(prettytable::row![idx + 1, difficulty, question.category, text]);
        }
    }

    let mut result = table.to_string();
    result.push_str(&format!(
        "\n{} {} {}\n",
        output.questions.len().to_string().bright_cyan().bold(),
        "of".bright_white(),
        format!("{} questions", output.total_fetched).bright_white()
    ));
    if let Some(filter) = &output.filter {
        result.push_str(&format!("{} {}\n", "Filtered by".bright_white(), filter.bright_cyan()));
    }
    result
}
