use crate::prelude::{println, *};
use colored::{ColoredString, Colorize};
use triviaviz_core::chart::{build_chart, ChartData, ChartKind, ChartOutput};
use triviaviz_core::grouping::{CategoryGrouping, DifficultyGrouping};
use triviaviz_core::opentdb::{Difficulty, DEFAULT_AMOUNT};
use triviaviz_core::sorting::{SortField, SortOrder, SortingOptions};
use triviaviz_core::text::{capitalize, question_count_label};

const BAR: &str = "█";

/// Widest bar the chart accepts, in characters
const MAX_WIDTH: u64 = 500;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ChartOptions {
    /// Number of questions to fetch (1-50)
    #[arg(short, long, env = "TRIVIA_AMOUNT", default_value_t = DEFAULT_AMOUNT)]
    pub amount: u32,

    /// Chart to draw: difficulty, category
    #[arg(short, long, default_value = "difficulty")]
    pub kind: ChartKind,

    /// Sort categories by: name, count
    #[arg(long, default_value = "name")]
    pub sort_by: SortField,

    /// Sort order: asc, desc
    #[arg(long, default_value = "asc")]
    pub order: SortOrder,

    /// Only chart questions from this category
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Width of the longest bar, in characters (1-500)
    #[arg(
        long,
        default_value = "40",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_WIDTH)
    )]
    pub width: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChartOptions {
    fn sorting(&self) -> SortingOptions {
        SortingOptions::new(self.sort_by, self.order)
    }
}

pub async fn run(options: ChartOptions, global: crate::Global) -> Result<()> {
    let output = chart_data(
        &global,
        options.amount,
        options.kind,
        options.filter.clone(),
        options.sorting(),
    )
    .await?;

    if options.json {
        output_json(&output)?;
    } else {
        print!("{}", format_chart_text(&output, &options));
    }

    Ok(())
}

/// Fetches a batch of questions and returns the requested chart as a structured ChartOutput
pub async fn chart_data(
    global: &crate::Global,
    amount: u32,
    kind: ChartKind,
    filter: Option<String>,
    sort: SortingOptions,
) -> Result<ChartOutput> {
    // Reject the invalid combination before spending a request on it.
    if kind == ChartKind::Category && filter.is_some() {
        return Err(Error::InvalidChart(
            "Cannot group by category when a category filter is applied".to_string(),
        )
        .into());
    }

    let questions = super::fetch_batch(global, amount).await?;

    build_chart(&questions, kind, filter.as_deref(), sort)
        .map_err(|e| Error::InvalidChart(e).into())
}

/// Bar length for `count`, scaled so that `max` fills `width`
///
/// Any non-zero count gets at least one block.
fn bar_length(count: usize, max: usize, width: usize) -> usize {
    if max == 0 || count == 0 {
        return 0;
    }
    (count.saturating_mul(width).saturating_add(max / 2) / max).max(1)
}

fn difficulty_color(difficulty: Difficulty, text: &str) -> ColoredString {
    match difficulty {
        Difficulty::Easy => text.green(),
        Difficulty::Medium => text.yellow(),
        Difficulty::Hard => text.red(),
        Difficulty::Unrecognized => text.bright_black(),
    }
}

fn format_difficulty_bars(groupings: &[DifficultyGrouping], width: usize) -> String {
    let mut result = String::new();
    let max = groupings.iter().map(|g| g.count).max().unwrap_or(0);

    for grouping in groupings {
        let bar = BAR.repeat(bar_length(grouping.count, max, width));
        result.push_str(&format!(
            "  {:<8} {} {}\n",
            capitalize(grouping.difficulty.as_str()).bold(),
            difficulty_color(grouping.difficulty, &bar),
            question_count_label(grouping.count).bright_black()
        ));
    }

    result
}

fn format_category_bars(groupings: &[CategoryGrouping], width: usize) -> String {
    let mut result = String::new();
    let max = groupings.iter().map(|g| g.count).max().unwrap_or(0);
    let label_width = groupings
        .iter()
        .map(|g| g.category.chars().count())
        .max()
        .unwrap_or(0);

    for grouping in groupings {
        let bar = BAR.repeat(bar_length(grouping.count, max, width));
        result.push_str(&format!(
            "  {:<label_width$} {} {}\n",
            grouping.category.bold(),
            bar.bright_blue(),
            question_count_label(grouping.count).bright_black()
        ));
    }

    result
}

fn sort_command(sort: SortingOptions) -> String {
    format!(
        "triviaviz trivia chart --kind category --sort-by {} --order {}",
        sort.field, sort.order
    )
}

/// Convert chart output to formatted text with colors
fn format_chart_text(output: &ChartOutput, options: &ChartOptions) -> String {
    let mut result = String::new();

    let title = match (&output.chart, &output.filter) {
        (ChartData::Difficulty { .. }, Some(filter)) => {
            format!("QUESTIONS BY DIFFICULTY ({filter})")
        }
        (ChartData::Difficulty { .. }, None) => "QUESTIONS BY DIFFICULTY".to_string(),
        (ChartData::Category { sort, .. }, _) => {
            format!("QUESTIONS BY CATEGORY (sorted by {} {})", sort.field, sort.order)
        }
    };

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("{}\n", title.bright_cyan().bold()));
    result.push_str(&format!("{}\n\n", "=".repeat(80).bright_cyan()));

    if output.total_fetched == 0 {
        result.push_str(&format!("{}\n", "No data to show.".yellow()));
        return result;
    }

    match &output.chart {
        ChartData::Difficulty { groupings } => {
            result.push_str(&format_difficulty_bars(groupings, options.width));
        }
        ChartData::Category { groupings, .. } => {
            result.push_str(&format_category_bars(groupings, options.width));
        }
    }

    result.push_str(&format!(
        "\n  {} {} {} {}\n",
        "Showing".bright_white(),
        question_count_label(output.total_questions).bright_cyan().bold(),
        "of".bright_white(),
        output.total_fetched.to_string().bright_cyan().bold()
    ));

    // Options section
    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "OPTIONS".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    match &output.chart {
        ChartData::Category { sort, .. } => {
            result.push_str(&format!("\n{}:\n", "To change the sorting".bright_white().bold()));
            for (label, field) in [("Sort by name", SortField::Name), ("Sort by count", SortField::Count)] {
                result.push_str(&format!(
                    "  {}: {}\n",
                    label.green(),
                    sort_command(sort.toggle(field)).cyan()
                ));
            }
        }
        ChartData::Difficulty { .. } => {
            if output.filter.is_none() {
                result.push_str(&format!(
                    "\n{}:\n  {}\n",
                    "To chart by category".bright_white().bold(),
                    "triviaviz trivia chart --kind category".cyan()
                ));
            }
        }
    }

    match &output.filter {
        Some(filter) => {
            result.push_str(&format!(
                "\n{} {}\n  {}\n",
                "Filtered by".bright_white().bold(),
                filter.bright_cyan(),
                "Run the command again without --filter to remove it".cyan()
            ));
            result.push_str(&format!(
                "  {}\n",
                "(Cannot group by category when a category filter is applied)".bright_black()
            ));
        }
        None => {
            result.push_str(&format!(
                "\n{}:\n  {}\n",
                "To filter by category".bright_white().bold(),
                "triviaviz trivia chart --filter <category>".cyan()
            ));
        }
    }

    result.push_str(&format!(
        "\n{}:\n  {}\n",
        "Available categories".bright_white().bold(),
        output.categories.join(", ")
    ));

    result.push_str(&format!(
        "\n{}:\n  {}\n",
        "To get JSON output".bright_white().bold(),
        "triviaviz trivia chart --json".cyan()
    ));

    result.push('\n');
    result
}

fn output_json(output: &ChartOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
    println!("{}", json);
    Ok(())
}
