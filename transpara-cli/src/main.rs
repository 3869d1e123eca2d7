mod render;

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use clap::{Parser, ValueEnum};
use render::{ColorMode, RenderOptions, Renderer};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use transpara_core::{
    Catalog, Config, DateRange, DateSelection, Endpoint, FilterState, NameSort, PickerState,
    Presets, RangePicker, Step, Tag, TagFilter, parse_selection_token, render as labels,
};

/// transpara — TransparaTech document catalog browser
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Prints the catalog file path
    #[arg(long, short, exclusive = true)]
    path: bool,
    /// Free-text search over document titles and descriptions
    #[arg(long, short)]
    query: Option<String>,
    /// Only show documents with this category tag (e.g. `receipt`)
    #[arg(long, short)]
    tag: Option<String>,
    /// Named date preset (e.g. `today`, `last 30 days`, or a configured synonym)
    #[arg(long, conflicts_with_all = ["from", "to"])]
    preset: Option<String>,
    /// Start of a custom date range: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    #[arg(long)]
    from: Option<String>,
    /// End of a custom date range: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    #[arg(long)]
    to: Option<String>,
    /// Sort documents alphabetically by title
    #[arg(long, value_enum)]
    sort: Option<SortDirection>,
    /// Use this catalog file instead of the configured one
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
    /// Only shows one line per document.
    #[arg(long, short)]
    short: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn into_name_sort(self) -> NameSort {
        match self {
            SortDirection::Asc => NameSort::Asc,
            SortDirection::Desc => NameSort::Desc,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("transpara: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(path) = &cli.catalog {
        config.catalog_path = path.clone();
    }

    let use_color = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                false
            } else {
                io::stdout().is_terminal()
            }
        }
    };
    let renderer = Renderer::new(Some(RenderOptions {
        date_format: config.date_format.clone(),
        use_color,
        short_mode: cli.short,
    }));

    if cli.path {
        renderer.print_info(&format!("{}", config.catalog_path.display()));
        return Ok(());
    }

    let catalog = Catalog::with_config(config)?;
    let ranges = build_ranges(&cli)?;

    let tag = match &cli.tag {
        Some(token) => TagFilter::Only(
            Tag::from_str(token).map_err(|_| anyhow!("'{token}' is not a known tag"))?,
        ),
        None => TagFilter::All,
    };
    let state = FilterState {
        query: cli.query.clone().unwrap_or_default(),
        tag,
        ranges,
        sort: cli
            .sort
            .map(SortDirection::into_name_sort)
            .unwrap_or_default(),
    };

    let documents = catalog.filter(&state);
    if documents.is_empty() {
        renderer.print_info("No documents found.");
    } else {
        let mut summary = format!("{} documents found.", documents.len());
        if let Some(range) = state.ranges.first() {
            let label = labels::format_range(range, &catalog.config.date_format);
            summary.push_str(&format!(" Range: {label}"));
        }
        renderer.print_info(&summary);
        renderer.print_documents(&documents);
    }
    if !catalog.errors.is_empty() {
        renderer.print_errors(&catalog.errors);
    }

    Ok(())
}

/// Builds the committed range list from the CLI's date flags.
fn build_ranges(cli: &Cli) -> Result<Vec<DateRange>> {
    let mut picker = RangePicker::new();

    if let Some(token) = &cli.preset {
        let preset = Presets::parse(token)
            .with_context(|| format!("'{token}' is not a known preset or synonym"))?;
        picker.open();
        picker.preset(preset, Local::now().date_naive());
        return Ok(picker.ranges().to_vec());
    }

    if cli.from.is_none() && cli.to.is_none() {
        return Ok(Vec::new());
    }

    picker.open();
    picker.custom();
    if let Some(token) = &cli.from {
        let sel = parse_endpoint_token(token)?;
        drive_endpoint(&mut picker, Endpoint::From, &sel);
    }
    if let Some(token) = &cli.to {
        let sel = parse_endpoint_token(token)?;
        drive_endpoint(&mut picker, Endpoint::To, &sel);
    }
    picker.apply();

    let mut ranges = picker.ranges().to_vec();
    if cli.to.is_none() {
        // The picker drags `to` along with the `from` year to keep a
        // clicked range non-inverted; on the command line a missing
        // `--to` means open-ended instead.
        for range in &mut ranges {
            range.end = None;
        }
    }
    Ok(ranges)
}

fn parse_endpoint_token(token: &str) -> Result<DateSelection> {
    parse_selection_token(token).with_context(|| {
        format!("'{token}' is not a valid range endpoint (use YYYY, YYYY-MM or YYYY-MM-DD)")
    })
}

/// Replays a parsed endpoint token through the picker's event API, so CLI
/// input passes the same snap-forward and disabled-option rules as clicks
/// in the portal UI. Options the picker rejects are simply not applied.
fn drive_endpoint(picker: &mut RangePicker, endpoint: Endpoint, sel: &DateSelection) {
    picker.edit(endpoint);
    while !matches!(
        picker.state(),
        PickerState::Custom {
            step: Step::YearSelect,
            ..
        }
    ) {
        picker.back();
    }
    if let Some(year) = sel.year {
        picker.select_year(year);
    }
    if let Some(month) = sel.month {
        picker.select_month(month);
    }
    if let Some(day) = sel.day {
        picker.select_day(day);
    }
}
