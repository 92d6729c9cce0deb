use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use matchday::{ChartAssembler, ChartConfig, FixtureLoader, LayoutPlan, init_logging};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ExportPayload<'a> {
    generated_at: DateTime<Utc>,
    fixture_count: usize,
    windows: Vec<WindowPoint>,
    layout: &'a LayoutPlan,
}

#[derive(Debug, Serialize)]
struct WindowPoint {
    window: usize,
    round: Option<u32>,
    start: i64,
    end: i64,
    fixture_ids: Vec<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "usage: cargo run -p chartgen --bin export_layout_json -- <fixtures_csv> [output_json] [config.yaml|config.json]"
        );
        std::process::exit(2);
    }
    init_logging();

    let csv_path = PathBuf::from(&args[1]);
    let output = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("match_windows.json"));
    let config = match args.get(3) {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };

    let assembler = ChartAssembler::new(config)?;
    let fixtures = FixtureLoader::from_config(assembler.config()).load(&csv_path)?;
    let chart = assembler.assemble(&fixtures)?;

    let windows = chart
        .windows
        .iter()
        .enumerate()
        .map(|(i, window)| WindowPoint {
            window: i + 1,
            round: window.round(),
            start: window.start.timestamp(),
            end: window.end.timestamp(),
            fixture_ids: window.fixtures.iter().map(|x| x.id).collect(),
        })
        .collect::<Vec<_>>();

    let payload = ExportPayload {
        generated_at: Utc::now(),
        fixture_count: chart.fixture_count(),
        windows,
        layout: &chart.plan,
    };
    fs::write(&output, serde_json::to_string_pretty(&payload)?)?;
    println!(
        "exported {} windows in {} rows to {}",
        payload.windows.len(),
        chart.plan.rows.len(),
        output.display()
    );
    Ok(())
}
