use std::fs;
use std::path::PathBuf;

use matchday::{ChartAssembler, ChartConfig, FixtureLoader, SvgSink, draw_plan, init_logging};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "usage: cargo run -p chartgen --bin generate_fixture_chart -- <fixtures_csv> [output_svg] [config.yaml|config.json]"
        );
        std::process::exit(2);
    }
    init_logging();

    let csv_path = PathBuf::from(&args[1]);
    let output = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("match_windows.svg"));
    let config = match args.get(3) {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };

    let assembler = ChartAssembler::new(config)?;
    let fixtures = FixtureLoader::from_config(assembler.config()).load(&csv_path)?;
    let chart = assembler.assemble(&fixtures)?;

    let mut sink = SvgSink::new();
    draw_plan(&chart.plan, &mut sink);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&output, sink.into_string())?;
    info!(
        path = %output.display(),
        width = chart.plan.width,
        height = chart.plan.height,
        "wrote fixture chart"
    );

    println!("{}", chart.summary());
    Ok(())
}
