use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use potflow_cases::{all_cases, find_case};
use potflow_fields::{FieldEvaluator, FlowElement, Grid, Vector2};
use potflow_io::{CaseFile, FieldDocument, ProbeReport, write_json};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("POTFLOW_LOG", "warn"))
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("grid", m)) => run_grid(m),
        Some(("probe", m)) => run_probe(m),
        Some(("cases", _)) => list_cases(),
        Some(("export", m)) => export_case(m),
        Some((other, _)) => Err(anyhow!("unknown subcommand {other}")),
        None => Err(anyhow!("a subcommand is required")),
    }
}

fn case_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("case")
            .short('c')
            .long("case")
            .help("Path to a JSON case file")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath),
    )
    .arg(
        Arg::new("preset")
            .short('p')
            .long("preset")
            .help("Name of a built-in case (see `flow-eval cases`)"),
    )
    .group(
        ArgGroup::new("input")
            .args(["case", "preset"])
            .required(true),
    )
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .help("Write JSON to this file instead of stdout")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn cli() -> Command {
    Command::new("flow-eval")
        .version(clap::crate_version!())
        .about("Evaluate superposed 2D potential flows on a grid or at probe points")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            case_args(Command::new("grid"))
                .about("Evaluate velocity, stream function and potential over the case grid")
                .arg(output_arg())
                .arg(
                    Arg::new("nx")
                        .long("nx")
                        .help("Override the number of grid columns")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("ny")
                        .long("ny")
                        .help("Override the number of grid rows")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("stagnation_tol")
                        .long("stagnation-tol")
                        .help("Speed below which local minima are reported as stagnation points")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("0.05"),
                ),
        )
        .subcommand(
            case_args(Command::new("probe"))
                .about("Evaluate the case at its probe points and any --at points")
                .arg(output_arg())
                .arg(
                    Arg::new("at")
                        .long("at")
                        .help("Probe location X Y (repeatable)")
                        .num_args(2)
                        .value_names(["X", "Y"])
                        .allow_negative_numbers(true)
                        .action(ArgAction::Append)
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .subcommand(Command::new("cases").about("List built-in cases"))
        .subcommand(
            Command::new("export")
                .about("Print a built-in case as a JSON case file")
                .arg(Arg::new("name").required(true).help("Case name"))
                .arg(output_arg()),
        )
}

/// ケースファイルまたはプリセットからケースを読み込む。
fn load_case(m: &ArgMatches) -> Result<CaseFile> {
    if let Some(name) = m.get_one::<String>("preset") {
        let case = find_case(name).with_context(|| format!("no built-in case named {name}"))?;
        log::info!("using preset {} ({})", case.name, case.description);
        return Ok(CaseFile::from_elements(&case.elements()));
    }
    let path = m
        .get_one::<PathBuf>("case")
        .ok_or_else(|| anyhow!("either --case or --preset is required"))?;
    CaseFile::read(path).with_context(|| format!("loading case {}", path.display()))
}

fn load_elements(case: &CaseFile) -> Result<Vec<FlowElement>> {
    let elements = case.flow_elements().context("validating flow elements")?;
    if elements.is_empty() {
        log::warn!("case has no active flow elements; all fields will be zero");
    }
    Ok(elements)
}

fn write_output<T: serde::Serialize>(m: &ArgMatches, value: &T) -> Result<()> {
    match m.get_one::<PathBuf>("output") {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            write_json(BufWriter::new(file), value)?;
            log::info!("wrote {}", path.display());
        }
        None => write_json(std::io::stdout().lock(), value)?,
    }
    Ok(())
}

fn run_grid(m: &ArgMatches) -> Result<()> {
    let mut case = load_case(m)?;
    if let Some(&nx) = m.get_one::<usize>("nx") {
        case.grid.nx = nx;
    }
    if let Some(&ny) = m.get_one::<usize>("ny") {
        case.grid.ny = ny;
    }
    let elements = load_elements(&case)?;
    let grid: Grid = case.grid()?;
    let evaluator: FieldEvaluator = case.evaluator()?;

    let start = std::time::Instant::now();
    let result = evaluator.evaluate_grid(&elements, &grid);
    log::info!(
        "evaluated {} element(s) on {}x{} grid in {:?}",
        elements.len(),
        grid.rows(),
        grid.cols(),
        start.elapsed()
    );
    if !result.is_finite() {
        log::warn!("result contains non-finite values");
    }
    log::info!("max speed {:.4}", result.max_speed());

    let tol = m.get_one::<f64>("stagnation_tol").copied().unwrap_or(0.05);
    let stagnation = evaluator.stagnation_points(&elements, &grid, &result, tol)?;
    if stagnation.is_empty() {
        log::warn!("no stagnation points below speed {tol} on this grid");
    }
    for p in stagnation {
        log::info!("stagnation point near ({:.4}, {:.4})", p.x(), p.y());
    }

    let doc = FieldDocument::new(&grid, &result, evaluator.r2_floor())?;
    write_output(m, &doc)
}

fn run_probe(m: &ArgMatches) -> Result<()> {
    let case = load_case(m)?;
    let elements = load_elements(&case)?;
    let evaluator = case.evaluator()?;

    let mut points = case.probe_points();
    if let Some(values) = m.get_many::<f64>("at") {
        let values: Vec<f64> = values.copied().collect();
        points.extend(values.chunks_exact(2).map(|xy| Vector2::new(xy[0], xy[1])));
    }
    if points.is_empty() {
        return Err(anyhow!("no probe points: add \"probes\" to the case or pass --at X Y"));
    }

    let reports: Vec<ProbeReport> = points
        .iter()
        .map(|&p| ProbeReport::new(p, &evaluator.evaluate_point(&elements, p)))
        .collect();
    write_output(m, &reports)
}

fn list_cases() -> Result<()> {
    for case in all_cases() {
        println!("{:<20} {}", case.name, case.description);
    }
    Ok(())
}

fn export_case(m: &ArgMatches) -> Result<()> {
    let name = m
        .get_one::<String>("name")
        .ok_or_else(|| anyhow!("case name is required"))?;
    let case = find_case(name).with_context(|| format!("no built-in case named {name}"))?;
    write_output(m, &CaseFile::from_elements(&case.elements()))
}
