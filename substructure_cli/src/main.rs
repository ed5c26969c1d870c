//! # Substructure CLI
//!
//! Command-line front end for `substructure_core`. Reads a parameter file
//! (JSON, partial records allowed), validates it, prints the quantity
//! summary and optionally writes the assembled geometry as JSON and a PDF
//! quantity report.
//!
//! Logging goes to stderr; set `RUST_LOG` (e.g. `RUST_LOG=substructure_core=debug`)
//! to see which derivations recompute.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use substructure_core::params::{CurveDirection, SubstructureParams};
use substructure_core::quantities::QuantitySummary;
use substructure_core::report::render_quantity_pdf;
use substructure_core::units::format_2dp;
use substructure_core::{GeometryError, SubstructureModel};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Geometry(GeometryError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Geometry(err) => write!(f, "{err}"),
        }
    }
}

impl From<GeometryError> for CliError {
    fn from(value: GeometryError) -> Self {
        Self::Geometry(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    params_path: Option<String>,
    interactive: bool,
    print_defaults: bool,
    json: bool,
    geometry_out: Option<String>,
    report_out: Option<String>,
    designer: String,
    job_id: String,
}

fn usage() -> &'static str {
    "substructure\n\
\n\
USAGE:\n\
  substructure [--interactive] [--json] [--geometry <out.json>] [--report <out.pdf>]\n\
               [--designer <name>] [--job <id>] [<params.json>]\n\
  substructure --print-defaults\n\
\n\
NOTES:\n\
  - Without <params.json> the built-in two-span bridge is used.\n\
  - --interactive prompts for the alignment values before computing.\n\
  - --json prints the quantity summary as JSON instead of a table.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        designer: "Unknown".to_string(),
        job_id: "-".to_string(),
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--interactive" | "-i" => args.interactive = true,
            "--print-defaults" => args.print_defaults = true,
            "--json" => args.json = true,
            "--geometry" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.geometry_out = Some(path.clone());
            }
            "--report" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.report_out = Some(path.clone());
            }
            "--designer" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.designer = name.clone();
            }
            "--job" => {
                let Some(job) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.job_id = job.clone();
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.params_path.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.params_path = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    Some(input)
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|input| input.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a curve direction answer; anything unrecognized keeps `default`.
fn parse_direction(input: &str, default: CurveDirection) -> CurveDirection {
    match input.trim().to_ascii_lowercase().as_str() {
        "l" | "left" => CurveDirection::Left,
        "r" | "right" => CurveDirection::Right,
        _ => default,
    }
}

/// Answers collected by the interactive alignment prompts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AlignmentAnswers {
    span_count: f64,
    span_length_in: f64,
    road_slope: f64,
    curve_radius_in: f64,
    curve_start_angle_deg: f64,
    curve_direction: CurveDirection,
}

impl AlignmentAnswers {
    fn defaults_from(params: &SubstructureParams) -> Self {
        AlignmentAnswers {
            span_count: f64::from(params.span_count),
            span_length_in: params.span_length_in,
            road_slope: params.road_slope,
            curve_radius_in: if params.use_curve { params.curve_radius_in } else { 0.0 },
            curve_start_angle_deg: params.curve_start_angle_deg,
            curve_direction: params.curve_direction,
        }
    }

    /// Fold the answers into `params`. A radius of zero (or less) selects a
    /// straight alignment.
    fn apply(self, mut params: SubstructureParams) -> SubstructureParams {
        // Huge answers saturate at u32::MAX; sanitized() clamps them afterwards
        params.span_count = self.span_count.max(0.0).round() as u32;
        params.span_length_in = self.span_length_in;
        params.road_slope = self.road_slope;
        params.use_curve = self.curve_radius_in > 0.0;
        if params.use_curve {
            params.curve_radius_in = self.curve_radius_in;
            params.curve_start_angle_deg = self.curve_start_angle_deg;
            params.curve_direction = self.curve_direction;
        }
        params
    }
}

fn prompt_alignment(params: SubstructureParams) -> SubstructureParams {
    let mut answers = AlignmentAnswers::defaults_from(&params);
    answers.span_count = prompt_f64(&format!("Number of spans [{}]: ", params.span_count), answers.span_count);
    answers.span_length_in = prompt_f64(
        &format!("Span length (in) [{}]: ", answers.span_length_in),
        answers.span_length_in,
    );
    answers.road_slope = prompt_f64(&format!("Road slope [{}]: ", answers.road_slope), answers.road_slope);
    answers.curve_radius_in = prompt_f64(
        &format!("Curve radius (in), 0 for straight [{}]: ", answers.curve_radius_in),
        answers.curve_radius_in,
    );
    if answers.curve_radius_in > 0.0 {
        answers.curve_start_angle_deg = prompt_f64(
            &format!("Curve start angle (deg) [{}]: ", answers.curve_start_angle_deg),
            answers.curve_start_angle_deg,
        );
        let default_direction = answers.curve_direction;
        let label = match default_direction {
            CurveDirection::Left => "left",
            CurveDirection::Right => "right",
        };
        answers.curve_direction = prompt_line(&format!("Curve direction, left/right [{}]: ", label))
            .map(|input| parse_direction(&input, default_direction))
            .unwrap_or(default_direction);
    }
    println!();
    answers.apply(params)
}

fn load_params(args: &Args) -> Result<SubstructureParams, CliError> {
    let params = match &args.params_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| GeometryError::io("read", path.as_str(), e.to_string()))?;
            tracing::info!(path = path.as_str(), "loaded parameter file");
            SubstructureParams::from_json(&text)?
        }
        None => SubstructureParams::default(),
    };
    let params = if args.interactive { prompt_alignment(params) } else { params };
    Ok(params.sanitized())
}

fn write_file(path: &str, bytes: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, bytes).map_err(|e| GeometryError::io("write", path, e.to_string()))?;
    tracing::info!(path, bytes = bytes.len(), "wrote output");
    Ok(())
}

fn print_summary(params: &SubstructureParams, summary: &QuantitySummary) {
    println!("═══════════════════════════════════════");
    println!("  SUBSTRUCTURE QUANTITIES");
    println!("═══════════════════════════════════════");
    println!();
    println!("Alignment:");
    println!("  Spans:    {} x {} in", params.span_count, format_2dp(params.span_length_in));
    println!("  Slope:    {}", params.road_slope);
    if params.use_curve {
        println!(
            "  Curve:    R = {} in, start {} deg, {:?}",
            format_2dp(params.curve_radius_in),
            format_2dp(params.curve_start_angle_deg),
            params.curve_direction
        );
    } else {
        println!("  Curve:    none (straight)");
    }
    println!();
    println!("Per pier:");
    println!("  Pier   Elev(in)   ColH(in)   Piles   PileCap(ft3)   Columns(ft3)   PierCap(ft3)");
    for s in &summary.stations {
        println!(
            "  {:<4}   {:>8}   {:>8}   {:>5}   {:>12}   {:>12}   {:>12}",
            s.index + 1,
            format_2dp(s.elevation_in),
            format_2dp(s.column_height_in),
            s.pile_count,
            format_2dp(s.pile_cap_volume.0),
            format_2dp(s.column_volume.0),
            format_2dp(s.pier_cap_volume.0),
        );
    }
    println!();
    println!("Totals:");
    println!("  Piles:            {}", summary.total_piles);
    println!("  Pile length:      {} in", format_2dp(summary.total_pile_length.0));
    println!("  Columns:          {}", summary.total_columns);
    println!("  Pile cap:         {} ft3", format_2dp(summary.total_pile_cap_volume.0));
    println!("  Columns:          {} ft3", format_2dp(summary.total_column_volume.0));
    println!("  Pier cap:         {} ft3", format_2dp(summary.total_pier_cap_volume.0));
    println!(
        "  Concrete:         {} ft3 ({} yd3)",
        format_2dp(summary.total_concrete_volume().0),
        format_2dp(summary.total_concrete_cuyd().0)
    );
    for warning in &summary.warnings {
        println!("  [WARN] {}", warning);
    }
    println!("═══════════════════════════════════════");
}

fn run(args: &Args) -> Result<(), CliError> {
    if args.print_defaults {
        println!("{}", SubstructureParams::default().to_json_pretty()?);
        return Ok(());
    }

    let params = load_params(args)?;
    let mut model = SubstructureModel::new(params)?;

    let summary = model.quantities().clone();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary).map_err(GeometryError::from)?);
    } else {
        print_summary(model.params(), &summary);
    }

    if let Some(path) = &args.geometry_out {
        let json = serde_json::to_string_pretty(model.geometry()).map_err(GeometryError::from)?;
        write_file(path, json.as_bytes())?;
    }

    if let Some(path) = &args.report_out {
        let pdf = render_quantity_pdf(model.params(), &summary, &args.designer, &args.job_id)?;
        write_file(path, &pdf)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for the engine and this binary.
    // Override with RUST_LOG.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("substructure_core=info".parse().unwrap_or_default())
        .add_directive("substructure=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().collect();
    let result = parse_args(&argv).and_then(|args| run(&args));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(text)) => {
            eprintln!("{}", text);
            ExitCode::from(2)
        }
        Err(CliError::Geometry(e)) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("substructure")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&argv(&["--json", "--report", "q.pdf", "--job", "26-1", "bridge.json"])).unwrap();
        assert!(args.json);
        assert_eq!(args.report_out.as_deref(), Some("q.pdf"));
        assert_eq!(args.job_id, "26-1");
        assert_eq!(args.params_path.as_deref(), Some("bridge.json"));
        assert_eq!(args.designer, "Unknown");
    }

    #[test]
    fn test_parse_args_rejects_unknown_and_missing_values() {
        assert!(matches!(parse_args(&argv(&["--bogus"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(&argv(&["--geometry"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(&argv(&["a.json", "b.json"])), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_zero_radius_selects_straight_alignment() {
        let curved = SubstructureParams {
            use_curve: true,
            curve_radius_in: 18000.0,
            ..Default::default()
        };
        let mut answers = AlignmentAnswers::defaults_from(&curved);
        assert_eq!(answers.curve_radius_in, 18000.0);

        answers.curve_radius_in = 0.0;
        let params = answers.apply(curved);
        assert!(!params.use_curve);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_positive_radius_selects_curve_and_direction() {
        let mut answers = AlignmentAnswers::defaults_from(&SubstructureParams::default());
        assert_eq!(answers.curve_radius_in, 0.0);

        answers.curve_radius_in = 24000.0;
        answers.curve_start_angle_deg = 30.0;
        answers.curve_direction = parse_direction(" Right\n", CurveDirection::Left);
        let params = answers.apply(SubstructureParams::default());
        assert!(params.use_curve);
        assert_eq!(params.curve_radius_in, 24000.0);
        assert_eq!(params.curve_start_angle_deg, 30.0);
        assert_eq!(params.curve_direction, CurveDirection::Right);
    }

    #[test]
    fn test_parse_direction_keeps_default_on_blank() {
        assert_eq!(parse_direction("\n", CurveDirection::Right), CurveDirection::Right);
        assert_eq!(parse_direction("l", CurveDirection::Right), CurveDirection::Left);
        assert_eq!(parse_direction("sideways", CurveDirection::Left), CurveDirection::Left);
    }

    #[test]
    fn test_infinite_span_answer_is_clamped() {
        let mut answers = AlignmentAnswers::defaults_from(&SubstructureParams::default());
        answers.span_count = f64::INFINITY;
        let params = answers.apply(SubstructureParams::default()).sanitized();
        assert_eq!(params.span_count, substructure_core::params::MAX_SPANS);

        answers.span_count = 1.0e12;
        let params = answers.apply(SubstructureParams::default()).sanitized();
        assert_eq!(params.span_count, substructure_core::params::MAX_SPANS);
    }

    #[test]
    fn test_missing_params_file_is_io_error() {
        let args = Args {
            params_path: Some("/nonexistent/params.json".to_string()),
            ..Default::default()
        };
        match load_params(&args) {
            Err(CliError::Geometry(e)) => assert_eq!(e.error_code(), "IO_ERROR"),
            other => panic!("expected IO error, got {:?}", other),
        }
    }
}
