//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and initialises logging
//! - loads settings from the environment
//! - reads systems / point sets from files or inline strings
//! - runs the requested task (see `pipeline`)
//! - prints the report (or JSON), plots, and writes optional exports

use clap::Parser;

use crate::cli::{
    Cli, Command, FitArgs, IntegrateArgs, InterpolateArgs, IterateArgs, PlotOptions, PointInput,
    SampleCommand, SamplePointsArgs, SampleSystemArgs, SolveArgs, SystemInput,
};
use crate::config::Settings;
use crate::domain::{Point, SystemProblem};
use crate::error::{AppError, EXIT_INTERNAL, EXIT_NUMERIC};
use crate::math::SeidelOptions;

pub mod pipeline;

use pipeline::Outcome;

/// Entry point for the `nm` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::from_env()?;
    log::debug!("settings: {settings:?}");

    let output = OutputOptions {
        json: cli.json,
        export: cli.export,
    };

    match cli.command {
        Command::Solve(args) => handle_solve(args, &output),
        Command::Iterate(args) => handle_iterate(args, &settings, &output),
        Command::Fit(args) => handle_fit(args, &settings, &output),
        Command::Interpolate(args) => handle_interpolate(args, &settings, &output),
        Command::Integrate(args) => handle_integrate(args, &settings, &output),
        Command::Sample(SampleCommand::System(args)) => handle_sample_system(args),
        Command::Sample(SampleCommand::Points(args)) => handle_sample_points(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // `RUST_LOG`, when set, is applied after the flag-derived level and wins.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

#[derive(Debug, Clone)]
struct OutputOptions {
    json: bool,
    export: Option<std::path::PathBuf>,
}

/// Print the outcome, write the export, and turn a failed task into an exit code.
fn emit(outcome: &Outcome, extra: Option<String>, output: &OutputOptions) -> Result<(), AppError> {
    if output.json {
        println!("{}", crate::io::outcome_to_json(outcome)?);
    } else {
        println!("{}", crate::report::format_outcome(outcome));
        if let Some(extra) = extra {
            println!("{extra}");
        }
    }

    if let Some(path) = &output.export {
        crate::io::write_outcome_json(path, outcome)?;
        log::info!("wrote export to {}", path.display());
    }

    match outcome.failure() {
        Some(message) => Err(AppError::new(EXIT_NUMERIC, message)),
        None => Ok(()),
    }
}

fn handle_solve(args: SolveArgs, output: &OutputOptions) -> Result<(), AppError> {
    let problem = load_system(&args.system)?;
    let outcome = pipeline::run_solve(&problem.matrix, &problem.rhs, &args.method.methods());
    emit(&Outcome::Solve(outcome), None, output)
}

fn handle_iterate(args: IterateArgs, settings: &Settings, output: &OutputOptions) -> Result<(), AppError> {
    let problem = load_system(&args.system)?;

    let tolerance = args.tolerance.unwrap_or(settings.tolerance);
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(AppError::input("--tolerance must be a finite value > 0."));
    }
    let max_iterations = args.max_iterations.unwrap_or(settings.max_iterations);
    if max_iterations == 0 {
        return Err(AppError::input("--max-iterations must be >= 1."));
    }

    let guess = match (&args.guess, &problem.initial_guess) {
        (Some(raw), _) => crate::io::parse_vector(raw)?,
        (None, Some(guess)) => guess.clone(),
        (None, None) => vec![0.0; problem.rhs.len()],
    };

    let options = SeidelOptions {
        tolerance,
        max_iterations,
    };
    let outcome = pipeline::run_iterate(&problem.matrix, &problem.rhs, &guess, options);
    emit(&Outcome::Iterate(outcome), None, output)
}

fn handle_fit(args: FitArgs, settings: &Settings, output: &OutputOptions) -> Result<(), AppError> {
    let points = load_points(&args.input)?;
    let outcome = pipeline::run_fit(&points, &args.model.kinds());

    let mut extra = String::new();
    if let Some(best) = outcome.fits.first() {
        if args.top > 0 {
            let residuals = crate::report::compute_residuals(&points, best);
            let top = crate::report::largest_residuals(&residuals, args.top);
            extra.push_str(&format!("Largest residuals ({}):\n", best.kind.display_name()));
            extra.push_str(&crate::report::format_residuals(&top));
        }
        if args.plot.plot {
            let (width, height) = plot_size(&args.plot, settings);
            extra.push('\n');
            extra.push_str(&crate::plot::render_fit_plot(&points, best, width, height));
        }
    }

    emit(&Outcome::Fit(outcome), Some(extra).filter(|s| !s.is_empty()), output)
}

fn handle_interpolate(args: InterpolateArgs, settings: &Settings, output: &OutputOptions) -> Result<(), AppError> {
    if !args.at.is_finite() {
        return Err(AppError::input("--at must be finite."));
    }
    let points = load_points(&args.input)?;
    let methods = args.method.methods();
    let outcome = pipeline::run_interpolate(&points, args.at, &methods);

    let mut extra = None;
    if args.plot.plot {
        let value = outcome.runs.iter().find_map(|r| r.value);
        if let (Some(&method), Some(value)) = (methods.first(), value) {
            let (width, height) = plot_size(&args.plot, settings);
            let (lo, hi) = points
                .iter()
                .map(|p| p.x)
                .chain(std::iter::once(args.at))
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| (lo.min(x), hi.max(x)));
            let xs = crate::plot::grid_xs(lo, hi, width);
            match crate::math::evaluate_grid(method, &points, &xs) {
                Ok(ys) => {
                    let curve: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();
                    extra = Some(crate::plot::render_curve_plot(
                        &points,
                        &curve,
                        Some((args.at, value)),
                        width,
                        height,
                    ));
                }
                Err(err) => log::warn!("skipping plot: {err}"),
            }
        }
    }

    emit(&Outcome::Interpolate(outcome), extra, output)
}

fn handle_integrate(args: IntegrateArgs, settings: &Settings, output: &OutputOptions) -> Result<(), AppError> {
    let spacing_tolerance = args.spacing_tolerance.unwrap_or(settings.spacing_tolerance);
    if !(spacing_tolerance.is_finite() && spacing_tolerance >= 0.0) {
        return Err(AppError::input("--spacing-tolerance must be a finite value >= 0."));
    }
    let points = load_points(&args.input)?;
    let outcome = pipeline::run_integrate(args.rule, &points, spacing_tolerance)?;
    emit(&Outcome::Integrate(outcome), None, output)
}

fn handle_sample_system(args: SampleSystemArgs) -> Result<(), AppError> {
    let sample = crate::data::dominant_system(args.n, args.seed)?;
    match &args.out {
        Some(path) => {
            crate::io::write_problem_json(path, &sample.problem)?;
            println!("Wrote {n}x{n} system to {}", path.display(), n = args.n);
            println!("Known solution: {:?}", sample.solution);
        }
        None => {
            let json = serde_json::to_string_pretty(&sample.problem)
                .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to serialize system: {e}")))?;
            println!("{json}");
            log::info!("known solution: {:?}", sample.solution);
        }
    }
    Ok(())
}

fn handle_sample_points(args: SamplePointsArgs) -> Result<(), AppError> {
    let spec = crate::data::PointSampleSpec {
        kind: args.model,
        coefficients: crate::io::parse_vector(&args.coefficients)?,
        x_min: args.x_min,
        x_max: args.x_max,
        count: args.count,
        noise_sigma: args.noise,
    };
    let points = crate::data::noisy_points(&spec, args.seed)?;
    match &args.out {
        Some(path) => {
            crate::io::write_points_csv(path, &points)?;
            println!("Wrote {} points to {}", points.len(), path.display());
        }
        None => crate::io::write_points(std::io::stdout().lock(), &points)?,
    }
    Ok(())
}

fn load_system(input: &SystemInput) -> Result<SystemProblem, AppError> {
    match (&input.input, &input.matrix, &input.rhs) {
        (Some(path), _, _) => crate::io::read_problem_json(path),
        (None, Some(matrix), Some(rhs)) => Ok(SystemProblem {
            matrix: crate::io::parse_matrix(matrix)?,
            rhs: crate::io::parse_vector(rhs)?,
            initial_guess: None,
        }),
        _ => Err(AppError::input("Provide a system with --input FILE or --matrix and --rhs.")),
    }
}

fn load_points(input: &PointInput) -> Result<Vec<Point>, AppError> {
    match (&input.points, &input.data) {
        (Some(path), _) => {
            let ingested = crate::io::load_points_csv(path)?;
            log::info!(
                "read {} of {} rows from {}",
                ingested.points.len(),
                ingested.rows_read,
                path.display()
            );
            Ok(ingested.points)
        }
        (None, Some(data)) => crate::io::parse_points(data),
        (None, None) => Err(AppError::input("Provide points with --points FILE or --data \"x,y; ...\".")),
    }
}

fn plot_size(opts: &PlotOptions, settings: &Settings) -> (usize, usize) {
    (
        opts.width.unwrap_or(settings.plot_width),
        opts.height.unwrap_or(settings.plot_height),
    )
}
