//! Command-line parsing for `nm`.
//!
//! Argument parsing and dispatch stay separate from the numerical code. Options that
//! are also configurable through the environment (`config::Settings`) are `Option`s
//! here; a flag given on the command line wins.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{DirectSpec, InterpolationSpec, ModelSpec, QuadratureRule, RegressionKind};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "nm",
    version,
    about = "Numerical methods toolkit: linear systems, regression, interpolation, quadrature"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print the outcome as JSON instead of the text report.
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write the outcome (with a timestamp) to a JSON file.
    #[arg(long, global = true, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve A·x = b with direct elimination (Gauss, Gauss-Jordan, LU).
    Solve(SolveArgs),
    /// Solve A·x = b with Gauss-Seidel iteration.
    Iterate(IterateArgs),
    /// Fit least-squares regression models and rank them by SSE.
    Fit(FitArgs),
    /// Evaluate the interpolating polynomial through the points.
    Interpolate(InterpolateArgs),
    /// Integrate equally spaced samples.
    Integrate(IntegrateArgs),
    /// Generate synthetic inputs.
    #[command(subcommand)]
    Sample(SampleCommand),
}

/// A linear system given as a problem file or inline strings.
#[derive(Debug, Args, Clone)]
pub struct SystemInput {
    /// Problem JSON: {"matrix": [[..]], "rhs": [..], "initial_guess": [..]}.
    #[arg(long, value_name = "JSON", conflicts_with_all = ["matrix", "rhs"])]
    pub input: Option<PathBuf>,

    /// Inline matrix: rows separated by ';', values by ',' or spaces.
    #[arg(long, requires = "rhs")]
    pub matrix: Option<String>,

    /// Inline right-hand side vector.
    #[arg(long, requires = "matrix")]
    pub rhs: Option<String>,
}

/// A point set given as a CSV file or inline string.
#[derive(Debug, Args, Clone)]
pub struct PointInput {
    /// CSV file with `x` and `y` columns.
    #[arg(long, value_name = "CSV", conflicts_with = "data")]
    pub points: Option<PathBuf>,

    /// Inline points: "x,y; x,y; ...".
    #[arg(long)]
    pub data: Option<String>,
}

/// Plot options shared by `fit` and `interpolate`.
#[derive(Debug, Args, Clone)]
pub struct PlotOptions {
    /// Render an ASCII plot after the report.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long)]
    pub width: Option<usize>,

    /// Plot height (rows).
    #[arg(long)]
    pub height: Option<usize>,
}

#[derive(Debug, Args, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub system: SystemInput,

    /// Which direct method(s) to run.
    #[arg(long, value_enum, default_value_t = DirectSpec::All)]
    pub method: DirectSpec,
}

#[derive(Debug, Args, Clone)]
pub struct IterateArgs {
    #[command(flatten)]
    pub system: SystemInput,

    /// Initial guess (defaults to the problem file's guess, then zeros).
    #[arg(long)]
    pub guess: Option<String>,

    /// Stop once the largest per-sweep change is below this.
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Maximum number of sweeps.
    #[arg(long)]
    pub max_iterations: Option<usize>,
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: PointInput,

    /// Which model(s) to fit.
    #[arg(long, value_enum, default_value_t = ModelSpec::All)]
    pub model: ModelSpec,

    /// Show the N largest residuals of the best model.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    #[command(flatten)]
    pub plot: PlotOptions,
}

#[derive(Debug, Args, Clone)]
pub struct InterpolateArgs {
    #[command(flatten)]
    pub input: PointInput,

    /// Where to evaluate the interpolating polynomial.
    #[arg(long, allow_negative_numbers = true)]
    pub at: f64,

    /// Which scheme(s) to use.
    #[arg(long, value_enum, default_value_t = InterpolationSpec::All)]
    pub method: InterpolationSpec,

    #[command(flatten)]
    pub plot: PlotOptions,
}

#[derive(Debug, Args, Clone)]
pub struct IntegrateArgs {
    #[command(flatten)]
    pub input: PointInput,

    /// Composite rule.
    #[arg(long, value_enum, default_value_t = QuadratureRule::Simpson)]
    pub rule: QuadratureRule,

    /// Allowed deviation from uniform spacing.
    #[arg(long)]
    pub spacing_tolerance: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum SampleCommand {
    /// A strictly diagonally dominant system with a known integer solution.
    System(SampleSystemArgs),
    /// Points sampled from a regression model, with optional Gaussian noise.
    Points(SamplePointsArgs),
}

#[derive(Debug, Args, Clone)]
pub struct SampleSystemArgs {
    /// System size.
    #[arg(short = 'n', long, default_value_t = 3)]
    pub n: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Problem JSON to write (stdout if omitted).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SamplePointsArgs {
    #[arg(long, value_enum, default_value_t = RegressionKind::Linear)]
    pub model: RegressionKind,

    /// Model coefficients, e.g. "1,2" for y = 1 + 2x.
    #[arg(long, default_value = "1,2", allow_hyphen_values = true)]
    pub coefficients: String,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x_min: f64,

    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Number of equally spaced points.
    #[arg(short = 'n', long, visible_alias = "n", default_value_t = 11)]
    pub count: usize,

    /// Standard deviation of additive noise.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// CSV to write (stdout if omitted).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_solve_with_inline_system() {
        let cli = Cli::try_parse_from(["nm", "solve", "--matrix", "2 1; 1 3", "--rhs", "3 5", "--method", "lu"])
            .unwrap();
        match cli.command {
            Command::Solve(args) => {
                assert_eq!(args.method, DirectSpec::Lu);
                assert_eq!(args.system.matrix.as_deref(), Some("2 1; 1 3"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["nm", "integrate", "--data", "0,0;1,1", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn negative_query_point_is_accepted() {
        let cli = Cli::try_parse_from(["nm", "interpolate", "--data", "0,0;1,1", "--at", "-0.5"]).unwrap();
        match cli.command {
            Command::Interpolate(args) => assert_eq!(args.at, -0.5),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn input_file_conflicts_with_inline_matrix() {
        let res = Cli::try_parse_from(["nm", "solve", "--input", "p.json", "--matrix", "1", "--rhs", "1"]);
        assert!(res.is_err());
    }

    #[test]
    fn sample_points_parses() {
        let cli = Cli::try_parse_from(["nm", "sample", "points", "--model", "exponential", "--coefficients", "2,-0.5"])
            .unwrap();
        match cli.command {
            Command::Sample(SampleCommand::Points(args)) => {
                assert_eq!(args.model, RegressionKind::Exponential);
                assert_eq!(args.coefficients, "2,-0.5");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
