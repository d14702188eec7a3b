use approx::assert_relative_eq;

use darkfit_diode::{
    Dataset, Fit, FitConfig, FitError, FitStatus, JacobianMode, Params, ParamsError, RootConfig,
    RootConfigError, evaluate, fit::fit,
};
use darkfit_solvers::least_squares::levenberg_marquardt::{self as lm, Termination};

const TRUE: Params = Params::new(1e-6, 3e-4, 1e-4, 1e-2);
const INITIAL: Params = Params::new(1e-4, 2.59e-4, 2e-4, 1e-3);

fn inputs() -> Vec<f64> {
    (1..=10).map(|i| 0.05 * f64::from(i)).collect()
}

/// Noise-free observations generated by the model at the true parameters.
fn dataset() -> Dataset {
    let x = inputs();
    let y = evaluate(&TRUE, &x, &RootConfig::default())
        .expect("true parameters are valid")
        .into_values();
    Dataset::new(x, y).expect("columns match")
}

fn assert_recovers_truth(jacobian: JacobianMode) {
    let dataset = dataset();
    let config = FitConfig {
        jacobian,
        ..FitConfig::default()
    };

    let result = Fit::new(&dataset, INITIAL, config)
        .expect("valid fit")
        .run()
        .expect("fit runs");

    assert!(
        matches!(
            result.status,
            FitStatus::Converged | FitStatus::StoppedByIterationLimit
        ),
        "unexpected status {:?}",
        result.status
    );
    assert!(result.iterations < 500, "took {} iterations", result.iterations);
    assert!(result.sum_of_squares < 1e-6);
    assert!(result.sum_of_squares < result.initial_sum_of_squares);
    assert_eq!(result.degraded_samples, 0);

    let found = result.params.to_array();
    for (found, expected) in found.into_iter().zip(TRUE.to_array()) {
        assert_relative_eq!(found, expected, max_relative = 1e-2);
    }
}

#[test]
fn recovers_parameters_with_finite_differences() {
    assert_recovers_truth(JacobianMode::FiniteDifference);
}

#[test]
fn recovers_parameters_with_analytic_jacobian() {
    assert_recovers_truth(JacobianMode::Analytic);
}

#[test]
fn fits_are_deterministic() {
    let dataset = dataset();
    let run = || {
        Fit::new(&dataset, INITIAL, FitConfig::default())
            .expect("valid fit")
            .run()
            .expect("fit runs")
    };
    let first = run();
    let second = run();

    assert_eq!(first.iterations, second.iterations);
    assert_eq!(first.evaluations, second.evaluations);
    for (a, b) in first.params.to_array().into_iter().zip(second.params.to_array()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn zero_iterations_returns_initial_estimate() {
    let dataset = dataset();
    let config = FitConfig {
        optimizer: lm::Config::default().with_max_iterations(0),
        ..FitConfig::default()
    };

    let result = Fit::new(&dataset, INITIAL, config)
        .expect("valid fit")
        .run()
        .expect("fit runs");

    assert_eq!(result.status, FitStatus::StoppedByIterationLimit);
    assert_eq!(result.termination, Termination::IterationLimit);
    assert_eq!(result.params, INITIAL);
    assert_eq!(result.iterations, 0);
    assert_eq!(result.jacobian_evaluations, 0);
    assert_relative_eq!(result.sum_of_squares, result.initial_sum_of_squares);
    assert!(result.initial_sum_of_squares > 1.0);
}

#[test]
fn degraded_samples_are_counted() {
    // Roots at x = 0.45 and 0.5 lie above 1, outside this bracket.
    let dataset = dataset();
    let config = FitConfig {
        optimizer: lm::Config::default().with_max_iterations(0),
        root: RootConfig::new([0.0, 1.0], *RootConfig::default().solver())
            .expect("valid bracket"),
        ..FitConfig::default()
    };

    let result = Fit::new(&dataset, TRUE, config)
        .expect("valid fit")
        .run()
        .expect("fit runs");

    assert_eq!(result.degraded_samples, 2);
    assert_eq!(result.status, FitStatus::StoppedByIterationLimit);
}

#[test]
fn fit_with_every_sample_degraded_fails() {
    // g stays positive across the whole bracket for every input, so no
    // sample has a sign change to solve.
    let dataset = dataset();
    let initial = Params::new(1e-9, 1e-5, 1e-6, 1e-4);
    let config = FitConfig {
        optimizer: lm::Config::default().with_max_iterations(0),
        ..FitConfig::default()
    };

    let result = Fit::new(&dataset, initial, config)
        .expect("valid fit")
        .run()
        .expect("fit runs");

    assert_eq!(result.degraded_samples, dataset.len());
    assert_eq!(result.status, FitStatus::Failed);
}

#[test]
fn mismatched_columns_are_rejected() {
    let x = inputs();
    let y = vec![0.0; x.len() - 1];

    let err = fit(x, y, INITIAL, FitConfig::default()).expect_err("lengths differ");
    assert!(matches!(
        err,
        FitError::DatasetLengthMismatch {
            predicted: 10,
            observed: 9
        }
    ));
}

#[test]
fn invalid_initial_parameters_are_rejected() {
    let dataset = dataset();
    let initial = Params { b: 0.0, ..INITIAL };

    let err = Fit::new(&dataset, initial, FitConfig::default()).expect_err("b is zero");
    assert!(matches!(err, FitError::InvalidParams(ParamsError::ZeroB)));
}

#[test]
fn invalid_solver_settings_are_rejected_on_construction() {
    let err = RootConfig::new([1.0, 1.0], *RootConfig::default().solver())
        .expect_err("zero-width bracket");
    assert_eq!(err, RootConfigError::Bracket(1.0, 1.0));

    let err = lm::Config::new(10, 0.0, 0.0, -1.0, 1e-6, 100.0).expect_err("negative tolerance");
    assert_eq!(err, lm::ConfigError::ResidualTolerance);
}
