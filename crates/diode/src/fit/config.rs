use darkfit_solvers::least_squares::levenberg_marquardt as lm;

use crate::{JacobianMode, RootConfig};

/// Settings for a fit: the outer optimizer, the inner root solves, and how
/// the Jacobian is obtained.
///
/// Both solver configs are validated when they are constructed, so any
/// `FitConfig` is ready to use.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitConfig {
    pub optimizer: lm::Config,
    pub root: RootConfig,
    pub jacobian: JacobianMode,
}
