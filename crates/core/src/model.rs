/// A callable model that maps a typed input to a typed output.
///
/// Models must be deterministic. Solvers call them many times per solve and
/// rely on the same input always producing the same output, so a model must not
/// keep state between calls.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type for domain-specific failures.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// An input/output pair captured from one model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a snapshot from an input and the output it produced.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Splits the snapshot back into its input and output.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}
