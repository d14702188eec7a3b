use thiserror::Error;

/// One measurement: an input `x` and the observed output `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// An ordered set of measurements, stored column-wise.
///
/// A dataset is never empty, its columns always have equal length, and every
/// value is finite.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Sample>", into = "Vec<Sample>")
)]
pub struct Dataset {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Errors that can occur when building a [`Dataset`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DatasetError {
    #[error("{x} inputs but {y} observed outputs")]
    LengthMismatch { x: usize, y: usize },

    #[error("dataset has no samples")]
    Empty,

    #[error("sample {index} is not finite")]
    NonFinite { index: usize },
}

impl Dataset {
    /// Creates a dataset from parallel input and output columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the columns differ in length, are empty, or hold a
    /// non-finite value.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, DatasetError> {
        if x.len() != y.len() {
            return Err(DatasetError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(DatasetError::Empty);
        }
        if let Some(index) = x
            .iter()
            .zip(&y)
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(DatasetError::NonFinite { index });
        }
        Ok(Self { x, y })
    }

    /// Creates a dataset from samples, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no samples or one is non-finite.
    pub fn from_samples(samples: impl IntoIterator<Item = Sample>) -> Result<Self, DatasetError> {
        let (x, y) = samples.into_iter().map(|s| (s.x, s.y)).unzip();
        Self::new(x, y)
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`; provided alongside [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.x.iter().zip(&self.y).map(|(&x, &y)| Sample { x, y })
    }
}

impl TryFrom<Vec<Sample>> for Dataset {
    type Error = DatasetError;

    fn try_from(samples: Vec<Sample>) -> Result<Self, Self::Error> {
        Self::from_samples(samples)
    }
}

impl From<Dataset> for Vec<Sample> {
    fn from(dataset: Dataset) -> Self {
        dataset.samples().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_come_back_in_order() {
        let dataset = Dataset::new(vec![0.1, 0.2, 0.3], vec![1.0, 2.0, 3.0]).expect("valid");
        let samples: Vec<_> = dataset.samples().collect();

        assert_eq!(dataset.len(), 3);
        assert_eq!(samples[1], Sample { x: 0.2, y: 2.0 });
        assert_eq!(Dataset::from_samples(samples).expect("valid"), dataset);
    }

    #[test]
    fn rejects_mismatched_columns() {
        assert_eq!(
            Dataset::new(vec![0.1, 0.2], vec![1.0]),
            Err(DatasetError::LengthMismatch { x: 2, y: 1 })
        );
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        assert_eq!(Dataset::new(vec![], vec![]), Err(DatasetError::Empty));
        assert_eq!(
            Dataset::new(vec![0.1, 0.2], vec![1.0, f64::NAN]),
            Err(DatasetError::NonFinite { index: 1 })
        );
    }
}
