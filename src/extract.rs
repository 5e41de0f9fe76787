//! Elastic state vectors and the scalar components extracted from them.

use std::fmt;

use smallvec::SmallVec;

use crate::{Result, SeismoError};

/// Spatial dimensionality of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dims {
    Two,
    Three,
}

impl Dims {
    pub fn count(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Length of the elastic state vector: velocities followed by the
    /// independent stress tensor components.
    pub fn state_len(self) -> usize {
        let d = self.count();
        (d + 1) * (d + 2) / 2 - 1
    }
}

impl TryFrom<u8> for Dims {
    type Error = SeismoError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(SeismoError::InvalidDims(other)),
        }
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-D", self.count())
    }
}

/// Instantaneous physical state at one receiver.
///
/// Layout: `vx, vy[, vz]`, then the normal stresses, then the shear stresses.
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticState {
    dims: Dims,
    values: SmallVec<[f32; 9]>,
}

impl ElasticState {
    pub fn new(dims: Dims, values: &[f32]) -> Result<Self> {
        if values.len() != dims.state_len() {
            return Err(SeismoError::StateLength {
                expected: dims.state_len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            dims,
            values: SmallVec::from_slice(values),
        })
    }

    pub fn zeroed(dims: Dims) -> Self {
        Self {
            dims,
            values: SmallVec::from_elem(0.0, dims.state_len()),
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }
}

/// Scalar selected out of an [`ElasticState`] for one seismogram component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Vx,
    Vy,
    /// Only defined for 3-D data.
    Vz,
    /// Negative mean of the normal stresses.
    Pressure,
}

impl Component {
    pub fn is_available(self, dims: Dims) -> bool {
        !matches!((self, dims), (Self::Vz, Dims::Two))
    }

    pub fn extract(self, state: &ElasticState) -> f32 {
        let v = state.values();
        match self {
            Self::Vx => v[0],
            Self::Vy => v[1],
            Self::Vz => v[2],
            Self::Pressure => {
                let d = state.dims().count();
                let normal: f32 = v[d..2 * d].iter().sum();
                -normal / d as f32
            }
        }
    }

    /// Velocity components in axis order for the given dimensionality.
    pub fn velocities(dims: Dims) -> &'static [Component] {
        match dims {
            Dims::Two => &[Self::Vx, Self::Vy],
            Dims::Three => &[Self::Vx, Self::Vy, Self::Vz],
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vx => write!(f, "Vx"),
            Self::Vy => write!(f, "Vy"),
            Self::Vz => write!(f, "Vz"),
            Self::Pressure => write!(f, "Pressure"),
        }
    }
}
