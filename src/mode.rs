//! Angular measurement selector for trig functions.

/// Selects how `sin`/`cos`/`tan`/`asin`/`acos`/`atan`/`atan2` interpret and
/// report angles. Propagates only into those wrappers and into `diff`/`sum`'s
/// recursive evaluation; otherwise inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Radians = 0,
    Degrees = 1,
}

impl Mode {
    /// Multiplier applied to a trig argument before calling the `f64` math function.
    pub fn to_radians_factor(self) -> f64 {
        match self {
            Mode::Radians => 1.0,
            Mode::Degrees => std::f64::consts::PI / 180.0,
        }
    }

    /// Multiplier applied to an inverse-trig result before returning it to the caller.
    pub fn from_radians_factor(self) -> f64 {
        match self {
            Mode::Radians => 1.0,
            Mode::Degrees => 180.0 / std::f64::consts::PI,
        }
    }
}
