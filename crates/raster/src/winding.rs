//! Fill rules: how a running winding count decides interior-ness.

/// Which accumulated winding counts are considered "inside" the path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    /// True if `winding` should be treated as filled under this rule.
    #[must_use]
    pub fn should_fill(self, winding: i32) -> bool {
        match self {
            Self::NonZero => winding != 0,
            Self::EvenOdd => winding % 2 != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_fills_any_nonzero_winding() {
        assert!(FillRule::NonZero.should_fill(1));
        assert!(FillRule::NonZero.should_fill(-3));
        assert!(!FillRule::NonZero.should_fill(0));
    }

    #[test]
    fn even_odd_fills_odd_winding_only() {
        assert!(FillRule::EvenOdd.should_fill(1));
        assert!(!FillRule::EvenOdd.should_fill(2));
        assert!(FillRule::EvenOdd.should_fill(-1));
    }
}
