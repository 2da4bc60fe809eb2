// Classifier seam
// The model itself lives behind this trait; the pipeline only sees a
// (category, probability) pair per clip, or nothing when inference fails.

use crate::category::Category;
use crate::frame::Frame;

/// One classifier verdict for one clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub category: Category,
    /// Softmax probability of the winning class, in [0, 1].
    pub probability: f64,
}

impl Classification {
    pub fn new(category: Category, probability: f64) -> Self {
        Self {
            category,
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

/// External clip classifier. `clip` always holds exactly the configured
/// frames_per_clip frames, in capture order. `None` means inference failed
/// for this clip; the caller skips routing but keeps evaluating.
pub trait Classifier {
    fn classify(&mut self, clip: &[Frame]) -> Option<Classification>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_clamped() {
        assert_eq!(Classification::new(Category::Fighting, 1.7).probability, 1.0);
        assert_eq!(Classification::new(Category::Fighting, -0.2).probability, 0.0);
    }
}
