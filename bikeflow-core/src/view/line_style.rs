use serde::{Deserialize, Serialize};

/// how trip lines are drawn. the line weight grows with the cube root of
/// the link's ride total so that busy links stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub color: String,
    pub opacity: f64,
    /// lower bound on the weight of any drawn line
    pub min_weight: f64,
    pub scale: f64,
    pub exponent: f64,
    /// size of the arrow head drawn at the end station
    pub arrow_pixel_size: u32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: String::from("#CE0099"),
            opacity: 0.6,
            min_weight: 2.0,
            scale: 2.0,
            exponent: 1.0 / 3.0,
            arrow_pixel_size: 8,
        }
    }
}

impl LineStyle {
    /// weight = max(min_weight, scale * total ^ exponent)
    pub fn weight(&self, total: u64) -> f64 {
        let scaled = self.scale * (total as f64).powf(self.exponent);
        self.min_weight.max(scaled)
    }
}
