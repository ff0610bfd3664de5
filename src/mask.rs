// Soft-edged circular mask used for every permanent reveal.
// Visual: a solid core out to 40% of the radius, then a fade that reaches
// fully transparent at the rim.

/// One colour stop of the radial gradient: `offset` in [0,1] of the radius, `alpha` in [0,1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub alpha: f32,
}

pub const DEFAULT_STOPS: [GradientStop; 5] = [
    GradientStop { offset: 0.0, alpha: 1.0 },
    GradientStop { offset: 0.4, alpha: 1.0 },
    GradientStop { offset: 0.7, alpha: 0.8 },
    GradientStop { offset: 0.9, alpha: 0.3 },
    GradientStop { offset: 1.0, alpha: 0.0 },
];

/// Piecewise-linear alpha ramp from the circle's centre (t = 0) to its rim (t = 1).
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    stops: Vec<GradientStop>, // sorted by offset
}

impl Default for RadialGradient {
    fn default() -> Self {
        Self { stops: DEFAULT_STOPS.to_vec() }
    }
}

impl RadialGradient {
    /// Build from stops; they get sorted by offset. An empty list gives an invisible mask.
    pub fn new(mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self { stops }
    }

    /// Alpha at normalized distance `t` (distance / radius).
    /// Outside the circle (t > 1) nothing is drawn.
    pub fn alpha_at(&self, t: f32) -> f32 {
        if !(0.0..=1.0).contains(&t) || self.stops.is_empty() {
            return 0.0;
        }
        let first = self.stops[0];
        if t <= first.offset {
            return first.alpha;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= 0.0 {
                    return b.alpha;
                }
                let k = (t - a.offset) / span;
                return a.alpha + (b.alpha - a.alpha) * k;
            }
        }
        self.stops[self.stops.len() - 1].alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_core_then_fade() {
        let g = RadialGradient::default();
        assert_eq!(g.alpha_at(0.0), 1.0);
        assert_eq!(g.alpha_at(0.4), 1.0);
        assert!((g.alpha_at(0.55) - 0.9).abs() < 1e-5);
        assert!((g.alpha_at(0.8) - 0.55).abs() < 1e-5);
        assert_eq!(g.alpha_at(1.0), 0.0);
        assert_eq!(g.alpha_at(1.01), 0.0);
    }

    #[test]
    fn fade_never_rises_towards_the_rim() {
        let g = RadialGradient::default();
        let samples: Vec<f32> = (0..=100).map(|i| g.alpha_at(i as f32 / 100.0)).collect();
        assert!(samples.windows(2).all(|w| w[1] <= w[0] + 1e-6));
    }

    #[test]
    fn unsorted_stops_are_sorted() {
        let g = RadialGradient::new(vec![
            GradientStop { offset: 1.0, alpha: 0.0 },
            GradientStop { offset: 0.0, alpha: 1.0 },
        ]);
        assert!((g.alpha_at(0.25) - 0.75).abs() < 1e-5);
    }

    #[test]
    fn empty_gradient_draws_nothing() {
        assert_eq!(RadialGradient::new(Vec::new()).alpha_at(0.5), 0.0);
    }
}
