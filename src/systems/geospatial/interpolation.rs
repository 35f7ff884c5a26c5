use tracing::trace;

use crate::{components::geometry::Coordinate2D, error::ProjectError};

/// Subdivides long edges so lines follow the sphere instead of cutting
/// chords through it.
pub struct InterpolationSystem {
    threshold_deg: f64,
    max_passes: usize,
}

impl InterpolationSystem {
    pub fn new(threshold_deg: f64, max_passes: usize) -> Self {
        Self {
            threshold_deg,
            max_passes,
        }
    }

    /// raw differences, no antimeridian wraparound
    pub fn needs_interpolation(&self, p1: &Coordinate2D, p2: &Coordinate2D) -> bool {
        (p1.lon - p2.lon).abs() > self.threshold_deg || (p1.lat - p2.lat).abs() > self.threshold_deg
    }

    /// Returns the path with midpoints spliced between every pair of
    /// consecutive vertices that are too far apart. Original vertices are
    /// kept and never reordered.
    pub fn interpolate(&self, path: &[Coordinate2D]) -> Result<Vec<Coordinate2D>, ProjectError> {
        let mut out = Vec::with_capacity(path.len());
        let Some(first) = path.first() else {
            return Ok(out);
        };
        out.push(*first);

        for pair in path.windows(2) {
            let (p1, p2) = (&pair[0], &pair[1]);
            if self.needs_interpolation(p1, p2) {
                let segment = self.bisect(p1, p2)?;
                trace!(
                    from = ?p1,
                    to = ?p2,
                    inserted = segment.len() - 2,
                    "interpolated edge"
                );
                // p1 is already in `out`
                out.extend_from_slice(&segment[1..]);
            } else {
                out.push(*p2);
            }
        }

        Ok(out)
    }

    // Repeated full passes over the working segment, each one inserting a
    // midpoint into every gap still over the threshold, until a pass adds
    // nothing.
    fn bisect(
        &self,
        p1: &Coordinate2D,
        p2: &Coordinate2D,
    ) -> Result<Vec<Coordinate2D>, ProjectError> {
        let mut working = vec![*p1, *p2];

        for _ in 0..self.max_passes {
            let mut next = Vec::with_capacity(working.len() * 2);
            for pair in working.windows(2) {
                next.push(pair[0]);
                if self.needs_interpolation(&pair[0], &pair[1]) {
                    next.push(pair[0].midpoint(&pair[1]));
                }
            }
            next.push(working[working.len() - 1]);

            if next.len() == working.len() {
                return Ok(working);
            }
            working = next;
        }

        // the last allowed pass may have been the one that settled it
        let settled = working
            .windows(2)
            .all(|pair| !self.needs_interpolation(&pair[0], &pair[1]));
        if settled {
            Ok(working)
        } else {
            Err(ProjectError::InterpolationLimit {
                passes: self.max_passes,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn coords(raw: &[[f64; 2]]) -> Vec<Coordinate2D> {
        raw.iter().copied().map(Coordinate2D::from).collect()
    }

    fn max_gap(path: &[Coordinate2D]) -> f64 {
        path.windows(2)
            .map(|p| (p[0].lon - p[1].lon).abs().max((p[0].lat - p[1].lat).abs()))
            .fold(0.0, f64::max)
    }

    fn system() -> InterpolationSystem {
        InterpolationSystem::new(5.0, 20)
    }

    #[test]
    fn short_edges_untouched() {
        let path = coords(&[[0.0, 0.0], [5.0, 5.0], [9.0, 3.0], [4.5, -1.5]]);
        assert_eq!(system().interpolate(&path).unwrap(), path);
    }

    #[test]
    fn twenty_degree_edge_is_quartered() {
        let path = coords(&[[0.0, 0.0], [20.0, 0.0]]);
        let out = system().interpolate(&path).unwrap();
        assert_eq!(
            out,
            coords(&[[0.0, 0.0], [5.0, 0.0], [10.0, 0.0], [15.0, 0.0], [20.0, 0.0]])
        );
    }

    #[test]
    fn originals_survive_in_order() {
        let path = coords(&[[0.0, 0.0], [30.0, 10.0], [31.0, 11.0], [-40.0, -60.0]]);
        let out = system().interpolate(&path).unwrap();

        let mut cursor = out.iter();
        for original in &path {
            assert!(cursor.any(|c| c == original), "{original:?} missing or out of order");
        }
        assert_eq!(out.first(), path.first());
        assert_eq!(out.last(), path.last());
        assert!(max_gap(&out) <= 5.0);
    }

    #[test]
    fn antimeridian_is_not_wrapped() {
        let path = coords(&[[-179.0, 0.0], [179.0, 0.0]]);
        let out = system().interpolate(&path).unwrap();
        // 358 degrees the long way round
        assert!(out.len() > 64);
        assert!(max_gap(&out) <= 5.0);
    }

    #[test]
    fn empty_and_single() {
        assert!(system().interpolate(&[]).unwrap().is_empty());
        let one = coords(&[[12.0, 34.0]]);
        assert_eq!(system().interpolate(&one).unwrap(), one);
    }

    #[test]
    fn infinite_input_hits_the_pass_limit() {
        let path = coords(&[[0.0, 0.0], [f64::INFINITY, 0.0]]);
        let err = system().interpolate(&path).unwrap_err();
        assert!(matches!(err, ProjectError::InterpolationLimit { passes: 20 }));
    }

    #[test]
    fn tight_pass_limit() {
        // 340 degrees needs 7 halvings to get under 5
        let path = coords(&[[-170.0, 10.0], [170.0, 10.0]]);
        assert!(InterpolationSystem::new(5.0, 6).interpolate(&path).is_err());
        assert!(InterpolationSystem::new(5.0, 7).interpolate(&path).is_ok());
    }
}
