//! Deterministic outward square spiral over the XZ plane.
//!
//! Ring 0 is the single zero offset. Ring `r` is the perimeter of the
//! `(2r + 1) x (2r + 1)` square of cells, visited in raster order: Z rows
//! from negative to positive, X from negative to positive within each row.

/// One candidate cell of the spiral search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralCell {
    /// Ring index, 0 for the seed cell
    pub ring: u32,
    /// X offset in world units
    pub x: f64,
    /// Z offset in world units
    pub z: f64,
}

/// Yields every cell of rings `0..=max_rings`, cells spaced `step` apart
pub fn spiral_offsets(max_rings: u32, step: f64) -> impl Iterator<Item = SpiralCell> {
    (0..=i64::from(max_rings)).flat_map(move |r| {
        (-r..=r).flat_map(move |dz| {
            (-r..=r).filter_map(move |dx| {
                (dx.abs().max(dz.abs()) == r).then(|| SpiralCell {
                    ring: r as u32,
                    x: dx as f64 * step,
                    z: dz as f64 * step,
                })
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_zero_is_seed() {
        let first = spiral_offsets(3, 1.0).next().unwrap();
        assert_eq!(first, SpiralCell { ring: 0, x: 0.0, z: 0.0 });
    }

    #[test]
    fn test_ring_sizes() {
        let cells: Vec<_> = spiral_offsets(3, 1.0).collect();
        // 1 + 8 + 16 + 24
        assert_eq!(cells.len(), 49);
        for r in 1..=3u32 {
            let count = cells.iter().filter(|c| c.ring == r).count();
            assert_eq!(count, 8 * r as usize);
        }
    }

    #[test]
    fn test_raster_order_of_first_ring() {
        let ring: Vec<(f64, f64)> = spiral_offsets(1, 2.0)
            .filter(|c| c.ring == 1)
            .map(|c| (c.x, c.z))
            .collect();
        assert_eq!(
            ring,
            vec![
                (-2.0, -2.0),
                (0.0, -2.0),
                (2.0, -2.0),
                (-2.0, 0.0),
                (2.0, 0.0),
                (-2.0, 2.0),
                (0.0, 2.0),
                (2.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_rings_never_decrease() {
        let rings: Vec<u32> = spiral_offsets(4, 1.0).map(|c| c.ring).collect();
        assert!(rings.windows(2).all(|w| w[0] <= w[1]));
    }
}
