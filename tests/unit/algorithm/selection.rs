//! Tests for least-constrained cell selection and weighted candidate draws

#[cfg(test)]
mod tests {
    use tilecity::algorithm::bitset::TileBitset;
    use tilecity::algorithm::selection::{CellSelection, choose_variant, select_least_constrained};
    use tilecity::math::random::RandomSource;
    use tilecity::spatial::grid::{CellState, Grid};
    use tilecity::spatial::sockets::Sockets;
    use tilecity::spatial::tiles::{TileDefinition, TileInstance, TileRegistry, TileVariant};

    fn set_candidates(grid: &mut Grid, row: usize, col: usize, candidates: &[usize], total: usize) {
        let mut bitset = TileBitset::new(total);
        for &candidate in candidates {
            bitset.insert(candidate);
        }
        grid.cell_mut(row, col).state = CellState::Open(bitset);
    }

    fn weighted_registry(weights: &[f64]) -> TileRegistry {
        let definitions = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                // Distinct asymmetric sockets so no rotation is dropped or shared
                let symbol = char::from(b'b' + i as u8).to_string();
                TileDefinition::new(format!("t{i}"), Sockets::new(symbol, "a", "a", "a"))
                    .with_weight(w)
            })
            .collect();
        TileRegistry::new(definitions, 1).expect("valid catalog")
    }

    // Tests the cell with the fewest candidates is chosen
    // Verified by selecting the maximum instead of the minimum
    #[test]
    fn test_selects_fewest_candidates() {
        let mut grid = Grid::square(3, 4).expect("valid dimensions");
        set_candidates(&mut grid, 2, 1, &[0, 1], 4);
        set_candidates(&mut grid, 1, 2, &[0, 1, 2], 4);
        assert_eq!(
            select_least_constrained(&grid),
            CellSelection::Candidate { row: 2, col: 1 }
        );
    }

    // Tests ties go to the first cell in row-major order
    // Verified by using <= when comparing counts
    #[test]
    fn test_ties_break_row_major() {
        let mut grid = Grid::square(3, 4).expect("valid dimensions");
        set_candidates(&mut grid, 2, 0, &[0], 4);
        set_candidates(&mut grid, 1, 2, &[3], 4);
        assert_eq!(
            select_least_constrained(&grid),
            CellSelection::Candidate { row: 1, col: 2 }
        );
    }

    // Tests an empty open cell is reported as a contradiction
    // Verified by skipping cells with zero candidates
    #[test]
    fn test_empty_cell_is_contradiction() {
        let mut grid = Grid::square(2, 4).expect("valid dimensions");
        set_candidates(&mut grid, 1, 1, &[], 4);
        assert_eq!(
            select_least_constrained(&grid),
            CellSelection::Contradiction { row: 1, col: 1 }
        );
    }

    // Tests a fully collapsed grid is exhausted
    // Verified by treating collapsed cells as zero-candidate cells
    #[test]
    fn test_collapsed_grid_is_exhausted() {
        let mut grid = Grid::square(2, 1).expect("valid dimensions");
        let definition = TileDefinition::new("empty", Sockets::blank(1));
        let variant = TileVariant::base(0, &definition);
        for cell in grid.iter_mut() {
            cell.collapse(TileInstance::from_variant(0, &variant));
        }
        assert_eq!(select_least_constrained(&grid), CellSelection::Exhausted);
    }

    // Tests a single candidate is returned without a draw
    // Verified by always drawing from the random source
    #[test]
    fn test_single_candidate_skips_draw() {
        let registry = weighted_registry(&[1.0, 1.0]);
        let mut candidates = TileBitset::new(registry.variant_count());
        candidates.insert(1);

        let mut random = RandomSource::new(5);
        let mut untouched = RandomSource::new(5);
        assert_eq!(choose_variant(&candidates, &registry, &mut random), Some(1));
        assert_eq!(random.range(0, 1_000_000), untouched.range(0, 1_000_000));

        let empty = TileBitset::new(registry.variant_count());
        assert_eq!(choose_variant(&empty, &registry, &mut random), None);
    }

    // Tests zero-weight candidates lose to any positive weight
    // Verified by treating zero weights as weight 1
    #[test]
    fn test_zero_weight_never_beats_positive() {
        let registry = weighted_registry(&[0.0, 3.0, 0.0]);
        let mut candidates = TileBitset::new(registry.variant_count());
        for base in 0..3 {
            candidates.insert(base);
        }
        let mut random = RandomSource::new(11);
        for _ in 0..200 {
            assert_eq!(choose_variant(&candidates, &registry, &mut random), Some(1));
        }
    }

    // Tests draws only ever return members of the candidate set
    // Verified by returning the raw weight index instead of the candidate
    #[test]
    fn test_draws_stay_within_candidates() {
        let registry = weighted_registry(&[1.0, 2.0, 3.0, 4.0]);
        let mut candidates = TileBitset::new(registry.variant_count());
        candidates.insert(2);
        candidates.insert(3);
        let mut random = RandomSource::new(3);
        for _ in 0..100 {
            let chosen = choose_variant(&candidates, &registry, &mut random);
            assert!(matches!(chosen, Some(2 | 3)));
        }
    }
}
