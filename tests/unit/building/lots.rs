//! Tests for lot detection and lot cluster derivation from a map

#[cfg(test)]
mod tests {
    use tilecity::algorithm::executor::{SolverConfig, WfcSolver};
    use tilecity::building::bounds::GridPos;
    use tilecity::building::cluster::{ClusterId, EntityId};
    use tilecity::building::lots::{build_lot_clusters, is_lot, lot_entity};
    use tilecity::spatial::grid::Grid;
    use tilecity::spatial::sockets::Sockets;
    use tilecity::spatial::tiles::{TileDefinition, TileInstance, TileRegistry, TileVariant};

    fn tile(sockets: Sockets) -> TileInstance {
        let definition = TileDefinition::new("t", sockets);
        TileInstance::from_variant(0, &TileVariant::base(0, &definition))
    }

    fn lot() -> TileInstance {
        tile(Sockets::blank(3))
    }

    fn road() -> TileInstance {
        tile(Sockets::new("aba", "aba", "aba", "aba"))
    }

    // Tests only tiles with four blank edges are lots
    // Verified by checking only the up edge
    #[test]
    fn test_is_lot() {
        assert!(is_lot(&lot()));
        assert!(!is_lot(&road()));
        assert!(!is_lot(&tile(Sockets::new("aaa", "aaa", "aaa", "aba"))));
    }

    // Tests a map of lots merges into one cluster covering every sub-cell
    // Verified by skipping the contacts from the lot below
    #[test]
    fn test_all_lots_merge_into_one_cluster() {
        let registry = TileRegistry::new(
            vec![TileDefinition::new("empty", Sockets::blank(3))],
            3,
        )
        .expect("valid catalog");
        let mut solver = WfcSolver::new(registry, 3, SolverConfig::default()).expect("valid");
        solver.solve().expect("solve");

        let clusters = build_lot_clusters(solver.grid(), 3).expect("valid resolution");
        assert_eq!(clusters.len(), 1);
        let cluster = clusters.clusters().next().expect("one cluster");
        assert_eq!(cluster.len(), 81);
        assert_eq!((cluster.bounds().min_x, cluster.bounds().min_y), (0, 0));
        assert_eq!((cluster.bounds().width(), cluster.bounds().height()), (9, 9));
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(
                    clusters.cluster_of(lot_entity(3, row, col)).expect("lot"),
                    cluster.id()
                );
            }
        }
    }

    // Tests lots separated by roads or touching only at corners stay apart
    // Verified by also contacting diagonal neighbours
    #[test]
    fn test_separated_lots_stay_apart() {
        let mut grid = Grid::square(2, 1).expect("valid dimensions");
        grid.cell_mut(0, 0).collapse(lot());
        grid.cell_mut(0, 1).collapse(road());
        grid.cell_mut(1, 0).collapse(road());
        grid.cell_mut(1, 1).collapse(lot());

        let clusters = build_lot_clusters(&grid, 2).expect("valid resolution");
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.cluster_of(EntityId(0)).expect("lot"), ClusterId(0));
        assert_eq!(clusters.cluster_of(EntityId(3)).expect("lot"), ClusterId(1));
        assert!(clusters.cluster_of(EntityId(1)).is_err());

        let second = clusters.cluster(ClusterId(1)).expect("live");
        assert_eq!(second.len(), 4);
        assert!(second.bounds().contains_point(GridPos::new(2, 2)));
        assert!(second.bounds().contains_point(GridPos::new(3, 3)));
    }

    // Tests open and dead cells never become lots
    // Verified by treating open cells as blank tiles
    #[test]
    fn test_open_cells_are_not_lots() {
        let mut grid = Grid::new(1, 3, 2).expect("valid dimensions");
        grid.cell_mut(0, 0).collapse(lot());
        let clusters = build_lot_clusters(&grid, 1).expect("valid resolution");
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters.clusters().map(|c| c.len()).sum::<usize>(), 1);
    }

    // Tests a zero resolution is rejected
    // Verified by removing the resolution check
    #[test]
    fn test_resolution_bounds() {
        let grid = Grid::square(1, 1).expect("valid dimensions");
        assert!(build_lot_clusters(&grid, 0).is_err());
        assert!(build_lot_clusters(&grid, 17).is_err());
        assert!(build_lot_clusters(&grid, 16).expect("valid").is_empty());
    }
}
