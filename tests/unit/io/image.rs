//! Tests for map and house preview rendering and export

#[cfg(test)]
mod tests {
    use std::path::Path;

    use image::Rgba;
    use tilecity::GenerationError;
    use tilecity::building::bounds::GridPos;
    use tilecity::building::cluster::{EntityId, OccupantId};
    use tilecity::building::partition::PartitionConfig;
    use tilecity::building::registry::ClusterRegistry;
    use tilecity::io::configuration::CELL_PIXELS;
    use tilecity::io::image::{
        export_houses_png, export_map_png, houses_path, render_houses, render_map,
    };
    use tilecity::math::random::RandomSource;
    use tilecity::spatial::grid::Grid;
    use tilecity::spatial::sockets::Sockets;
    use tilecity::spatial::tiles::{TileDefinition, TileInstance, TileVariant};

    fn tile(sockets: Sockets) -> TileInstance {
        let definition = TileDefinition::new("t", sockets);
        TileInstance::from_variant(0, &TileVariant::base(0, &definition))
    }

    fn partitioned_registry() -> ClusterRegistry {
        let mut registry = ClusterRegistry::new();
        registry.register(EntityId(0), GridPos::new(0, 0));
        let mut occupant = 0;
        for y in 0..6 {
            for x in 0..6 {
                registry
                    .contact(EntityId(0), OccupantId(occupant), EntityId(0), GridPos::new(x, y))
                    .expect("known");
                occupant += 1;
            }
        }
        registry
            .generate_houses(&PartitionConfig::default(), &mut RandomSource::new(2))
            .expect("valid config");
        registry
    }

    // Tests the house preview sits next to the map preview
    // Verified by appending the suffix after the extension
    #[test]
    fn test_houses_path() {
        assert_eq!(
            houses_path(Path::new("out/city.png")),
            Path::new("out/city_houses.png")
        );
        assert_eq!(houses_path(Path::new("map")), Path::new("map_houses.png"));
    }

    // Tests the map preview size, road stubs and open cells
    // Verified by drawing road stubs on blank edges
    #[test]
    fn test_render_map() {
        let mut grid = Grid::new(1, 2, 1).expect("valid dimensions");
        grid.cell_mut(0, 0)
            .collapse(tile(Sockets::new("aba", "aaa", "aaa", "aaa")));
        let img = render_map(&grid);
        assert_eq!(img.dimensions(), (2 * CELL_PIXELS, CELL_PIXELS));

        let mid = CELL_PIXELS / 2;
        let up_stub = *img.get_pixel(mid, 0);
        let down_edge = *img.get_pixel(mid, CELL_PIXELS - 1);
        assert_ne!(up_stub, down_edge);
        assert_eq!(*img.get_pixel(CELL_PIXELS, 0), Rgba([0, 0, 0, 0]));
    }

    // Tests houses render inside the partitioned area only
    // Verified by sizing the preview from the first house alone
    #[test]
    fn test_render_houses() {
        assert!(render_houses(&ClusterRegistry::new()).is_none());

        let img = render_houses(&partitioned_registry()).expect("houses");
        assert_eq!(img.dimensions(), (6, 6));
        assert!(img.pixels().all(|p| p.0[3] == 255));
    }

    // Tests both previews are written and nested directories created
    // Verified by skipping create_dir_all
    #[test]
    fn test_export_png() {
        let dir = tempfile::tempdir().expect("temp dir");
        let map_path = dir.path().join("nested").join("map.png");
        let grid = Grid::square(3, 1).expect("valid dimensions");
        export_map_png(&grid, &map_path).expect("export map");
        assert!(map_path.exists());

        let house_path = houses_path(&map_path);
        export_houses_png(&partitioned_registry(), &house_path).expect("export houses");
        let decoded = image::open(&house_path).expect("readable png");
        assert_eq!((decoded.width(), decoded.height()), (6, 6));

        assert!(matches!(
            export_houses_png(&ClusterRegistry::new(), &dir.path().join("none.png")),
            Err(GenerationError::NothingToExport { .. })
        ));
    }
}
