//! Tests for TOML catalog parsing, loading and registry conversion

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tilecity::GenerationError;
    use tilecity::io::catalog::CatalogFile;

    const CATALOG: &str = r#"
socket_count = 3
columns = 6
border = "empty"

[[tiles]]
name = "empty"
sockets = { up = "aaa", right = "aaa", down = "aaa", left = "aaa" }

[[tiles]]
name = "straight"
prefab = "road_straight"
weight = 2.5
sockets = { up = "aba", right = "aaa", down = "aba", left = "aaa" }
"#;

    // Tests every field is read and defaults fill the gaps
    // Verified by defaulting the weight to zero
    #[test]
    fn test_parse_catalog() {
        let catalog = CatalogFile::parse(CATALOG, Path::new("inline")).expect("valid catalog");
        assert_eq!(catalog.socket_count, 3);
        assert_eq!(catalog.columns, Some(6));
        assert_eq!(catalog.seed, None);
        assert_eq!(catalog.border.as_deref(), Some("empty"));

        let definitions = catalog.definitions();
        assert_eq!(definitions.len(), 2);
        assert!((definitions[0].weight - 1.0).abs() < f64::EPSILON);
        assert_eq!(definitions[0].prefab.0, "empty");
        assert_eq!(definitions[1].prefab.0, "road_straight");
        assert!((definitions[1].weight - 2.5).abs() < f64::EPSILON);
    }

    // Tests conversion expands rotations and honours the symmetric flag
    // Verified by ignoring keep_symmetric_rotations
    #[test]
    fn test_into_registry() {
        let catalog = CatalogFile::parse(CATALOG, Path::new("inline")).expect("valid catalog");
        let registry = catalog.clone().into_registry(false).expect("valid registry");
        assert_eq!(registry.variant_count(), 3);
        let full = catalog.into_registry(true).expect("valid registry");
        assert_eq!(full.variant_count(), 8);
    }

    // Tests invalid TOML and unknown keys are parse errors
    // Verified by dropping deny_unknown_fields
    #[test]
    fn test_parse_errors() {
        let broken = CatalogFile::parse("socket_count = ", Path::new("broken.toml"));
        assert!(matches!(broken, Err(GenerationError::CatalogParse { .. })));

        let typo = CatalogFile::parse(
            "socket_count = 1\n[[tiles]]\nname = \"x\"\nwieght = 2.0\nsockets = { up = \"a\", right = \"a\", down = \"a\", left = \"a\" }\n",
            Path::new("typo.toml"),
        );
        assert!(typo.is_err());
    }

    // Tests a structurally valid file with bad sockets fails at registry build
    // Verified by skipping validation in into_registry
    #[test]
    fn test_malformed_sockets_fail_registry() {
        let text = CATALOG.replace("right = \"aaa\", down = \"aba\"", "right = \"aa\", down = \"aba\"");
        let catalog = CatalogFile::parse(&text, Path::new("inline")).expect("valid toml");
        assert!(matches!(
            catalog.into_registry(false),
            Err(GenerationError::MalformedCatalog { tile, .. }) if tile == "straight"
        ));
    }

    // Tests loading from disk and the missing-file error
    // Verified by parsing the path instead of the file contents
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("roads.toml");
        fs::write(&path, CATALOG).expect("write catalog");

        let catalog = CatalogFile::load(&path).expect("valid catalog");
        assert_eq!(catalog.tiles.len(), 2);

        let missing = CatalogFile::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(GenerationError::CatalogLoad { .. })));
    }

    // Tests the bundled sample catalog loads and never lacks a fitting tile
    // Verified by removing the dead end tile from the sample
    #[test]
    fn test_sample_catalog() {
        let catalog = CatalogFile::load(Path::new("data/roads.toml")).expect("sample catalog");
        assert_eq!(catalog.border.as_deref(), Some("empty"));
        let registry = catalog.into_registry(false).expect("valid registry");
        // 16 combinations of road and blank edges
        assert_eq!(registry.variant_count(), 16);
    }
}
