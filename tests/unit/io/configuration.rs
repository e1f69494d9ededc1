//! Tests for relationships between configuration constants

#[cfg(test)]
mod tests {
    use tilecity::io::configuration::{
        BLANK_SYMBOL, CELL_PIXELS, DEFAULT_LOT_RESOLUTION, DEFAULT_MAX_AREA, DEFAULT_MIN_ROOM_SIZE,
        DEFAULT_SPLIT_CHANCE, MAX_LOT_RESOLUTION, MAX_SOCKET_COUNT, MIN_SOCKET_COUNT, ROTATIONS,
        ROTATION_STEP_DEGREES, STOP_SENTINEL,
    };

    // Tests the rotation step closes a full turn
    // Verified by setting the step to 45 degrees
    #[test]
    fn test_rotations_cover_full_turn() {
        assert_eq!(ROTATIONS as u16 * ROTATION_STEP_DEGREES, 360);
    }

    // Tests the stop roll can actually hit the sentinel
    // Verified by setting the sentinel above the split chance
    #[test]
    fn test_stop_sentinel_reachable() {
        assert!((0..DEFAULT_SPLIT_CHANCE).contains(&STOP_SENTINEL));
    }

    // Tests the house defaults allow at least one split of a stoppable room
    // Verified by raising the minimum room size above the max area
    #[test]
    fn test_house_defaults_consistent() {
        assert!(DEFAULT_MIN_ROOM_SIZE * DEFAULT_MIN_ROOM_SIZE < DEFAULT_MAX_AREA);
    }

    // Tests map and house previews share a scale by default
    // Verified by changing the cell pixel size alone
    #[test]
    fn test_preview_scale_matches_lot_resolution() {
        assert_eq!(CELL_PIXELS as usize, DEFAULT_LOT_RESOLUTION);
        assert!(DEFAULT_LOT_RESOLUTION <= MAX_LOT_RESOLUTION);
    }

    #[test]
    fn test_socket_limits() {
        assert!(MIN_SOCKET_COUNT >= 1 && MIN_SOCKET_COUNT <= MAX_SOCKET_COUNT);
        assert_eq!(BLANK_SYMBOL, 'a');
    }
}
