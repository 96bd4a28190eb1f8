use promethean::{LevelConfig, ShapeKind, TileKind, generate_level};

fn small_config() -> LevelConfig {
    LevelConfig {
        level_height: 20,
        level_width: 20,
        min_room_width: 3,
        max_room_width: 5,
        min_room_height: 3,
        max_room_height: 5,
        number_of_rooms: 5,
        border: 1,
        room_border: 1,
        overlap_rooms: false,
        ..LevelConfig::default()
    }
}

#[test]
fn small_level_places_rooms_and_mostly_connects_them() {
    let config = small_config();
    let mut connected_seeds = 0;
    for seed in 0..40 {
        let level = generate_level(&config, seed);
        let stats = level.statistics();
        assert!(stats.is_valid(), "seed {seed} failed to initialize");
        assert!((1..=5).contains(&stats.rooms_count()), "seed {seed}: {}", stats.rooms_count());
        assert_eq!(level.tile_codes().len(), 400);
        assert_eq!(stats.room_centers().len(), stats.rooms_count());
        if stats.all_corridors() {
            connected_seeds += 1;
            assert!(stats.corridors_count() + 1 >= stats.rooms_count());
        }
    }
    assert!(connected_seeds >= 30, "only {connected_seeds} of 40 seeds connected every room");
}

#[test]
fn zero_rooms_yield_an_empty_but_valid_level() {
    let config = LevelConfig { number_of_rooms: 0, ..small_config() };
    let level = generate_level(&config, 5);
    let stats = level.statistics();
    assert!(stats.is_valid());
    assert_eq!(stats.rooms_count(), 0);
    assert_eq!(stats.corridors_count(), 0);
    assert!(stats.all_corridors());
    assert!(stats.room_centers_flat().is_empty());
}

#[test]
fn cross_rooms_with_an_even_width_range_fall_back_to_odd_sizes() {
    let config = LevelConfig {
        min_room_width: 4,
        max_room_width: 4,
        min_room_height: 4,
        max_room_height: 4,
        ..small_config()
    }
    .with_only_shape(ShapeKind::Cross);
    for seed in 0..10 {
        let level = generate_level(&config, seed);
        assert!(level.statistics().is_valid());
        for room in level.rooms() {
            assert_eq!(room.shape(), ShapeKind::Cross);
            assert_eq!((room.bounds().width, room.bounds().height), (3, 3));
        }
    }
}

#[test]
fn invalid_config_reports_uninitialized_statistics() {
    let config = LevelConfig { border: 10, ..small_config() };
    let level = generate_level(&config, 1);
    assert!(!level.statistics().is_valid());
    assert_eq!(level.size(0), Some(20));
    assert_eq!(level.size(1), Some(20));
    assert!(level.tiles().iter().all(|&tile| tile == TileKind::Empty));
}

#[test]
fn tile_codes_decode_back_to_the_grid() {
    let level = generate_level(&small_config(), 11);
    let decoded: Vec<Option<TileKind>> =
        level.tile_codes().into_iter().map(TileKind::from_code).collect();
    let expected: Vec<Option<TileKind>> = level.tiles().iter().copied().map(Some).collect();
    assert_eq!(decoded, expected);
    assert!(level.tile_codes().iter().all(|&code| code <= 3));
}

#[test]
fn border_ring_is_always_stamped() {
    let level = generate_level(&small_config(), 3);
    let rendered = level.to_string();
    let rows: Vec<&str> = rendered.lines().collect();
    assert_eq!(rows.len(), 20);
    assert!(rows[0].chars().all(|glyph| glyph == '#'));
    assert!(rows[19].chars().all(|glyph| glyph == '#'));
    assert!(rows.iter().all(|row| row.starts_with('#') && row.ends_with('#')));
}
