//! Human-readable level summaries.

use std::fmt::Write;

use promethean::{Level, LevelConfig};

pub fn summary(config: &LevelConfig, seed: u64, level: &Level) -> String {
    let stats = level.statistics();
    let mut out = String::new();
    let _ = writeln!(out, "Seed: {seed}");
    let _ = writeln!(out, "Size: {}x{}", level.width(), level.height());
    let _ = writeln!(out, "Initialized: {}", stats.is_valid());
    let _ = writeln!(out, "Rooms: {} of {} requested", stats.rooms_count(), config.number_of_rooms);
    let _ = writeln!(out, "Corridors: {}", stats.corridors_count());
    let _ = writeln!(out, "All rooms connected: {}", stats.all_corridors());
    let centers: Vec<String> = stats.room_centers().iter().map(ToString::to_string).collect();
    let _ = writeln!(out, "Room centers: {}", centers.join(" "));
    let _ = write!(out, "Fingerprint: {:#018x}", level.fingerprint());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use promethean::generate_level;

    #[test]
    fn summary_lists_the_headline_statistics() {
        let config = LevelConfig { number_of_rooms: 3, ..LevelConfig::default() };
        let level = generate_level(&config, 8);
        let text = summary(&config, 8, &level);
        assert!(text.starts_with("Seed: 8\nSize: 64x64\nInitialized: true\n"));
        let rooms_line = format!("Rooms: {} of 3 requested", level.statistics().rooms_count());
        assert!(text.contains(&rooms_line));
        assert!(text.contains("Fingerprint: 0x"));
    }
}
