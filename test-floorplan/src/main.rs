// Fixture generator for wall-based room detection
use anyhow::{Context, Result};
use room_detection::{DetectedRoom, DetectionConfig, Point, RoomDetector, WallSegment};
use std::fs;
use tracing::info;

struct Fixture {
    name: &'static str,
    walls: Vec<WallSegment>,
    canvas_width: f64,
    canvas_height: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("🏗️  Wall Layout Room Detection Fixtures");
    println!("=======================================\n");

    let detector = RoomDetector::new(DetectionConfig::default())?;
    fs::create_dir_all("data").context("Failed to create data directory")?;

    let fixtures = vec![
        Fixture {
            name: "single_room",
            walls: create_single_room(),
            canvas_width: 200.0,
            canvas_height: 200.0,
        },
        Fixture {
            name: "figure_eight",
            walls: create_figure_eight(),
            canvas_width: 150.0,
            canvas_height: 150.0,
        },
        Fixture {
            name: "apartment_t_junctions",
            walls: create_apartment_with_t_junctions(),
            canvas_width: 450.0,
            canvas_height: 300.0,
        },
        Fixture {
            name: "duplicated_wall",
            walls: create_duplicated_wall(),
            canvas_width: 200.0,
            canvas_height: 200.0,
        },
        Fixture {
            name: "jittered_corners",
            walls: create_jittered_corners(),
            canvas_width: 2000.0,
            canvas_height: 2000.0,
        },
    ];

    for fixture in &fixtures {
        println!("📋 {}", fixture.name);
        let rooms = detector
            .try_detect(&fixture.walls, fixture.canvas_width, fixture.canvas_height)
            .with_context(|| format!("Detection failed for {}", fixture.name))?;
        save_fixture(fixture, &rooms)?;
    }

    println!("\n✅ All fixtures generated!");

    Ok(())
}

fn wall(id: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> WallSegment {
    WallSegment {
        id: id.to_string(),
        start: Point { x: x1, y: y1 },
        end: Point { x: x2, y: y2 },
    }
}

/// One 100x100 room
fn create_single_room() -> Vec<WallSegment> {
    vec![
        wall("w0", 0.0, 0.0, 100.0, 0.0),
        wall("w1", 100.0, 0.0, 100.0, 100.0),
        wall("w2", 100.0, 100.0, 0.0, 100.0),
        wall("w3", 0.0, 100.0, 0.0, 0.0),
    ]
}

/// Two rooms sharing the wall at x=100
fn create_figure_eight() -> Vec<WallSegment> {
    let mut walls = create_single_room();
    walls.extend([
        wall("w4", 100.0, 0.0, 200.0, 0.0),
        wall("w5", 200.0, 0.0, 200.0, 100.0),
        wall("w6", 200.0, 100.0, 100.0, 100.0),
    ]);
    walls
}

/// Perimeter drawn as long walls, interior walls only touching them
fn create_apartment_with_t_junctions() -> Vec<WallSegment> {
    vec![
        // Perimeter (0,0 to 500,300)
        wall("outer_bottom", 0.0, 0.0, 500.0, 0.0),
        wall("outer_right", 500.0, 0.0, 500.0, 300.0),
        wall("outer_top", 500.0, 300.0, 0.0, 300.0),
        wall("outer_left", 0.0, 300.0, 0.0, 0.0),
        // Living room | bedroom divider
        wall("divider", 300.0, 0.0, 300.0, 300.0),
        // Bathroom carved out of the bedroom's top corner
        wall("bath_bottom", 300.0, 180.0, 500.0, 180.0),
        // Hallway stub, closes nothing
        wall("stub", 100.0, 300.0, 100.0, 220.0),
    ]
}

/// A wall drawn twice must not produce extra rooms
fn create_duplicated_wall() -> Vec<WallSegment> {
    let mut walls = create_single_room();
    walls.push(wall("w0_copy", 0.0, 0.0, 100.0, 0.0));
    walls
}

/// Corners that miss each other by a couple of units
fn create_jittered_corners() -> Vec<WallSegment> {
    vec![
        wall("j0", 0.0, 0.0, 1000.0, 0.0),
        wall("j1", 1002.0, 1.0, 1000.0, 1000.0),
        wall("j2", 999.0, 998.0, 0.0, 1000.0),
        wall("j3", 1.0, 1001.0, 0.0, 0.0),
    ]
}

fn save_fixture(fixture: &Fixture, rooms: &[DetectedRoom]) -> Result<()> {
    let walls_file = format!("data/{}_walls.json", fixture.name);
    let request = serde_json::json!({
        "walls": fixture.walls,
        "canvasWidth": fixture.canvas_width,
        "canvasHeight": fixture.canvas_height,
    });
    fs::write(&walls_file, serde_json::to_string_pretty(&request)?)
        .with_context(|| format!("Failed to write {}", walls_file))?;

    let rooms_file = format!("data/{}_rooms.json", fixture.name);
    fs::write(&rooms_file, serde_json::to_string_pretty(rooms)?)
        .with_context(|| format!("Failed to write {}", rooms_file))?;

    info!(
        "{}: {} walls -> {} rooms",
        fixture.name,
        fixture.walls.len(),
        rooms.len()
    );
    for room in rooms {
        info!(
            "  {} area={:.1} center=({:.1}, {:.1})",
            room.id,
            room.area(),
            room.center.x,
            room.center.y
        );
    }

    println!("   ✅ Saved: {} and {}", walls_file, rooms_file);

    Ok(())
}
