use mate_core::Vec3;
use mate_nav::{NavGrid, Navigator};

fn walled_grid() -> NavGrid {
    let mut grid = NavGrid::new(5, 5, 1.0);
    // Wall along x = 2 with a single gap at z = 2.
    for z in 0..5 {
        if z == 2 {
            continue;
        }
        grid.set_blocked(2, z, true);
    }
    grid
}

#[test]
fn grid_finds_path_around_blockers() {
    let grid = walled_grid();
    let start = Vec3::new(0.5, 0.0, 0.5);
    let goal = Vec3::new(4.5, 0.0, 4.5);
    let path = grid.find_path(start, goal).expect("path should exist");

    assert_eq!(path.points.first().copied(), Some(start));
    assert_eq!(path.points.last().copied(), Some(goal));
    assert!(path.points.iter().all(|p| grid.is_walkable(*p)));
    assert!(path.length() > start.distance(goal));
}

#[test]
fn grid_is_deterministic_for_same_input() {
    let grid = walled_grid();
    let start = Vec3::new(0.5, 0.0, 0.5);
    let goal = Vec3::new(4.5, 0.0, 4.5);

    let a = grid.find_path(start, goal).expect("path should exist");
    let b = grid.find_path(start, goal).expect("path should exist");
    assert_eq!(a.points, b.points);
}

#[test]
fn grid_rejects_blocked_or_out_of_bounds_goals() {
    let mut grid = walled_grid();
    grid.set_blocked(2, 2, true);

    let start = Vec3::new(0.5, 0.0, 0.5);
    assert!(grid.find_path(start, Vec3::new(4.5, 0.0, 4.5)).is_none());
    assert!(grid.find_path(start, Vec3::new(2.5, 0.0, 0.5)).is_none());
    assert!(grid.find_path(start, Vec3::new(-3.0, 0.0, 0.5)).is_none());
}

#[test]
fn grid_origin_shifts_cells() {
    let mut grid = NavGrid::with_origin(10, 10, 1.0, Vec3::new(-5.0, 0.0, -5.0));
    grid.set_blocked_at(Vec3::new(-4.5, 0.0, -4.5), true);

    assert!(grid.is_blocked(0, 0));
    assert!(!grid.is_walkable(Vec3::new(-4.5, 0.0, -4.5)));
    assert!(grid.is_walkable(Vec3::new(4.5, 0.0, 4.5)));
    assert!(!grid.is_walkable(Vec3::new(5.5, 0.0, 0.0)));
}

#[test]
fn path_points_keep_start_elevation() {
    let grid = walled_grid();
    let start = Vec3::new(0.5, 1.5, 0.5);
    let goal = Vec3::new(4.5, 1.5, 4.5);
    let path = grid.find_path(start, goal).expect("path should exist");
    assert!(path.points.iter().all(|p| (p.y - 1.5).abs() < 1e-6));
}

#[test]
fn open_grid_paths_cut_diagonally() {
    let grid = NavGrid::new(6, 6, 1.0);
    let start = Vec3::new(0.5, 0.0, 0.5);
    let goal = Vec3::new(5.5, 0.0, 5.5);
    let path = grid.find_path(start, goal).expect("path should exist");

    // One cell per diagonal step, no staircase.
    assert_eq!(path.points.len(), 6);
    assert!((path.length() - start.distance(goal)).abs() < 1e-4);
}

#[test]
fn diagonal_steps_never_clip_a_blocked_corner() {
    let mut grid = NavGrid::new(3, 3, 1.0);
    grid.set_blocked(1, 0, true);
    let start = Vec3::new(0.5, 0.0, 0.5);
    let goal = Vec3::new(1.5, 0.0, 1.5);
    let path = grid.find_path(start, goal).expect("path should exist");

    assert_eq!(
        path.points,
        vec![start, Vec3::new(0.5, 0.0, 1.5), goal],
        "detours through the free side cell"
    );
}
