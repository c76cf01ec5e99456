use mate_core::Vec3;
use mate_perception::Direction;

#[test]
fn sector_edges_belong_to_the_clockwise_sector() {
    let cases = [
        (0.0, Direction::Ahead),
        (22.5, Direction::Ahead),
        (22.5001, Direction::AheadRight),
        (-22.5, Direction::AheadLeft),
        (-22.4999, Direction::Ahead),
        (67.5, Direction::AheadRight),
        (112.5, Direction::Right),
        (157.5, Direction::BehindRight),
        (157.5001, Direction::Behind),
        (180.0, Direction::Behind),
        (-180.0, Direction::Behind),
        (-157.5, Direction::Behind),
        (-157.4999, Direction::BehindLeft),
        (-112.5, Direction::BehindLeft),
        (-67.5, Direction::Left),
        (-90.0, Direction::Left),
        (90.0, Direction::Right),
    ];
    for (degrees, expected) in cases {
        assert_eq!(Direction::from_bearing(degrees), expected, "bearing {degrees}");
    }
}

#[test]
fn minus_twenty_two_and_a_half_from_geometry_is_ahead_left() {
    let angle = (-22.5f32).to_radians();
    let target = Vec3::new(angle.sin() * 10.0, 0.0, angle.cos() * 10.0);
    assert_eq!(Direction::classify(Vec3::ZERO, 0.0, target), Direction::AheadLeft);
}

#[test]
fn classification_is_relative_to_facing() {
    let facing_east = 90f32.to_radians();
    let north = Vec3::new(0.0, 0.0, 5.0);
    let east = Vec3::new(5.0, 0.0, 0.0);
    let west = Vec3::new(-5.0, 0.0, 0.0);

    assert_eq!(Direction::classify(Vec3::ZERO, facing_east, north), Direction::Left);
    assert_eq!(Direction::classify(Vec3::ZERO, facing_east, east), Direction::Ahead);
    assert_eq!(Direction::classify(Vec3::ZERO, facing_east, west), Direction::Behind);
}

#[test]
fn vertical_offset_is_ignored() {
    let above = Vec3::new(0.0, 4.0, 0.0);
    assert_eq!(Direction::classify(Vec3::ZERO, 1.0, above), Direction::Ahead);

    let raised_right = Vec3::new(3.0, 10.0, 0.0);
    assert_eq!(Direction::classify(Vec3::ZERO, 0.0, raised_right), Direction::Right);
}

#[test]
fn every_bearing_maps_to_exactly_one_sector() {
    let mut counts = [0usize; 8];
    for tenth in -1800..=1800 {
        let direction = Direction::from_bearing(tenth as f32 / 10.0);
        let index = Direction::ALL
            .iter()
            .position(|d| *d == direction)
            .expect("known direction");
        counts[index] += 1;
    }
    // 45° per sector at 0.1° resolution; behind also owns both ±180 samples.
    assert_eq!(counts[4], 451);
    for (i, count) in counts.iter().enumerate() {
        if i != 4 {
            assert_eq!(*count, 450, "sector {i}");
        }
    }
}

#[test]
fn labels_parse_with_aliases() {
    assert_eq!(Direction::from_label("behind_left"), Some(Direction::BehindLeft));
    assert_eq!(Direction::from_label("Forward"), Some(Direction::Ahead));
    assert_eq!(Direction::from_label("back"), Some(Direction::Behind));
    assert_eq!(Direction::from_label("up"), None);
}
