use ballistics_zero::atmosphere::density_ratio;
use ballistics_zero::constants::GRAVITY_FPS2;
use ballistics_zero::drag::{drag_table, get_drag_coefficient};
use ballistics_zero::{
    find_equivalent_zero, find_zero_angle, simulate, DragModel, Environment, Projectile,
    SightSetup, SimulationSettings,
};

fn primary() -> Projectile {
    Projectile::new("NAS3 175Gr LRX", 175.0, 0.254, DragModel::G7, 2725.0).unwrap()
}

fn sight() -> SightSetup {
    SightSetup::new(1.9 / 12.0, 300.0).unwrap()
}

fn environment() -> Environment {
    Environment::new(60.0, 29.92, 0.0).unwrap()
}

#[test]
fn test_drag_lookup_boundaries() {
    for model in [DragModel::G1, DragModel::G7] {
        let table = drag_table(model);
        let first = table.cd_values[0];
        let last = table.cd_values[table.len() - 1];

        for mach in [-1.0, -0.01, 0.0] {
            assert_eq!(get_drag_coefficient(mach, model), first);
        }
        for mach in [3.0, 3.5, 100.0] {
            assert_eq!(get_drag_coefficient(mach, model), last);
        }
    }
}

#[test]
fn test_standard_density() {
    assert_eq!(density_ratio(59.0, 29.92), 1.0);
}

#[test]
fn test_drag_free_parabola() {
    let projectile = Projectile { ballistic_coefficient: 1e12, ..primary() };
    let flat = SightSetup::new(0.0, 300.0).unwrap();
    let samples = simulate(&projectile, 0.0, &flat, &environment(), 0.0, &SimulationSettings::new(2800.0));

    assert_eq!(samples.len(), 10);
    for sample in &samples {
        let parabola = -0.5 * GRAVITY_FPS2 * sample.time_s * sample.time_s;
        assert!((sample.drop_ft - parabola).abs() < 0.01);
    }
}

#[test]
fn test_sample_spacing() {
    let settings = SimulationSettings::new(1503.0).with_sample_interval(150.0);
    let samples = simulate(&primary(), 0.0007, &sight(), &environment(), 14.67, &settings);
    let step_travel = primary().muzzle_velocity_fps * settings.time_step_s;

    assert_eq!(samples.len(), 11);
    for pair in samples.windows(2) {
        let spacing = pair[1].downrange_ft - pair[0].downrange_ft;
        assert!(spacing > 0.0);
        assert!((spacing - 150.0).abs() <= step_travel);
    }
}

#[test]
fn test_reference_scenario() {
    let angle = find_zero_angle(&primary(), &sight(), &environment());
    // A few hundredths of a degree
    assert!(angle.to_degrees() > 0.01 && angle.to_degrees() < 0.1);

    let samples = simulate(&primary(), angle, &sight(), &environment(), 0.0, &SimulationSettings::new(3003.0));
    let at = |yd: f64| {
        samples
            .iter()
            .find(|s| (s.downrange_ft - yd * 3.0).abs() < 1.0)
            .unwrap_or_else(|| panic!("no sample at {yd} yd"))
    };

    assert!(at(100.0).drop_ft.abs() < 0.05);
    for yd in [300.0, 500.0, 1000.0] {
        assert!(at(yd).drop_ft < 0.0, "{yd} yd drop {}", at(yd).drop_ft);
    }
    assert!(at(1000.0).drop_ft < at(500.0).drop_ft);
}

#[test]
fn test_equivalent_zero_of_identical_load() {
    let angle = find_zero_angle(&primary(), &sight(), &environment());
    let twin = Projectile { name: "same load, different box".to_string(), ..primary() };
    let equivalent = find_equivalent_zero(&twin, angle, &sight(), &environment(), 3003.0).unwrap();
    assert!((equivalent - 300.0).abs() < 3.0);
}

#[test]
fn test_flatter_load_zero_is_farther() {
    let angle = find_zero_angle(&primary(), &sight(), &environment());
    let flatter = Projectile::new("NAS3 150 TTSX", 150.0, 0.440, DragModel::G1, 2950.0).unwrap();
    let equivalent = find_equivalent_zero(&flatter, angle, &sight(), &environment(), 3003.0).unwrap();

    assert!(equivalent > 300.0);
    assert!((equivalent / 3.0 - 137.4).abs() < 1.0);
}
