//! Spin resolver tests.
//!
//! Tests cover: fixed-draw geometry, single-item wheels, angle range,
//! and uniformity of the winning index.

use wheel_core::{
    config::RotationConfig,
    resolver::{resolve, resolve_with, winning_index_for},
    rng::WheelRng,
};

/// Feed the resolver a fixed list of draws.
fn fixed(draws: &[f64]) -> impl FnMut() -> f64 + '_ {
    let mut it = draws.iter().copied();
    move || it.next().expect("resolver drew more values than provided")
}

#[test]
fn zero_draws_on_four_items_land_on_index_one() {
    let outcome = resolve(4, fixed(&[0.0, 0.0]));
    assert_eq!(outcome.final_angle, 1080.0);
    assert_eq!(outcome.winning_index, 1);
}

#[test]
fn offset_moves_the_winner_around_the_wheel() {
    // 1080 + 90: pointer at 270, +90 wraps to 0.
    assert_eq!(resolve(4, fixed(&[0.0, 0.25])).winning_index, 0);
    // 1080 + 180: pointer at 180, adjusted 270.
    assert_eq!(resolve(4, fixed(&[0.0, 0.5])).winning_index, 3);
    // 1080 + 270: pointer at 90, adjusted 180.
    assert_eq!(resolve(4, fixed(&[0.0, 0.75])).winning_index, 2);
}

#[test]
fn winning_index_depends_only_on_angle_modulo_a_turn() {
    for n in 2..=12 {
        for step in 0..36 {
            let angle = 1080.0 + step as f64 * 10.0 + 0.5;
            assert_eq!(
                winning_index_for(angle, n),
                winning_index_for(angle + 720.0, n),
                "n={n} angle={angle}"
            );
        }
    }
}

#[test]
fn single_item_always_wins() {
    let mut rng = WheelRng::new(0x5151);
    for _ in 0..1_000 {
        let outcome = resolve(1, || rng.next_f64());
        assert_eq!(outcome.winning_index, 0);
        assert!(outcome.final_angle >= 1080.0);
    }
    assert_eq!(resolve(1, fixed(&[0.999, 0.999])).winning_index, 0);
}

#[test]
fn final_angle_spans_three_to_eight_turns() {
    let mut rng = WheelRng::new(0xA11CE);
    for _ in 0..10_000 {
        let outcome = resolve(6, || rng.next_f64());
        assert!(
            (1080.0..2880.0).contains(&outcome.final_angle),
            "final angle out of range: {}",
            outcome.final_angle
        );
        assert!(outcome.winning_index < 6);
    }
}

#[test]
fn custom_rotation_range_is_respected() {
    let rotation = RotationConfig { min_rotations: 5.0, extra_rotations: 0.0 };
    let outcome = resolve_with(&rotation, 3, fixed(&[0.7, 0.0]));
    assert_eq!(outcome.final_angle, 1800.0);
}

/// Chi-square goodness of fit against a uniform distribution.
#[test]
fn winning_index_is_uniform_for_every_wheel_size() {
    const DRAWS: usize = 10_000;

    for n in 1..=50usize {
        let mut rng = WheelRng::new(0xC0FFEE ^ n as u64);
        let mut counts = vec![0u64; n];
        for _ in 0..DRAWS {
            let outcome = resolve(n, || rng.next_f64());
            counts[outcome.winning_index] += 1;
        }

        let expected = DRAWS as f64 / n as f64;
        let chi_square: f64 = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum();

        // Far tail of the chi-square distribution with n-1 degrees of freedom.
        let df = (n - 1) as f64;
        let limit = df + 5.0 * (2.0 * df).sqrt() + 10.0;
        assert!(
            chi_square <= limit,
            "n={n}: chi-square {chi_square:.2} exceeds {limit:.2}, counts={counts:?}"
        );
    }
}
