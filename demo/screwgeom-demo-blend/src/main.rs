//! screwgeom blend demo
//!
//! Moves a small point cloud from one pose to another in equal screw steps
//! and checks that the accumulated motion lands where the target puts it.
//!
//! Usage: `screwgeom-demo-blend [STEPS]`

use std::num::ParseIntError;

use screwgeom::algebraic_ops::*;
use screwgeom::error::NormalizationError;
use screwgeom::ops::*;
use screwgeom::re3::*;
use thiserror::Error;

const DEFAULT_STEPS: u32 = 16;
const DRIFT_TOLERANCE: f32 = 1e-4;

#[derive(Debug, Error)]
enum DemoError {
    #[error("invalid step count {0:?}: {1}")]
    BadSteps(String, #[source] ParseIntError),
    #[error("step count must be at least 1")]
    ZeroSteps,
    #[error("target pose is not a rigid motion: {0}")]
    Target(#[from] NormalizationError),
}

fn parse_steps() -> Result<u32, DemoError> {
    let Some(arg) = std::env::args().nth(1) else {
        return Ok(DEFAULT_STEPS);
    };
    let steps: u32 = arg
        .parse()
        .map_err(|e| DemoError::BadSteps(arg.clone(), e))?;
    if steps == 0 {
        return Err(DemoError::ZeroSteps);
    }
    Ok(steps)
}

/// Corners of a unit cube centered on the origin
fn cube() -> Vec<Point> {
    let mut points = Vec::with_capacity(8);
    for i in 0..8 {
        let corner = |bit: u32| if i & (1 << bit) == 0 { -0.5 } else { 0.5 };
        points.push(Point::new(corner(0), corner(1), corner(2)));
    }
    points
}

fn max_deviation(a: &[Point], b: &[Point]) -> f32 {
    a.iter()
        .zip(b.iter())
        .flat_map(|(p, q)| p.p3.iter().zip(q.p3.iter()).map(|(x, y)| (x - y).abs()))
        .fold(0., f32::max)
}

/// Carry `body` from pose `from` to pose `to` in `steps` equal screw steps
///
/// Returns the moved points and the accumulated motor.
fn blend(from: Motor, to: Motor, steps: u32, body: &[Point]) -> (Vec<Point>, Motor) {
    // The motion taking the first pose to the second: to = motion * from
    let generator = from.reverse().compose(to).log();
    log::info!(
        "blend generator: rotation {:?}, translation {:?}",
        &generator.p1[1..],
        &generator.p2[1..]
    );

    let step = (generator / steps as f32).exp();
    let mut start = vec![Point::default(); body.len()];
    from.conjugate_into(body, &mut start);

    let mut cloud = start.clone();
    let mut accumulated = from;
    let mut expected = vec![Point::default(); start.len()];
    for i in 1..=steps {
        step.conjugate_in_place(&mut cloud);
        accumulated = accumulated.compose(step).normalized();

        let along = (generator * (i as f32 / steps as f32)).exp();
        along.conjugate_into(&start, &mut expected);
        log::debug!(
            "step {i}/{steps}: first corner at {:?}, deviation {:e}",
            &cloud[0].p3[1..],
            max_deviation(&cloud, &expected)
        );
    }
    (cloud, accumulated)
}

fn main() -> Result<(), DemoError> {
    {
        let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                "debug".to_owned()
            } else {
                "info".to_owned()
            }
        });
        std::env::set_var("RUST_LOG", rust_log);
    }

    env_logger::init();

    let steps = parse_steps()?;

    // A third of a turn about a tilted axis, carried 3 units along x
    let pose = Translator::new(3., 1., 0., 0.) * Rotor::new(2.1, 1., 1., 0.);
    let mut packed = [0.; 8];
    packed[..4].copy_from_slice(&pose.p1);
    packed[4..].copy_from_slice(&pose.p2);
    let target = Motor::try_load_normalized(&packed)?;

    let origin_pose: Motor =
        Rotor::new(std::f32::consts::FRAC_PI_2, 0., 0., 1.) * Translator::new(1., 0., 0., 1.);

    let body = cube();
    let (cloud, accumulated) = blend(origin_pose, target, steps, &body);

    let mut expected = body.clone();
    target.conjugate_in_place(&mut expected);

    let drift = max_deviation(&cloud, &expected);
    if drift > DRIFT_TOLERANCE {
        log::warn!("point cloud drifted {drift:e} from the target pose after {steps} steps");
    } else {
        log::info!("point cloud reached the target pose after {steps} steps (drift {drift:e})");
    }

    let mut by_motor = body;
    accumulated.conjugate_in_place(&mut by_motor);
    let motor_drift = max_deviation(&by_motor, &expected);
    if motor_drift > DRIFT_TOLERANCE {
        log::warn!("accumulated motor drifted {motor_drift:e} from the target");
    } else {
        log::info!("accumulated motor matches the target (drift {motor_drift:e})");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_lands_on_target() {
        let from: Motor = Rotor::new(std::f32::consts::FRAC_PI_2, 0., 0., 1.)
            * Translator::new(1., 0., 0., 1.);
        let to = Translator::new(3., 1., 0., 0.) * Rotor::new(2.1, 1., 1., 0.);
        let body = cube();

        let mut expected = body.clone();
        to.conjugate_in_place(&mut expected);

        for steps in [1, 8, 16] {
            let (cloud, accumulated) = blend(from, to, steps, &body);
            assert!(max_deviation(&cloud, &expected) < 1e-3);

            let mut by_motor = body.clone();
            accumulated.conjugate_in_place(&mut by_motor);
            assert!(max_deviation(&by_motor, &expected) < 1e-3);
        }
    }

    #[test]
    fn cube_corners() {
        let corners = cube();
        assert_eq!(corners.len(), 8);
        assert!(corners.contains(&Point::new(0.5, -0.5, 0.5)));
    }
}
