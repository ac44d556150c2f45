//! Circle mode driven through its public interface

use copter_core::control::{MockPositionController, PositionController};
use copter_core::mode::{AttitudeCommand, CircleMode, FailsafeEvent, Mode, ModeContext, Peripherals};
use copter_core::traits::{ClimbRateAvoidance, MockConfig, MockPilotInput, MockVehicleState, SurfaceTracker};
use copter_core::vehicle::{SpoolState, VehicleSnapshot};
use nalgebra::Vector3;

const DT: f32 = 0.01;

fn flying() -> MockVehicleState {
    MockVehicleState::new(VehicleSnapshot::flying(Vector3::new(0.0, 0.0, 1000.0)))
}

struct Rangefinder(Option<f32>);

impl SurfaceTracker for Rangefinder {
    fn surface_offset_cm(&mut self) -> Option<f32> {
        self.0
    }
}

struct CeilingAvoidance;

impl ClimbRateAvoidance for CeilingAvoidance {
    fn adjust_climb_rate(&self, climb_rate_cms: f32, _dt: f32) -> f32 {
        climb_rate_cms.min(0.0)
    }
}

#[test]
fn test_pitch_stick_shrinks_radius_one_tick() {
    let mut pc = MockPositionController::new(DT);
    let vehicle = flying();
    let pilot = MockPilotInput::new();
    let config = MockConfig::default();
    config.update(|c| {
        c.wpnav.speed_cms = 500.0;
        c.circle.radius_cm = 1000.0;
    });
    let mut mode = CircleMode::new(ModeContext::new(&mut pc, &vehicle, &pilot, &config));
    mode.enter().unwrap();

    pilot.set_pitch(1.0);
    mode.update(DT).unwrap();

    assert!((mode.radius_cm().unwrap() - 995.0).abs() < 1e-3);
}

#[test]
fn test_rate_increase_after_release() {
    let mut pc = MockPositionController::new(DT);
    let vehicle = flying();
    let pilot = MockPilotInput::new();
    let config = MockConfig::default();
    config.update(|c| {
        c.wpnav.speed_cms = 500.0;
        c.wpnav.accel_cmss = 250.0;
        c.circle.radius_cm = 100.0;
        c.circle.rate_degs = 45.0;
    });
    let mut mode = CircleMode::new(ModeContext::new(&mut pc, &vehicle, &pilot, &config));
    mode.enter().unwrap();

    // Let the orbit ramp up to the commanded rate
    for _ in 0..100 {
        mode.update(DT).unwrap();
    }
    let current = mode.orbit().unwrap().rate_current_degs();
    assert!((current - 45.0).abs() < 1e-3);

    // Stick at zero clears the speed-changing latch
    pilot.set_roll(0.0);
    mode.update(DT).unwrap();
    assert!(!mode.speed_changing());

    pilot.set_roll(1.0);
    mode.update(0.02).unwrap();
    assert!((mode.rate_degs().unwrap() - 45.02).abs() < 1e-3);
    assert!(mode.speed_changing());
}

#[test]
fn test_radius_stays_non_negative_under_any_pitch() {
    let mut pc = MockPositionController::new(DT);
    let vehicle = flying();
    let pilot = MockPilotInput::new();
    let config = MockConfig::default();
    config.update(|c| c.circle.radius_cm = 50.0);
    let mut mode = CircleMode::new(ModeContext::new(&mut pc, &vehicle, &pilot, &config));
    mode.enter().unwrap();

    let sticks = [1.0, 1.0, -0.3, 1.0, 0.7, -1.0, 1.0, 1.0, 0.2, 1.0];
    for (i, pitch) in sticks.iter().cycle().take(200).enumerate() {
        pilot.set_pitch(*pitch);
        let dt = if i % 3 == 0 { 0.05 } else { DT };
        mode.update(dt).unwrap();
        assert!(mode.radius_cm().unwrap() >= 0.0);
    }
}

#[test]
fn test_rate_bounded_and_sign_flip_gated() {
    let mut pc = MockPositionController::new(DT);
    let vehicle = flying();
    let pilot = MockPilotInput::new();
    let config = MockConfig::default();
    config.update(|c| c.circle.rate_degs = 1.0);
    let mut mode = CircleMode::new(ModeContext::new(&mut pc, &vehicle, &pilot, &config));
    mode.enter().unwrap();

    // Hold the stick hard left: the rate may reach zero but never go negative
    pilot.set_roll(-1.0);
    let mut previous = mode.rate_degs().unwrap();
    for _ in 0..400 {
        mode.update(0.05).unwrap();
        let rate = mode.rate_degs().unwrap();
        assert!((-90.0..=90.0).contains(&rate));
        assert!(
            !(previous > 0.0 && rate < 0.0),
            "rate crossed zero while stick held"
        );
        previous = rate;
    }
    assert_eq!(mode.rate_degs(), Some(0.0));

    // Release then press: reverse direction allowed
    pilot.set_roll(0.0);
    mode.update(DT).unwrap();
    pilot.set_roll(-1.0);
    mode.update(DT).unwrap();
    assert!(mode.rate_degs().unwrap() < 0.0);

    // Full stick for a long time stays within the limit
    for _ in 0..20_000 {
        mode.update(0.05).unwrap();
    }
    assert!(mode.rate_degs().unwrap() >= -90.0);
}

#[test]
fn test_landed_tick_skips_horizontal_update() {
    let mut pc = MockPositionController::new(DT);
    let vehicle = flying();
    let pilot = MockPilotInput::new();
    let config = MockConfig::default();
    let mut mode = CircleMode::new(ModeContext::new(&mut pc, &vehicle, &pilot, &config));
    mode.enter().unwrap();

    vehicle.update(|s| s.land_complete = true);
    let output = mode.update(DT).unwrap();
    assert_eq!(output.spool, Some(SpoolState::GroundIdle));
    assert_eq!(output.attitude, AttitudeCommand::GroundHold);
    assert!(output.reset_rate_i_terms);
}

#[test]
fn test_terrain_orbit_without_data_raises_failsafe() {
    let mut pc = MockPositionController::new(DT);
    let vehicle = flying();
    let pilot = MockPilotInput::new();
    let config = MockConfig::default();
    let mut mode = CircleMode::new(ModeContext::new(&mut pc, &vehicle, &pilot, &config));
    mode.enter().unwrap();
    mode.set_center(Vector3::new(1000.0, 0.0, 500.0), true).unwrap();

    let output = mode.update(DT).unwrap();
    assert_eq!(output.failsafe, Some(FailsafeEvent::Terrain));
    assert_eq!(output.spool, Some(SpoolState::ThrottleUnlimited));

    vehicle.update(|s| s.terrain_offset_cm = Some(120.0));
    let output = mode.update(DT).unwrap();
    assert!(output.failsafe.is_none());
}

#[test]
fn test_surface_tracking_offsets_vertical_target() {
    let mut pc = MockPositionController::new(DT);
    let vehicle = flying();
    let pilot = MockPilotInput::new();
    let config = MockConfig::default();
    let mut rangefinder = Rangefinder(Some(-35.0));
    {
        let ctx = ModeContext::new(&mut pc, &vehicle, &pilot, &config).with_peripherals(
            Peripherals {
                surface_tracking: Some(&mut rangefinder),
                ..Default::default()
            },
        );
        let mut mode = CircleMode::new(ctx);
        mode.enter().unwrap();
        mode.update(DT).unwrap();
    }
    assert_eq!(pc.offset_u_cm(), -35.0);
}

#[test]
fn test_avoidance_limits_climb() {
    let mut pc = MockPositionController::new(DT);
    let vehicle = flying();
    let pilot = MockPilotInput::new();
    pilot.set_throttle(1.0);
    let config = MockConfig::default();
    let avoidance = CeilingAvoidance;
    {
        let ctx = ModeContext::new(&mut pc, &vehicle, &pilot, &config).with_peripherals(
            Peripherals {
                avoidance: Some(&avoidance),
                ..Default::default()
            },
        );
        let mut mode = CircleMode::new(ctx);
        mode.enter().unwrap();
        for _ in 0..50 {
            mode.update(DT).unwrap();
        }
    }
    assert!(pc.vel_desired_neu_cms().z <= 0.0);
}

#[test]
fn test_exit_discards_state() {
    let mut pc = MockPositionController::new(DT);
    let vehicle = flying();
    let pilot = MockPilotInput::new();
    let config = MockConfig::default();
    let mut mode = CircleMode::new(ModeContext::new(&mut pc, &vehicle, &pilot, &config));
    mode.enter().unwrap();
    mode.exit().unwrap();

    assert_eq!(mode.radius_cm(), None);
    assert!(mode.update(DT).is_err());
}
