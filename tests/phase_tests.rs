//! Phase Generator Tests
//!
//! Tests for the per-channel phase accumulators driven from the
//! carrier-timer interrupt.
//! Run with: cargo test --test phase_tests

use core::f32::consts::PI;

use spwm_firmware::config::COMPARE_POLARITY;
use spwm_firmware::dsp::phase::PhaseGenerator;
use spwm_firmware::dsp::waveform::{compare_value, duty_cycle};
use spwm_firmware::params::{Field, WaveformParams};
use spwm_firmware::types::Channel;

const TWO_PI: f32 = 2.0 * PI;
const EPSILON: f32 = 1e-4;

/// Build a parameter record through the field table, the same path the
/// parser uses
fn params(carrier: f32, modulation: f32, depth: f32, offset: f32) -> WaveformParams {
    let mut p = WaveformParams::STARTUP;
    Field::CarrierHz.apply(&mut p, carrier);
    Field::ModulationHz.apply(&mut p, modulation);
    Field::Depth.apply(&mut p, depth);
    Field::Offset.apply(&mut p, offset);
    p.recompute_timer_period();
    p
}

// =============================================================================
// Accumulator Basics
// =============================================================================

#[test]
fn generator_starts_at_zero() {
    let g = PhaseGenerator::new(Channel::Ch1);
    assert_eq!(g.angle(), 0.0);
    assert_eq!(g.channel(), Channel::Ch1);
}

#[test]
fn tick_advances_by_cycle_ratio() {
    // 1000 Hz carrier, 100 Hz modulation: 10 carrier periods per cycle
    let p = params(1000.0, 100.0, 1.0, 0.0);
    let mut g = PhaseGenerator::new(Channel::Ch1);

    g.tick(&p);
    let expected = TWO_PI / 10.0;
    assert!(
        (g.angle() - expected).abs() < EPSILON,
        "expected {}, got {}",
        expected,
        g.angle()
    );
}

#[test]
fn angle_wraps_past_two_pi() {
    // Ratio 3: the angle passes 2*pi after four ticks and wraps once
    let p = params(900.0, 300.0, 1.0, 0.0);
    let mut g = PhaseGenerator::new(Channel::Ch1);
    let increment = TWO_PI / 3.0;

    for _ in 0..5 {
        g.tick(&p);
    }
    // Never runs away past one extra increment
    assert!(
        g.angle() < TWO_PI + increment,
        "angle {} failed to wrap",
        g.angle()
    );
}

#[test]
fn angle_stays_bounded_over_many_cycles() {
    let p = params(2500.0, 60.0, 1.0, 0.0);
    let mut g = PhaseGenerator::new(Channel::Ch2);
    let increment = TWO_PI / (2500.0 / 60.0);

    for _ in 0..100_000 {
        g.tick(&p);
        assert!(g.angle() <= TWO_PI + increment + EPSILON);
    }
}

#[test]
fn zero_modulation_freezes_angle() {
    // 0 Hz modulation divides to a zero increment; the output holds
    let p = params(2500.0, 0.0, 1.0, 0.0);
    let mut g = PhaseGenerator::new(Channel::Ch1);

    let first = g.tick(&p);
    for _ in 0..10 {
        assert_eq!(g.tick(&p), first);
    }
    assert_eq!(g.angle(), 0.0);
}

// =============================================================================
// Parameter Hand-off
// =============================================================================

#[test]
fn reconfigure_applies_on_next_tick() {
    // The increment is recomputed from live parameters every invocation,
    // not cached
    let before = params(1000.0, 100.0, 1.0, 0.0);
    let after = params(1000.0, 200.0, 1.0, 0.0);
    let mut g = PhaseGenerator::new(Channel::Ch1);

    g.tick(&before);
    let angle_before = g.angle();
    g.tick(&after);

    let expected = angle_before + TWO_PI / 5.0;
    assert!(
        (g.angle() - expected).abs() < EPSILON,
        "new increment not applied: expected {}, got {}",
        expected,
        g.angle()
    );
}

#[test]
fn accumulator_not_realigned_by_reconfigure() {
    // A configuration change never resets the phase; only the increment
    // changes
    let before = params(1000.0, 100.0, 1.0, 0.0);
    let after = params(2000.0, 100.0, 1.0, 0.0);
    let mut g = PhaseGenerator::new(Channel::Ch3);

    for _ in 0..3 {
        g.tick(&before);
    }
    let carried = g.angle();
    g.tick(&after);
    assert!(g.angle() > carried, "angle restarted after reconfigure");
}

// =============================================================================
// Compare Output
// =============================================================================

#[test]
fn tick_output_matches_signal_model() {
    let p = params(2500.0, 60.0, 0.8, 0.1);
    let mut g = PhaseGenerator::new(Channel::Ch2);

    // First tick evaluates at angle 0 with this channel's lead
    let compare = g.tick(&p);
    let duty = duty_cycle(0.0, p.phase_lead_deg(Channel::Ch2), 0.8, 0.1);
    assert_eq!(compare, compare_value(duty, p.timer_period(), COMPARE_POLARITY));
}

#[test]
fn channels_are_phase_separated() {
    let p = WaveformParams::STARTUP;
    let mut g1 = PhaseGenerator::new(Channel::Ch1);
    let mut g2 = PhaseGenerator::new(Channel::Ch2);
    let mut g3 = PhaseGenerator::new(Channel::Ch3);

    let c1 = g1.tick(&p);
    let c2 = g2.tick(&p);
    let c3 = g3.tick(&p);

    // At angle 0 the 0/120/240 leads give three distinct compare values
    assert_ne!(c1, c2);
    assert_ne!(c2, c3);
    assert_ne!(c1, c3);
}

#[test]
fn compare_stays_in_period_over_full_cycle() {
    let p = params(2500.0, 60.0, 0.8, 0.1);
    let mut g = PhaseGenerator::new(Channel::Ch1);

    // More than one full modulation cycle
    for _ in 0..200 {
        let compare = g.tick(&p);
        assert!(
            compare <= p.timer_period(),
            "compare {} exceeds period {}",
            compare,
            p.timer_period()
        );
    }
}
