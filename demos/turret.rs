//! Aims a simulated turret with a continuous heading sensor, then shows how each read path
//! behaves when the encoder drops out mid-move.
//!
//! Run with `cargo run --example turret`.

use std::cell::Cell;

use log::{LevelFilter, info, warn};
use motive::{
    devices::{LastGood, from_fn, sim::SimMotor},
    prelude::*,
};

const DEGREES_PER_TICK: f64 = 4.0;

fn wrap(heading: f64) -> f64 {
    heading.rem_euclid(360.0)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    motive::logger::init(LevelFilter::Debug)?;

    let heading = Cell::new(350.0);
    let connected = Cell::new(true);
    let encoder = LastGood::new(from_fn(|| {
        if connected.get() { heading.get() } else { f64::NAN }
    }));

    let mut motor = SimMotor::new();
    let mut turret = BangBang::new(
        &encoder,
        BangBangConfig::new(-1.0, 0.0)
            .with_threshold(2.0)
            .with_continuous(InputRange::new(0.0, 360.0)?),
    )?;

    // 350 -> 30 is 40 degrees forward across the wrap, not 320 back.
    turret.set_setpoint(30.0);

    for tick in 0..20 {
        if tick == 6 {
            warn!("encoder unplugged");
            connected.set(false);
        }
        if tick == 9 {
            info!("encoder reconnected");
            connected.set(true);
        }

        match turret.get_safely() {
            Ok(output) => motor.drive(output),
            Err(fault) => {
                // Hold position; the infallible read is still usable for display.
                warn!("holding turret: {fault} (last heading {:.1})", encoder.measure());
                motor.drive(0.0);
            }
        }

        heading.set(wrap(heading.get() + motor.output() * DEGREES_PER_TICK));
        info!(
            "tick {tick:>2} heading={:>5.1} error={:>5.1} output={:+.1}",
            heading.get(),
            turret.error(),
            motor.output()
        );
    }

    turret.disable();
    info!(
        "disabled: output {} with stale error {:.1}",
        turret.get(),
        turret.error()
    );

    Ok(())
}
