//! Spins a simulated flywheel up to speed twice: once with a bang-bang controller driving the
//! motor directly, and once through a velocity-controlled motor built from a PID loop.
//!
//! Run with `cargo run --example flywheel`.

use std::{cell::RefCell, rc::Rc};

use log::{LevelFilter, info};
use motive::{
    devices::sim::{SimMotor, SimSensor},
    prelude::*,
};

const DT: f64 = 0.01;
const TIME_CONSTANT: f64 = 0.25;
const FREE_SPEED: f64 = 600.0;
const TARGET_SPEED: f64 = 420.0;

/// First-order flywheel model: speed relaxes towards `command * FREE_SPEED`.
struct Flywheel {
    speed: f64,
}

impl Flywheel {
    fn step(&mut self, command: f64) -> f64 {
        let command = command.clamp(-1.0, 1.0);
        self.speed += (command * FREE_SPEED - self.speed) * DT / TIME_CONSTANT;
        self.speed
    }
}

/// Minimal PI loop, standing in for whatever PID implementation the robot already ships.
#[derive(Default)]
struct PiLoop {
    gains: Option<PidGains<f64>>,
    output_range: (f64, f64),
    setpoint: f64,
    integral: f64,
}

impl PidEngine for PiLoop {
    type Scalar = f64;

    fn set_gains(&mut self, gains: PidGains<f64>) {
        self.gains = Some(gains);
    }

    fn set_output_range(&mut self, min: f64, max: f64) {
        self.output_range = (min, max);
    }

    fn set_continuous(&mut self, _continuous: bool) {}

    fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    fn setpoint(&self) -> f64 {
        self.setpoint
    }

    fn step<M, O>(&mut self, measurement: M, output: O)
    where
        M: FnOnce() -> f64,
        O: FnOnce(f64),
    {
        let Some(gains) = self.gains else {
            return;
        };

        let error = self.setpoint - measurement();
        self.integral += error * DT;

        let (min, max) = self.output_range;
        output((gains.kp * error + gains.ki * self.integral).clamp(min, max));
    }
}

fn bang_bang(encoder: &SimSensor<f64>) -> Result<(), ConfigError> {
    let mut flywheel = Flywheel { speed: 0.0 };
    let mut motor = SimMotor::new();

    // Feedforward holds roughly the right voltage and the bang-bang term closes the gap. A
    // positive error pushes the output down, so the amplitude is negated for a motor that
    // speeds up on positive commands.
    let mut controller = BangBang::new(
        encoder,
        BangBangConfig::new(-0.2, 1.0 / FREE_SPEED).with_threshold(5.0),
    )?;
    controller.set_setpoint(TARGET_SPEED);

    for tick in 0..200 {
        motor.drive(controller.get());
        encoder.set(flywheel.step(motor.output()));

        if tick % 25 == 0 {
            info!(
                "bang-bang t={:.2}s speed={:.1} error={:.1} output={:.3}",
                f64::from(tick) * DT,
                encoder.value(),
                controller.error(),
                motor.output()
            );
        }
    }

    Ok(())
}

fn velocity_controlled(encoder: &SimSensor<f64>) -> Result<(), ConfigError> {
    let mut flywheel = Flywheel { speed: 0.0 };
    let motor = Rc::new(RefCell::new(SimMotor::<f64>::new()));

    let mut shooter = PidDrivenActuator::new(
        PiLoop::default(),
        PidGains::new(0.004, 0.01, 0.0),
        encoder,
        Rc::clone(&motor),
    )?;
    shooter.enable();
    shooter.drive(TARGET_SPEED);

    for tick in 0..200 {
        shooter.tick();
        encoder.set(flywheel.step(shooter.get()));

        if tick % 25 == 0 {
            info!(
                "velocity t={:.2}s speed={:.1} output={:.3}",
                f64::from(tick) * DT,
                encoder.value(),
                shooter.get()
            );
        }
    }

    shooter.disable();
    info!(
        "shooter disabled after {} commands, last {}",
        motor.borrow().commands().len(),
        motor.borrow().output()
    );

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    motive::logger::init(LevelFilter::Info)?;

    let encoder = SimSensor::new(0.0);
    bang_bang(&encoder)?;

    encoder.set(0.0);
    velocity_controlled(&encoder)?;

    Ok(())
}
