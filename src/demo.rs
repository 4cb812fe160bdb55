//! Scripted headless session.
//!
//! Stands a simulated player in an empty room, brings controllers online
//! late, then walks a short route: forward, a turn, a deep crouch under a
//! low beam that clips the headset, and a final stop on a raised platform.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use touchwalk_session::{
    ColliderHandle, CollisionFilter, ControllerEvent, DeviceIndex, DeviceNotification, EventSink, FadeColor, Grabber,
    HeadsetPose, InputSource, RecoveryOutcome, ScreenFade, Session, SessionConfig,
};

pub const BODY_COLLIDER: ColliderHandle = ColliderHandle(1);
const STANDING_HEIGHT: f32 = 1.75;
const CROUCH_HEIGHT: f32 = 0.95;
const PLATFORM_HEIGHT: f32 = 0.3;

/// Host stand-in that logs what the session asks of it.
#[derive(Debug, Default)]
pub struct LoggingHost {
    pub fades: u32,
    pub filter_changes: u32,
}

impl ScreenFade for LoggingHost {
    fn fade(&mut self, color: FadeColor, duration: f32) {
        self.fades += 1;
        log::info!("fade to {:?} over {:.2}s", color.0, duration);
    }
}

impl CollisionFilter for LoggingHost {
    fn set_ignore_collision(&mut self, a: ColliderHandle, b: ColliderHandle, ignore: bool) {
        self.filter_changes += 1;
        log::info!("collision {} <-> {}: ignore={}", a, b, ignore);
    }
}

/// Simulated handheld controller. Keeps the sinks it was subscribed with so
/// the script can "touch" the pad.
struct SimController {
    index: DeviceIndex,
    sinks: Rc<RefCell<Vec<EventSink>>>,
}

impl InputSource for SimController {
    fn index(&self) -> DeviceIndex {
        self.index
    }

    fn subscribe_axis(&mut self, sink: EventSink) {
        self.sinks.borrow_mut().push(sink);
    }

    fn grabber(&mut self) -> Option<&mut dyn Grabber> {
        Some(self)
    }
}

impl Grabber for SimController {
    fn subscribe_grab(&mut self, _sink: EventSink) {}
}

/// Parameters for one scripted run.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub seconds: f32,
    pub frame_rate: f32,
    pub controllers: u32,
    pub controller_delay: f32,
}

/// End-of-run summary.
#[derive(Debug)]
pub struct DemoSummary {
    pub final_position: Vec3,
    pub frames: u64,
    pub fixed_steps: u64,
    pub bound_controllers: usize,
    pub recoveries: u32,
    pub fades: u32,
}

/// Touchpad input the script wants at time `t`.
fn scripted_axis(t: f32) -> Option<Vec2> {
    match t {
        t if (2.0..4.0).contains(&t) => Some(Vec2::new(0.0, 1.0)),
        t if (4.0..5.0).contains(&t) => Some(Vec2::new(0.6, 0.6)),
        t if (6.0..8.0).contains(&t) => Some(Vec2::new(0.0, 0.8)),
        _ => None,
    }
}

fn scripted_headset_height(t: f32) -> f32 {
    if (6.5..7.5).contains(&t) {
        CROUCH_HEIGHT
    } else {
        STANDING_HEIGHT
    }
}

fn scripted_yaw(t: f32) -> f32 {
    // Slow quarter turn to the left between 4 s and 5 s
    ((t - 4.0).clamp(0.0, 1.0)) * std::f32::consts::FRAC_PI_2
}

/// Run the scripted session to completion.
pub fn run(config: SessionConfig, options: &DemoOptions) -> anyhow::Result<DemoSummary> {
    let mut session = Session::new(config, Vec3::ZERO, BODY_COLLIDER, LoggingHost::default())?;
    session.start();

    let sinks: Rc<RefCell<Vec<EventSink>>> = Rc::default();
    let frame_dt = 1.0 / options.frame_rate.max(1.0);
    let frames = (options.seconds / frame_dt).ceil() as u64;

    let mut controllers_online = false;
    let mut touching = false;
    let mut beam_hit = false;
    let mut on_platform = false;
    let mut recoveries = 0;

    for frame in 0..frames {
        let t = frame as f32 * frame_dt;

        // Controllers report connected right away, but their input
        // components only show up after the configured delay.
        if frame == 0 {
            for i in 0..options.controllers {
                session.device_notification(DeviceNotification::controller_connected(i + 1));
            }
        }
        if !controllers_online && t >= options.controller_delay {
            controllers_online = true;
            for i in 0..options.controllers {
                session.add_source(Box::new(SimController {
                    index: DeviceIndex(i + 1),
                    sinks: Rc::clone(&sinks),
                }));
            }
            log::info!("{} controllers enumerable at t={:.2}s", options.controllers, t);
        }

        // Touch the pad on the first bound controller
        if let Some(sink) = sinks.borrow().first() {
            match scripted_axis(t) {
                Some(axis) => {
                    sink.push(ControllerEvent::AxisChanged { source: DeviceIndex(1), axis });
                    touching = true;
                }
                None if touching => {
                    sink.push(ControllerEvent::AxisReleased { source: DeviceIndex(1) });
                    touching = false;
                }
                None => {}
            }
        }

        if !on_platform && t >= 9.0 {
            on_platform = true;
            session.state_mut().body.position.y = PLATFORM_HEIGHT;
            log::info!("stepped onto platform at {:?}", session.state().position());
        }

        let pose = HeadsetPose::from_yaw(
            session.state().position(),
            Vec3::new(0.0, scripted_headset_height(t), 0.0),
            scripted_yaw(t),
        );
        let report = session.advance(frame_dt, &pose);
        if report.safe.floor_changed {
            log::info!("standing height recalibrated at t={:.2}s", t);
        }

        if !beam_hit && t >= 7.2 {
            beam_hit = true;
            match session.headset_collision() {
                RecoveryOutcome::Recovered { from, to } => {
                    recoveries += 1;
                    log::info!("headset hit the beam: {:?} -> {:?}", from, to);
                }
                RecoveryOutcome::NoSafePosition => {
                    log::info!("headset hit the beam with no safe position recorded");
                }
            }
        }
    }

    let state = session.state();
    Ok(DemoSummary {
        final_position: state.position(),
        frames: state.frames,
        fixed_steps: state.fixed_steps,
        bound_controllers: session.binder().bound_count(),
        recoveries,
        fades: session.host().fades,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_run() {
        let options = DemoOptions {
            seconds: 10.0,
            frame_rate: 90.0,
            controllers: 2,
            controller_delay: 1.0,
        };
        let summary = run(SessionConfig::default(), &options).unwrap();

        assert_eq!(summary.bound_controllers, 2);
        assert_eq!(summary.recoveries, 1);
        assert_eq!(summary.fades, 1);
        assert_eq!(summary.final_position.y, PLATFORM_HEIGHT);
        assert!(summary.final_position.z < -1.0, "ended at {:?}", summary.final_position);
        assert!(summary.fixed_steps >= 495 && summary.fixed_steps <= 500);
    }
}
