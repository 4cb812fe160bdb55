//! End-to-end session tests: late controllers, walking, crouching under an
//! obstacle, recovery, platforms and held objects.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use touchwalk_session::{
    BindOutcome, BindState, ColliderHandle, CollisionFilter, ControllerEvent, DeviceIndex, DeviceNotification,
    EventSink, FadeColor, Grabber, HeadsetPose, InputSource, RecoveryOutcome, ScreenFade, Session, SessionConfig,
};

const FRAME_DT: f32 = 1.0 / 90.0;
const BODY: ColliderHandle = ColliderHandle(1);
const CRATE: ColliderHandle = ColliderHandle(50);

#[derive(Default)]
struct TestHost {
    fades: Vec<(FadeColor, f32)>,
    filters: Vec<(ColliderHandle, ColliderHandle, bool)>,
}

impl ScreenFade for TestHost {
    fn fade(&mut self, color: FadeColor, duration: f32) {
        self.fades.push((color, duration));
    }
}

impl CollisionFilter for TestHost {
    fn set_ignore_collision(&mut self, a: ColliderHandle, b: ColliderHandle, ignore: bool) {
        self.filters.push((a, b, ignore));
    }
}

/// Shared view of what a simulated controller was subscribed with.
#[derive(Default)]
struct Wiring {
    axis: Option<EventSink>,
    grab: Option<EventSink>,
    axis_subscriptions: usize,
}

struct SimController {
    index: DeviceIndex,
    wiring: Rc<RefCell<Wiring>>,
}

impl InputSource for SimController {
    fn index(&self) -> DeviceIndex {
        self.index
    }

    fn subscribe_axis(&mut self, sink: EventSink) {
        let mut wiring = self.wiring.borrow_mut();
        wiring.axis = Some(sink);
        wiring.axis_subscriptions += 1;
    }

    fn grabber(&mut self) -> Option<&mut dyn Grabber> {
        Some(self)
    }
}

impl Grabber for SimController {
    fn subscribe_grab(&mut self, sink: EventSink) {
        self.wiring.borrow_mut().grab = Some(sink);
    }
}

fn new_session() -> Session<TestHost> {
    let mut session = Session::new(SessionConfig::default(), Vec3::ZERO, BODY, TestHost::default()).unwrap();
    session.start();
    session
}

fn pose(session: &Session<TestHost>, headset_height: f32) -> HeadsetPose {
    HeadsetPose::from_yaw(session.state().position(), Vec3::new(0.0, headset_height, 0.0), 0.0)
}

fn run(session: &mut Session<TestHost>, seconds: f32, headset_height: f32) {
    let frames = (seconds / FRAME_DT).round() as usize;
    for _ in 0..frames {
        let pose = pose(session, headset_height);
        session.advance(FRAME_DT, &pose);
    }
}

fn connect_controllers(session: &mut Session<TestHost>) -> Vec<Rc<RefCell<Wiring>>> {
    run(session, 0.2, 1.8);
    session.device_notification(DeviceNotification::controller_connected(1));
    session.device_notification(DeviceNotification::controller_connected(2));

    // Input components are not ready yet
    run(session, 0.8, 1.8);
    assert_eq!(session.binder().state(), BindState::AwaitingMatch);
    assert_eq!(session.binder().bound_count(), 0);

    let wirings: Vec<_> = (1..=2).map(|_| Rc::new(RefCell::new(Wiring::default()))).collect();
    for (i, wiring) in wirings.iter().enumerate() {
        session.add_source(Box::new(SimController {
            index: DeviceIndex(i as u32 + 1),
            wiring: Rc::clone(wiring),
        }));
    }

    run(session, 0.5, 1.8);
    assert_eq!(session.binder().state(), BindState::Bound);
    assert_eq!(session.binder().bound_count(), 2);
    wirings
}

fn axis_sink(wiring: &Rc<RefCell<Wiring>>) -> EventSink {
    wiring.borrow().axis.clone().expect("controller was bound")
}

#[test]
fn test_late_controllers_get_bound() {
    let mut session = new_session();
    let wirings = connect_controllers(&mut session);

    for wiring in &wirings {
        let wiring = wiring.borrow();
        assert_eq!(wiring.axis_subscriptions, 1);
        assert!(wiring.grab.is_some());
    }

    // Extra attempts never subscribe twice
    assert_eq!(session.bind_now(), BindOutcome::Bound { newly_bound: vec![] });
    assert_eq!(wirings[0].borrow().axis_subscriptions, 1);
}

#[test]
fn test_walk_crouch_collide_recover() {
    let mut session = new_session();
    let wirings = connect_controllers(&mut session);
    let sink = axis_sink(&wirings[0]);
    let start = session.state().position();

    // Walk forward standing up
    sink.push(ControllerEvent::AxisChanged {
        source: DeviceIndex(1),
        axis: Vec2::new(0.0, 1.0),
    });
    run(&mut session, 1.0, 1.8);

    let walked = session.state().position() - start;
    assert!(walked.z < -2.8 && walked.z > -3.2, "walked {:?}", walked);
    assert_eq!(walked.y, 0.0);
    assert_eq!(session.state().safe.last_good_position, Some(session.state().position()));
    let safe = session.state().position();

    // Duck well below the crouch margin and keep walking under something
    run(&mut session, 0.5, 1.0);
    assert!(session.state().position().z < safe.z - 1.0);
    assert_eq!(session.state().safe.last_good_position, Some(safe));

    // Head hits the obstacle
    let outcome = session.headset_collision();
    assert!(matches!(outcome, RecoveryOutcome::Recovered { to, .. } if to == safe));
    assert_eq!(session.state().position(), safe);
    assert_eq!(session.host().fades, vec![(FadeColor::BLACK, 0.0)]);

    // Let go of the pad: the body coasts to a stop and stays there
    sink.push(ControllerEvent::AxisReleased { source: DeviceIndex(1) });
    run(&mut session, 1.0, 1.8);
    assert!(session.state().speed.is_stopped());
    let resting = session.state().position();
    run(&mut session, 0.5, 1.8);
    assert_eq!(session.state().position(), resting);
}

#[test]
fn test_collider_follows_headset() {
    let mut session = new_session();
    run(&mut session, 0.1, 1.8);

    let collider = session.state().body.collider;
    assert!((collider.size.y - 1.6).abs() < 1e-5);
    assert!((collider.center.y - 0.809).abs() < 1e-5);

    run(&mut session, 0.1, 1.2);
    assert!((session.state().body.collider.size.y - 1.0).abs() < 1e-5);
}

#[test]
fn test_stepping_onto_platform_recalibrates() {
    let mut session = new_session();
    run(&mut session, 0.2, 1.8);
    assert!((session.state().safe.highest_headset_y - 1.8).abs() < 1e-6);

    // Host physics lifts the body onto a 0.5 m platform
    session.state_mut().body.position.y = 0.5;
    let pose = pose(&session, 1.8);
    let report = session.advance(FRAME_DT, &pose);

    assert!(report.safe.floor_changed);
    assert!(report.safe.captured);
    assert!((session.state().safe.highest_headset_y - 2.3).abs() < 1e-5);
    assert_eq!(session.state().safe.last_good_position.map(|p| p.y), Some(0.5));
}

#[test]
fn test_held_object_collisions_toggle() {
    let mut session = new_session();
    let wirings = connect_controllers(&mut session);
    let left = wirings[0].borrow().grab.clone().unwrap();
    let right = wirings[1].borrow().grab.clone().unwrap();

    left.push(ControllerEvent::Grabbed { source: DeviceIndex(1), object: CRATE });
    right.push(ControllerEvent::Grabbed { source: DeviceIndex(2), object: CRATE });
    session.pump_events();
    assert_eq!(session.host().filters, vec![(BODY, CRATE, true)]);
    assert_eq!(session.grabs().holds(CRATE), 2);

    left.push(ControllerEvent::Ungrabbed { source: DeviceIndex(1), object: CRATE });
    session.pump_events();
    assert_eq!(session.host().filters.len(), 1);

    right.push(ControllerEvent::Ungrabbed { source: DeviceIndex(2), object: CRATE });
    session.pump_events();
    assert_eq!(session.host().filters.last(), Some(&(BODY, CRATE, false)));
}

#[test]
fn test_collision_before_any_capture_is_ignored() {
    let mut session = new_session();
    // Player starts crouched on the floor: headset never gets above the margin
    session.state_mut().safe.highest_headset_y = 1.8;
    session.state_mut().safe.last_play_area_y = 0.0;
    run(&mut session, 0.2, 0.9);
    assert!(!session.state().safe.last_good_position_set());

    let before = session.state().position();
    assert_eq!(session.headset_collision(), RecoveryOutcome::NoSafePosition);
    assert_eq!(session.state().position(), before);
    assert!(session.host().fades.is_empty());
}
