use super::*;

#[test]
fn manual_clock_sleep_advances_time() {
    let clock = ManualClock::new();
    assert_eq!(clock.now(), Duration::ZERO);
    clock.sleep(Duration::from_millis(40));
    clock.advance(Duration::from_millis(10));
    assert_eq!(clock.now(), Duration::from_millis(50));
}

#[test]
fn manual_clock_never_goes_backwards() {
    let clock = ManualClock::new();
    clock.set(Duration::from_secs(2));
    clock.set(Duration::from_secs(1));
    assert_eq!(clock.now(), Duration::from_secs(2));
}

#[test]
fn shared_clock_is_observed_through_rc() {
    let clock = Rc::new(ManualClock::new());
    let shared: Rc<dyn Clock> = clock.clone();
    clock.advance(Duration::from_millis(5));
    assert_eq!(shared.now(), Duration::from_millis(5));
}

#[test]
fn system_clock_is_monotonic() {
    let clock = SystemClock::new();
    let a = clock.now();
    let b = clock.now();
    assert!(b >= a);
}
