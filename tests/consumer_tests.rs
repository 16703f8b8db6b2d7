//! Integration tests for Consumer

mod common;
use common::*;

use rate_blinky::{
    BLINK_SIGNAL, BLUE, Consumer, GREEN, RED, RateFactor, RateLimits, SignalOutcome, SignalQueue,
    TickDuration,
};

#[test]
fn blink_signal_drives_on_then_off() {
    let kernel = MockKernel::new();
    let queue = MockQueue::new();
    let rate = RateFactor::new(1.0, RateLimits::UNBOUNDED);
    let mut consumer = Consumer::new(
        &kernel,
        &queue,
        &rate,
        MockLed::new(&kernel),
        TickDuration(500),
        BLUE,
        RED,
    );

    assert_eq!(consumer.handle_signal(BLINK_SIGNAL), SignalOutcome::Blinked);

    let history = consumer.led().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].0, 0);
    assert!(colors_equal(history[0].1, BLUE));
    assert_eq!(history[1].0, 500);
    assert!(colors_equal(history[1].1, RED));
    assert_eq!(kernel.sleeps().as_slice(), &[Sleep::For(TickDuration(500))]);
}

#[test]
fn unexpected_payload_is_ignored() {
    let kernel = MockKernel::new();
    let queue = MockQueue::new();
    let rate = RateFactor::new(1.0, RateLimits::UNBOUNDED);
    let mut consumer = Consumer::new(
        &kernel,
        &queue,
        &rate,
        MockLed::new(&kernel),
        TickDuration(500),
        BLUE,
        RED,
    );

    assert_eq!(consumer.handle_signal(0), SignalOutcome::Ignored(0));
    assert_eq!(consumer.handle_signal(101), SignalOutcome::Ignored(101));
    assert!(consumer.led().history().is_empty());
    assert!(kernel.sleeps().is_empty());
    assert_eq!(kernel.ticks(), 0);
}

#[test]
fn on_duration_uses_rate_at_receipt() {
    let kernel = MockKernel::new();
    let queue = MockQueue::new();
    let rate = RateFactor::new(1.0, RateLimits::UNBOUNDED);
    let mut consumer = Consumer::new(
        &kernel,
        &queue,
        &rate,
        MockLed::new(&kernel),
        TickDuration(500),
        BLUE,
        RED,
    );

    assert_eq!(consumer.on_duration(), TickDuration(500));

    rate.scale_by(2.0);
    assert_eq!(consumer.on_duration(), TickDuration(1000));
    consumer.handle_signal(BLINK_SIGNAL);

    rate.scale_by(0.25);
    assert_eq!(consumer.on_duration(), TickDuration(250));
    consumer.handle_signal(BLINK_SIGNAL);

    assert_eq!(
        kernel.sleeps().as_slice(),
        &[Sleep::For(TickDuration(1000)), Sleep::For(TickDuration(250))]
    );
}

#[test]
fn step_receives_from_queue() {
    let kernel = MockKernel::new();
    let queue = MockQueue::new();
    let rate = RateFactor::new(1.0, RateLimits::UNBOUNDED);
    let mut consumer = Consumer::new(
        &kernel,
        &queue,
        &rate,
        MockLed::new(&kernel),
        TickDuration(500),
        GREEN,
        RED,
    );

    queue.try_send(BLINK_SIGNAL).unwrap();
    assert_eq!(consumer.step(), SignalOutcome::Blinked);
    assert!(!queue.is_full());
    assert!(colors_equal(consumer.led().last_color().unwrap(), RED));

    queue.try_send(7).unwrap();
    assert_eq!(consumer.step(), SignalOutcome::Ignored(7));
    assert_eq!(consumer.led().history().len(), 2);
}
