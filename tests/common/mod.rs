//! Shared test infrastructure for rate-blinky integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};

use palette::Srgb;
use rate_blinky::{
    BlinkTask, ButtonPort, ButtonStatus, Edge, Kernel, QueueFull, RgbLed, SignalQueue,
    SignalSlot, SpawnError, TaskSpawner, TaskSpec, TickDuration, TickInstant, TimeSource,
};

// ============================================================================
// Mock Kernel
// ============================================================================

/// A kernel suspension recorded by [`MockKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sleep {
    Until(TickInstant),
    For(TickDuration),
}

/// Queue backed by a [`SignalSlot`].
///
/// `receive` on an empty queue would block forever in a real kernel; here it
/// panics so a test cannot hang.
pub struct MockQueue {
    slot: SignalSlot,
    sent: Cell<u32>,
}

impl MockQueue {
    pub fn new() -> Self {
        Self {
            slot: SignalSlot::new(),
            sent: Cell::new(0),
        }
    }

    pub fn is_full(&self) -> bool {
        self.slot.is_full()
    }

    /// Number of successful sends.
    pub fn sent(&self) -> u32 {
        self.sent.get()
    }
}

impl SignalQueue for MockQueue {
    fn try_send(&self, signal: u32) -> Result<(), QueueFull> {
        self.slot.try_send(signal)?;
        self.sent.set(self.sent.get() + 1);
        Ok(())
    }

    fn receive(&self) -> u32 {
        self.slot
            .try_receive()
            .expect("receive on an empty queue would block forever")
    }
}

/// Single-threaded kernel with a manually driven tick counter.
///
/// Sleeping advances the clock instead of suspending.
pub struct MockKernel {
    ticks: Cell<u32>,
    queue_available: bool,
    sleeps: RefCell<heapless::Vec<Sleep, 64>>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(ticks: u32) -> Self {
        Self {
            ticks: Cell::new(ticks),
            queue_available: true,
            sleeps: RefCell::new(heapless::Vec::new()),
        }
    }

    /// A kernel whose queue allocation always fails.
    pub fn out_of_memory() -> Self {
        Self {
            queue_available: false,
            ..Self::new()
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks.get()
    }

    pub fn set_ticks(&self, ticks: u32) {
        self.ticks.set(ticks);
    }

    pub fn advance(&self, ticks: u32) {
        self.ticks.set(self.ticks.get().wrapping_add(ticks));
    }

    pub fn sleeps(&self) -> heapless::Vec<Sleep, 64> {
        self.sleeps.borrow().clone()
    }

    fn record(&self, sleep: Sleep) {
        let _ = self.sleeps.borrow_mut().push(sleep);
    }
}

impl TimeSource<TickInstant> for MockKernel {
    fn now(&self) -> TickInstant {
        TickInstant(self.ticks.get())
    }
}

impl Kernel<TickInstant> for MockKernel {
    type Queue = MockQueue;

    fn create_queue(&self) -> Option<MockQueue> {
        self.queue_available.then(MockQueue::new)
    }

    fn sleep_until(&self, deadline: TickInstant) {
        self.record(Sleep::Until(deadline));
        // Deadlines in the past return immediately.
        let remaining = deadline.0.wrapping_sub(self.ticks.get());
        if remaining < u32::MAX / 2 {
            self.ticks.set(deadline.0);
        }
    }

    fn sleep_for(&self, duration: TickDuration) {
        self.record(Sleep::For(duration));
        self.advance(duration.0);
    }
}

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records every color change with the tick it happened at
pub struct MockLed<'k> {
    kernel: &'k MockKernel,
    history: heapless::Vec<(u32, Srgb), 64>,
}

impl<'k> MockLed<'k> {
    pub fn new(kernel: &'k MockKernel) -> Self {
        Self {
            kernel,
            history: heapless::Vec::new(),
        }
    }

    pub fn history(&self) -> &[(u32, Srgb)] {
        &self.history
    }

    pub fn last_color(&self) -> Option<Srgb> {
        self.history.last().map(|(_, color)| *color)
    }
}

impl RgbLed for MockLed<'_> {
    fn set_color(&mut self, color: Srgb) {
        let _ = self.history.push((self.kernel.ticks(), color));
    }
}

// ============================================================================
// Mock Buttons
// ============================================================================

/// A call made on [`MockButtons`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonCall {
    InitButtons,
    SetEdge(Edge),
    EnableInterrupt,
    EnableLine,
    EnableGlobal,
    ReadStatus { masked: bool },
    Clear(ButtonStatus),
}

/// Button port whose pending status is set by the test
pub struct MockButtons {
    pending: ButtonStatus,
    calls: heapless::Vec<ButtonCall, 64>,
}

impl MockButtons {
    pub fn new() -> Self {
        Self {
            pending: ButtonStatus::NONE,
            calls: heapless::Vec::new(),
        }
    }

    pub fn calls(&self) -> &[ButtonCall] {
        &self.calls
    }

    fn record(&mut self, call: ButtonCall) {
        let _ = self.calls.push(call);
    }
}

impl ButtonPort for MockButtons {
    fn init_buttons(&mut self) {
        self.record(ButtonCall::InitButtons);
    }

    fn set_interrupt_edge(&mut self, edge: Edge) {
        self.record(ButtonCall::SetEdge(edge));
    }

    fn enable_interrupt(&mut self) {
        self.record(ButtonCall::EnableInterrupt);
    }

    fn enable_interrupt_line(&mut self) {
        self.record(ButtonCall::EnableLine);
    }

    fn enable_global_interrupts(&mut self) {
        self.record(ButtonCall::EnableGlobal);
    }

    fn read_interrupt_status(&mut self, masked: bool) -> ButtonStatus {
        self.record(ButtonCall::ReadStatus { masked });
        self.pending
    }

    fn clear_interrupt(&mut self, status: ButtonStatus) {
        self.record(ButtonCall::Clear(status));
        self.pending = ButtonStatus(self.pending.0 & !status.0);
    }
}

/// Mock buttons shared with the test through a `RefCell`, so a test can
/// raise interrupts after the handler has taken ownership.
pub struct SharedButtons<'b>(pub &'b RefCell<MockButtons>);

impl SharedButtons<'_> {
    pub fn press(&self, status: ButtonStatus) {
        let mut buttons = self.0.borrow_mut();
        buttons.pending = buttons.pending | status;
    }
}

impl ButtonPort for SharedButtons<'_> {
    fn init_buttons(&mut self) {
        self.0.borrow_mut().init_buttons();
    }

    fn set_interrupt_edge(&mut self, edge: Edge) {
        self.0.borrow_mut().set_interrupt_edge(edge);
    }

    fn enable_interrupt(&mut self) {
        self.0.borrow_mut().enable_interrupt();
    }

    fn enable_interrupt_line(&mut self) {
        self.0.borrow_mut().enable_interrupt_line();
    }

    fn enable_global_interrupts(&mut self) {
        self.0.borrow_mut().enable_global_interrupts();
    }

    fn read_interrupt_status(&mut self, masked: bool) -> ButtonStatus {
        self.0.borrow_mut().read_interrupt_status(masked)
    }

    fn clear_interrupt(&mut self, status: ButtonStatus) {
        self.0.borrow_mut().clear_interrupt(status);
    }
}

/// Raises `status` on the shared buttons.
pub fn press(buttons: &RefCell<MockButtons>, status: ButtonStatus) {
    SharedButtons(buttons).press(status);
}

// ============================================================================
// Recording Spawner
// ============================================================================

pub type TestTask<'a> = BlinkTask<'a, TickInstant, MockKernel, MockLed<'a>>;

/// Spawner that keeps the created tasks for the test to drive
pub struct RecordingSpawner<'a> {
    pub tasks: heapless::Vec<(TaskSpec, TestTask<'a>), 4>,
    fail_task: Option<&'static str>,
}

impl<'a> RecordingSpawner<'a> {
    pub fn new() -> Self {
        Self {
            tasks: heapless::Vec::new(),
            fail_task: None,
        }
    }

    /// A spawner that refuses to create the task called `name`.
    pub fn failing_on(name: &'static str) -> Self {
        Self {
            tasks: heapless::Vec::new(),
            fail_task: Some(name),
        }
    }

    pub fn specs(&self) -> heapless::Vec<TaskSpec, 4> {
        self.tasks.iter().map(|(spec, _)| *spec).collect()
    }
}

impl<'a> TaskSpawner<'a, TickInstant, MockKernel, MockLed<'a>> for RecordingSpawner<'a> {
    fn spawn(&mut self, spec: TaskSpec, task: TestTask<'a>) -> Result<(), SpawnError> {
        if self.fail_task == Some(spec.name) {
            return Err(SpawnError);
        }
        self.tasks.push((spec, task)).map_err(|_| SpawnError)
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}

/// Compare two rates with a relative tolerance
pub fn rates_equal(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-5 * b.abs().max(1.0)
}
