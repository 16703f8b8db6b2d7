//! Runs the blinky demo on the host, with std threads standing in for kernel
//! tasks and log lines standing in for the LED.
//!
//! ```text
//! RUST_LOG=info cargo run --example host_blinky --features std,log
//! ```
//!
//! A short script of button presses is replayed from the main thread, which
//! plays the role of the interrupt vector. Host threads have no priorities,
//! so the consumer is only guaranteed to drain each signal because its on
//! time is shorter than the producer's period.

use std::cell::Cell;
use std::sync::{Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use rate_blinky::{
    BLUE, BlinkConfig, BlinkError, BlinkTask, Blinky, ButtonPort, ButtonStatus, COLOR_OFF, Edge,
    GREEN, Kernel, QueueFull, RED, RgbLed, SignalQueue, SpawnError, Srgb, TaskSpawner, TaskSpec,
    TickDuration, TickInstant, TimeSource,
};

/// How long the demo runs before main returns.
const RUN_FOR_MS: u32 = 10_000;

/// (kernel time in ms, buttons raised)
const PRESS_SCRIPT: &[(u32, ButtonStatus)] = &[
    (2_500, ButtonStatus::SLOW_DOWN),
    (2_800, ButtonStatus::SLOW_DOWN),
    (3_100, ButtonStatus::SLOW_DOWN),
    (6_000, ButtonStatus::SPEED_UP),
    // Contact bounce
    (6_050, ButtonStatus::SPEED_UP),
    (6_400, ButtonStatus::SPEED_UP),
    (6_700, ButtonStatus::SPEED_UP),
];

// ============================================================================
// Kernel
// ============================================================================

/// Millisecond tick counter on top of `Instant`.
struct HostKernel {
    boot: Instant,
}

impl HostKernel {
    fn new() -> Self {
        Self {
            boot: Instant::now(),
        }
    }
}

impl TimeSource<TickInstant> for HostKernel {
    fn now(&self) -> TickInstant {
        TickInstant(self.boot.elapsed().as_millis() as u32)
    }
}

impl Kernel<TickInstant> for HostKernel {
    type Queue = HostQueue;

    fn create_queue(&self) -> Option<HostQueue> {
        Some(HostQueue::default())
    }

    fn sleep_until(&self, deadline: TickInstant) {
        let remaining = deadline.0.wrapping_sub(self.now().0);
        if remaining < u32::MAX / 2 {
            thread::sleep(Duration::from_millis(remaining.into()));
        }
    }

    fn sleep_for(&self, duration: TickDuration) {
        thread::sleep(Duration::from_millis(duration.0.into()));
    }
}

/// Single-slot queue with a blocking receive.
#[derive(Default)]
struct HostQueue {
    slot: Mutex<Option<u32>>,
    ready: Condvar,
}

impl SignalQueue for HostQueue {
    fn try_send(&self, signal: u32) -> Result<(), QueueFull> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(QueueFull(signal));
        }
        *slot = Some(signal);
        self.ready.notify_one();
        Ok(())
    }

    fn receive(&self) -> u32 {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(signal) = slot.take() {
                return signal;
            }
            slot = self
                .ready
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

type HostTask = BlinkTask<'static, TickInstant, HostKernel, ConsoleLed>;

/// Starts every task on its own named thread.
struct ThreadSpawner;

fn task_entry(task: HostTask, parameter: u32) {
    task.run(parameter)
}

impl TaskSpawner<'static, TickInstant, HostKernel, ConsoleLed> for ThreadSpawner {
    fn spawn(&mut self, spec: TaskSpec, task: HostTask) -> Result<(), SpawnError> {
        log::info!(
            "creating task {} (priority {}, parameter {:#x})",
            spec.name,
            spec.priority.0,
            spec.parameter
        );
        thread::Builder::new()
            .name(spec.name.into())
            .spawn(move || task_entry(task, spec.parameter))
            .map(|_| ())
            .map_err(|_| SpawnError)
    }
}

// ============================================================================
// Board
// ============================================================================

/// Prints each color change with the kernel time.
struct ConsoleLed {
    kernel: &'static HostKernel,
}

impl RgbLed for ConsoleLed {
    fn set_color(&mut self, color: Srgb) {
        let name = match color {
            c if c == RED => "red",
            c if c == GREEN => "green",
            c if c == BLUE => "blue",
            c if c == COLOR_OFF => "off",
            _ => "mixed",
        };
        log::info!("[{:>6} ms] LED {}", self.kernel.now().0, name);
    }
}

/// Buttons whose pending bits are raised by the press script.
struct ScriptedButtons<'p> {
    pending: &'p Cell<u8>,
}

impl ButtonPort for ScriptedButtons<'_> {
    fn init_buttons(&mut self) {
        log::debug!("buttons: pull-up inputs");
    }

    fn set_interrupt_edge(&mut self, edge: Edge) {
        log::debug!("buttons: interrupt on {:?} edge", edge);
    }

    fn enable_interrupt(&mut self) {}

    fn enable_interrupt_line(&mut self) {}

    fn enable_global_interrupts(&mut self) {
        log::debug!("interrupts enabled");
    }

    fn read_interrupt_status(&mut self, _masked: bool) -> ButtonStatus {
        ButtonStatus(self.pending.get())
    }

    fn clear_interrupt(&mut self, status: ButtonStatus) {
        self.pending.set(self.pending.get() & !status.0);
    }
}

fn sleep_until_ms(kernel: &HostKernel, at_ms: u32) {
    let now = kernel.now().0;
    thread::sleep(Duration::from_millis(at_ms.saturating_sub(now).into()));
}

fn main() -> Result<(), BlinkError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Tasks outlive main's stack frame in a real kernel; leak to match.
    let kernel: &'static HostKernel = Box::leak(Box::new(HostKernel::new()));
    let blinky: &'static Blinky<TickInstant, HostKernel> =
        Box::leak(Box::new(Blinky::new(kernel, BlinkConfig::default())?));

    let pending = Cell::new(0u8);
    let mut handler = blinky.start(
        kernel,
        &mut ThreadSpawner,
        ConsoleLed { kernel },
        ScriptedButtons { pending: &pending },
    )?;

    for &(at_ms, status) in PRESS_SCRIPT {
        sleep_until_ms(kernel, at_ms);
        pending.set(pending.get() | status.0);
        let event = handler.on_interrupt();
        log::info!("[{:>6} ms] button {:#04x}: {:?}", kernel.now().0, status.0, event);
    }

    sleep_until_ms(kernel, RUN_FOR_MS);
    log::info!("final rate factor {:.3}", blinky.rate().get());
    Ok(())
}
