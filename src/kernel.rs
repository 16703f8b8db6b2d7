//! Scheduler seams.
//!
//! The real-time kernel is an external collaborator. A port implements
//! [`Kernel`] and [`SignalQueue`] on top of its delay and queue primitives, and
//! [`TaskSpawner`](crate::blinky::TaskSpawner) on top of its task creation call.

use crate::time::{TimeInstant, TimeSource};

/// Returned by [`SignalQueue::try_send`] when the slot is already occupied.
///
/// Carries the value that could not be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull(pub u32);

/// A single-slot message queue of `u32` signals.
///
/// Implementations are shared by reference between the producer and the
/// consumer task, so both operations take `&self`.
pub trait SignalQueue {
    /// Enqueues `signal` without blocking.
    fn try_send(&self, signal: u32) -> Result<(), QueueFull>;

    /// Blocks the calling task until a signal is available, with no timeout.
    fn receive(&self) -> u32;
}

/// Kernel services used by the tasks.
///
/// The tick count comes from the [`TimeSource`] supertrait.
pub trait Kernel<I: TimeInstant>: TimeSource<I> {
    /// The kernel's queue type.
    type Queue: SignalQueue;

    /// Creates an empty queue holding at most one signal.
    ///
    /// Returns `None` if the kernel is out of memory for queues.
    fn create_queue(&self) -> Option<Self::Queue>;

    /// Suspends the calling task until the absolute time `deadline`.
    ///
    /// Returns immediately if the deadline has already passed.
    fn sleep_until(&self, deadline: I);

    /// Suspends the calling task for `duration`.
    fn sleep_for(&self, duration: I::Duration);
}

/// Kernel task priority. Higher values preempt lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Priority(pub u8);

impl Priority {
    /// The idle task's priority.
    pub const IDLE: Priority = Priority(0);

    /// Returns the priority `levels` steps above idle.
    #[inline]
    pub const fn above_idle(levels: u8) -> Priority {
        Priority(Self::IDLE.0.saturating_add(levels))
    }
}

/// Everything the kernel needs to create one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskSpec {
    /// Debug name, not used by the kernel.
    pub name: &'static str,
    pub priority: Priority,
    /// Stack size in words.
    pub stack_words: usize,
    /// Opaque parameter the kernel hands back to the task entry point.
    pub parameter: u32,
}

/// Task creation failed, typically because the kernel heap is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpawnError;
