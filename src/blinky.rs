//! Bootstrap: queue, tasks and interrupt wiring.
//!
//! Startup is split in two so that the tasks can borrow the shared state:
//!
//! 1. [`Blinky::new`] validates the configuration and creates the queue. If
//!    the queue cannot be allocated it fails and nothing else happens.
//! 2. [`Blinky::start`] hands both tasks to the kernel through a
//!    [`TaskSpawner`], configures the button interrupt and returns the
//!    [`ButtonHandler`] for the port to call from its interrupt vector.
//!
//! After `start` returns, the port enters its scheduler's run loop.

use core::marker::PhantomData;

use defmt_or_log as log;

use crate::board::{ButtonPort, RgbLed};
use crate::button::ButtonHandler;
use crate::config::BlinkConfig;
use crate::consumer::Consumer;
use crate::kernel::{Kernel, SpawnError, TaskSpec};
use crate::producer::Producer;
use crate::rate::RateFactor;
use crate::time::TimeInstant;
use crate::types::{BlinkError, CONSUMER_PARAMETER, PRODUCER_PARAMETER};

/// Debug name of the producer task.
pub const PRODUCER_NAME: &str = "TX";

/// Debug name of the consumer task.
pub const CONSUMER_NAME: &str = "Rx";

/// One of the two demo tasks, ready to be run by a kernel thread.
pub enum BlinkTask<'a, I: TimeInstant, K: Kernel<I>, L: RgbLed> {
    Producer(Producer<'a, I, K>),
    Consumer(Consumer<'a, I, K, L>),
}

impl<'a, I: TimeInstant, K: Kernel<I>, L: RgbLed> BlinkTask<'a, I, K, L> {
    pub fn name(&self) -> &'static str {
        match self {
            BlinkTask::Producer(_) => PRODUCER_NAME,
            BlinkTask::Consumer(_) => CONSUMER_NAME,
        }
    }

    /// The parameter this task expects the kernel to hand back at entry.
    pub fn expected_parameter(&self) -> u32 {
        match self {
            BlinkTask::Producer(_) => PRODUCER_PARAMETER,
            BlinkTask::Consumer(_) => CONSUMER_PARAMETER,
        }
    }

    /// Checks the parameter the kernel handed to the task entry point.
    ///
    /// # Errors
    /// `ParameterMismatch` if it differs from
    /// [`expected_parameter`](Self::expected_parameter).
    pub fn check_parameter(&self, parameter: u32) -> Result<(), BlinkError> {
        let expected = self.expected_parameter();
        if parameter != expected {
            return Err(BlinkError::ParameterMismatch {
                task: self.name(),
                expected,
                actual: parameter,
            });
        }
        Ok(())
    }

    /// Task entry point. Runs forever.
    ///
    /// # Panics
    /// Panics if `parameter` fails [`check_parameter`](Self::check_parameter),
    /// and whenever the task itself hits a fatal error.
    pub fn run(self, parameter: u32) -> ! {
        if let Err(err) = self.check_parameter(parameter) {
            log::error!("{}", err);
            panic!("{}", err);
        }

        match self {
            BlinkTask::Producer(producer) => producer.run(),
            BlinkTask::Consumer(consumer) => consumer.run(),
        }
    }
}

/// Creates kernel tasks.
///
/// A port stores or starts `task` and later calls
/// [`BlinkTask::run`] with `spec.parameter` from the new task's context.
pub trait TaskSpawner<'a, I: TimeInstant, K: Kernel<I>, L: RgbLed> {
    fn spawn(&mut self, spec: TaskSpec, task: BlinkTask<'a, I, K, L>) -> Result<(), SpawnError>;
}

/// The demo's shared state: the signal queue, the rate factor and the
/// configuration everything is built from.
pub struct Blinky<I: TimeInstant, K: Kernel<I>> {
    queue: K::Queue,
    rate: RateFactor,
    config: BlinkConfig<I::Duration>,
    _instant: PhantomData<I>,
}

impl<I: TimeInstant, K: Kernel<I>> Blinky<I, K> {
    /// Validates `config` and creates the signal queue.
    ///
    /// # Errors
    /// * `InvalidConfig` - `config` failed [`BlinkConfig::validate`]
    /// * `QueueCreation` - The kernel could not allocate the queue
    pub fn new(kernel: &K, config: BlinkConfig<I::Duration>) -> Result<Self, BlinkError> {
        config.validate()?;

        let Some(queue) = kernel.create_queue() else {
            log::error!("signal queue allocation failed, not starting tasks");
            return Err(BlinkError::QueueCreation);
        };

        Ok(Self {
            queue,
            rate: RateFactor::new(config.initial_rate, config.rate_limits),
            config,
            _instant: PhantomData,
        })
    }

    /// Creates both tasks, consumer first, and enables the button interrupt.
    ///
    /// Returns the handler the port must call from the button interrupt. Its
    /// debounce window is measured from [`TimeInstant::ZERO`], the tick count
    /// at reset, not from the time of this call.
    ///
    /// # Errors
    /// `Spawn` naming the first task the kernel refused. The button interrupt
    /// is left disabled in that case.
    pub fn start<'a, S, L, B>(
        &'a self,
        kernel: &'a K,
        spawner: &mut S,
        led: L,
        buttons: B,
    ) -> Result<ButtonHandler<'a, I, K, B>, BlinkError>
    where
        S: TaskSpawner<'a, I, K, L>,
        L: RgbLed,
        B: ButtonPort,
    {
        let consumer = Consumer::new(
            kernel,
            &self.queue,
            &self.rate,
            led,
            self.config.base_on_duration,
            self.config.on_color,
            self.config.off_color,
        );
        spawner
            .spawn(self.consumer_spec(), BlinkTask::Consumer(consumer))
            .map_err(|SpawnError| BlinkError::Spawn {
                task: CONSUMER_NAME,
            })?;

        let producer = Producer::new(kernel, &self.queue, &self.rate, self.config.base_period);
        spawner
            .spawn(self.producer_spec(), BlinkTask::Producer(producer))
            .map_err(|SpawnError| BlinkError::Spawn {
                task: PRODUCER_NAME,
            })?;

        let mut handler = ButtonHandler::new(
            kernel,
            buttons,
            &self.rate,
            I::ZERO,
            self.config.debounce_window,
            self.config.debounce_policy,
            self.config.rate_step,
        );
        handler.configure();

        log::info!("blinky started");
        Ok(handler)
    }

    pub fn producer_spec(&self) -> TaskSpec {
        TaskSpec {
            name: PRODUCER_NAME,
            priority: self.config.producer_priority,
            stack_words: self.config.stack_words,
            parameter: PRODUCER_PARAMETER,
        }
    }

    pub fn consumer_spec(&self) -> TaskSpec {
        TaskSpec {
            name: CONSUMER_NAME,
            priority: self.config.consumer_priority,
            stack_words: self.config.stack_words,
            parameter: CONSUMER_PARAMETER,
        }
    }

    /// Returns the shared rate factor.
    pub fn rate(&self) -> &RateFactor {
        &self.rate
    }

    /// Returns the signal queue.
    pub fn queue(&self) -> &K::Queue {
        &self.queue
    }

    pub fn config(&self) -> &BlinkConfig<I::Duration> {
        &self.config
    }
}
