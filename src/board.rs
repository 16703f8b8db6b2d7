//! Board support seams: the status LED and the push-button interrupt group.
//!
//! A board port implements [`RgbLed`] and [`ButtonPort`] on top of its GPIO
//! driver. Nothing in this crate touches registers directly.

use palette::Srgb;

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your LED hardware (GPIO, PWM, SPI, etc.) to allow
/// the consumer task to drive it.
pub trait RgbLed {
    /// Sets the LED to the specified RGB color.
    ///
    /// Color components are in the range 0.0-1.0. A GPIO-driven LED should
    /// treat any non-zero component as "pin high". Handle any hardware errors
    /// internally - this method cannot fail.
    fn set_color(&mut self, color: Srgb);
}

/// Signal edge that triggers a button interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Falling,
    Rising,
    Both,
}

/// Pending-interrupt bits of the button group.
///
/// The bit layout follows the evaluation board: the right switch sits on pin 0
/// and the left switch on pin 4 of the same GPIO port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonStatus(pub u8);

impl ButtonStatus {
    /// Button A (right switch): lengthens the blink timing.
    pub const SLOW_DOWN: ButtonStatus = ButtonStatus(1 << 0);
    /// Button B (left switch): shortens the blink timing.
    pub const SPEED_UP: ButtonStatus = ButtonStatus(1 << 4);
    /// Both buttons.
    pub const ALL: ButtonStatus = ButtonStatus(Self::SLOW_DOWN.0 | Self::SPEED_UP.0);
    /// Nothing pending.
    pub const NONE: ButtonStatus = ButtonStatus(0);

    /// Returns true if every bit of `other` is set in `self`.
    #[inline]
    pub fn contains(self, other: ButtonStatus) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for ButtonStatus {
    type Output = ButtonStatus;

    fn bitor(self, rhs: ButtonStatus) -> ButtonStatus {
        ButtonStatus(self.0 | rhs.0)
    }
}

/// Trait for abstracting the button GPIO group and its interrupt wiring.
///
/// The configuration methods are called once from bootstrap, in declaration
/// order. The servicing methods are called from interrupt context and must
/// not block.
pub trait ButtonPort {
    /// Configures the button pins as pulled-up inputs.
    fn init_buttons(&mut self);

    /// Selects which edge raises the group interrupt.
    fn set_interrupt_edge(&mut self, edge: Edge);

    /// Unmasks the interrupt for the button pins in the GPIO peripheral.
    fn enable_interrupt(&mut self);

    /// Enables the GPIO port's line in the interrupt controller.
    fn enable_interrupt_line(&mut self);

    /// Enables interrupts globally.
    fn enable_global_interrupts(&mut self);

    /// Reads the group's interrupt status. `masked` selects the masked status.
    fn read_interrupt_status(&mut self, masked: bool) -> ButtonStatus;

    /// Acknowledges the interrupts given in `status`.
    fn clear_interrupt(&mut self, status: ButtonStatus);
}
