//! GPIO pin abstractions
//!
//! The driver uses one output pin for the active-low chip-select and one
//! input pin for the SIQ line the chip drives high when a response or
//! touch packet is ready. Implementations handle the actual hardware
//! register manipulation for the specific board.

/// Digital output pin (chip-select)
///
/// The driver asserts chip-select by driving the pin low and releases it
/// by driving it high; implementations only need to reflect the requested
/// level on the wire.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin (SIQ data-ready line)
///
/// The chip drives this line active (high) while it has a response frame
/// or touch packet waiting to be clocked out.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        T::set_high(self)
    }

    fn set_low(&mut self) {
        T::set_low(self)
    }

    fn is_set_high(&self) -> bool {
        T::is_set_high(self)
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        T::is_high(self)
    }
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&self) -> bool {
        T::is_high(self)
    }
}
