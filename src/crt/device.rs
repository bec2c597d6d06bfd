//! The device capability the CPU drives every cycle.

/// Something the CPU can notify once per cycle.
pub trait RasterDevice {
    /// Observe the sprite position for the current cycle, then move on to
    /// the next pixel.
    fn draw_and_advance(&mut self, sprite_position: i64);
}

impl<D: RasterDevice + ?Sized> RasterDevice for &mut D {
    fn draw_and_advance(&mut self, sprite_position: i64) {
        (**self).draw_and_advance(sprite_position);
    }
}

/// A device that ignores every notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullDevice;

impl RasterDevice for NullDevice {
    fn draw_and_advance(&mut self, _sprite_position: i64) {}
}

/// Wraps a device and emits a `tracing` event for every notification.
#[derive(Debug, Clone, Default)]
pub struct LoggingDevice<D> {
    inner: D,
    notifications: u64,
}

impl<D: RasterDevice> LoggingDevice<D> {
    pub fn new(inner: D) -> Self {
        Self { inner, notifications: 0 }
    }

    /// Notifications received so far.
    pub fn notifications(&self) -> u64 {
        self.notifications
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: RasterDevice> RasterDevice for LoggingDevice<D> {
    fn draw_and_advance(&mut self, sprite_position: i64) {
        self.notifications += 1;
        tracing::trace!(
            notification = self.notifications,
            sprite_position,
            "device notified"
        );
        self.inner.draw_and_advance(sprite_position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crt::Crt;

    #[test]
    fn test_logging_device_forwards() {
        let mut device = LoggingDevice::new(Crt::new());
        device.draw_and_advance(1);
        device.draw_and_advance(1);
        device.draw_and_advance(1);

        assert_eq!(device.notifications(), 3);
        assert_eq!(device.inner().position(), (3, 0));
        assert_eq!(device.into_inner().lit_count(), 3);
    }

    #[test]
    fn test_dyn_device() {
        let mut crt = Crt::new();
        {
            let device: &mut dyn RasterDevice = &mut crt;
            device.draw_and_advance(0);
        }
        assert!(crt.pixel(0, 0));

        let mut null = NullDevice;
        null.draw_and_advance(5);
    }
}
