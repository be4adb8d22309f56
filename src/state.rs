/// Whether the divider is currently being dragged.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SliderMode {
    #[default]
    Default, // Pointer moves are ignored
    Move,    // Pointer moves reposition the divider
}

/// Tracks image loads and layout until the slider is ready, then latches.
#[derive(Debug, Default)]
pub struct ReadyStatus {
    images_loaded: u32,
    is_ready: bool,
    notified: bool,
}

impl ReadyStatus {
    pub fn on_image_load(&mut self) {
        self.images_loaded += 1;
    }

    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    /// Re-evaluates readiness. Returns `true` exactly once: on the call where the
    /// slider first becomes ready and the ready notification is still pending.
    pub fn settle(&mut self, width: Option<f32>, has_container: bool) -> bool {
        let width_known = width.is_some_and(|w| w > 0.0);
        if !self.is_ready && self.images_loaded >= 2 && width_known && has_container {
            self.is_ready = true;
        }
        if self.is_ready && !self.notified {
            self.notified = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_after_loads_then_width() {
        let mut status = ReadyStatus::default();
        status.on_image_load();
        status.on_image_load();
        assert!(!status.settle(None, true));
        assert!(status.settle(Some(300.0), true));
        assert!(status.is_ready());
        assert!(!status.settle(Some(300.0), true));
    }

    #[test]
    fn ready_after_width_then_loads() {
        let mut status = ReadyStatus::default();
        assert!(!status.settle(Some(300.0), true));
        status.on_image_load();
        assert!(!status.settle(Some(300.0), true));
        status.on_image_load();
        assert!(status.settle(Some(300.0), true));
    }

    #[test]
    fn zero_width_or_missing_container_is_not_ready() {
        let mut status = ReadyStatus::default();
        status.on_image_load();
        status.on_image_load();
        assert!(!status.settle(Some(0.0), true));
        assert!(!status.settle(Some(300.0), false));
        assert!(!status.is_ready());
    }

    #[test]
    fn readiness_never_reverts() {
        let mut status = ReadyStatus::default();
        status.on_image_load();
        status.on_image_load();
        assert!(status.settle(Some(300.0), true));
        assert!(!status.settle(None, false));
        assert!(status.is_ready());
    }
}
