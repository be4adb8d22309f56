//! Viewport visibility detection for the slider container.

use raylib::prelude::*;
use crate::constants::VISIBLE_THRESHOLD;
use crate::dom::Capabilities;

pub trait VisibilityStrategy {
    /// Start watching the target.
    fn observe(&mut self);
    /// Returns `true` exactly once, when the target first becomes visible enough.
    fn check(&mut self, target: Rectangle, viewport: Rectangle) -> bool;
    fn disconnect(&mut self);
}

/// Picks the strategy once, at widget construction.
pub fn select_strategy(wants_visibility: bool, capabilities: Capabilities) -> Box<dyn VisibilityStrategy> {
    if wants_visibility && capabilities.intersection_observer {
        Box::new(IntersectionObserver::new(VISIBLE_THRESHOLD))
    } else {
        Box::new(NoopObserver)
    }
}

/// Share of `target` that lies inside `viewport`, in [0, 1].
pub fn intersection_ratio(target: Rectangle, viewport: Rectangle) -> f32 {
    let area = target.width * target.height;
    if area <= 0.0 {
        return 0.0;
    }
    let left = target.x.max(viewport.x);
    let top = target.y.max(viewport.y);
    let right = (target.x + target.width).min(viewport.x + viewport.width);
    let bottom = (target.y + target.height).min(viewport.y + viewport.height);
    let visible = (right - left).max(0.0) * (bottom - top).max(0.0);
    (visible / area).clamp(0.0, 1.0)
}

pub struct IntersectionObserver {
    threshold: f32,
    observing: bool,
}

impl IntersectionObserver {
    pub fn new(threshold: f32) -> Self {
        Self { threshold, observing: false }
    }
}

impl VisibilityStrategy for IntersectionObserver {
    fn observe(&mut self) {
        self.observing = true;
    }

    fn check(&mut self, target: Rectangle, viewport: Rectangle) -> bool {
        if !self.observing {
            return false;
        }
        if intersection_ratio(target, viewport) > self.threshold {
            self.disconnect();
            return true;
        }
        false
    }

    fn disconnect(&mut self) {
        self.observing = false;
    }
}

/// Used when nobody listens for visibility or the platform cannot tell.
pub struct NoopObserver;

impl VisibilityStrategy for NoopObserver {
    fn observe(&mut self) {}

    fn check(&mut self, _target: Rectangle, _viewport: Rectangle) -> bool {
        false
    }

    fn disconnect(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rectangle {
        Rectangle::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn ratio_of_partially_visible_target() {
        let target = Rectangle::new(0.0, 500.0, 100.0, 200.0);
        assert!((intersection_ratio(target, viewport()) - 0.5).abs() < 1e-6);
        assert_eq!(intersection_ratio(Rectangle::new(0.0, 700.0, 10.0, 10.0), viewport()), 0.0);
        assert_eq!(intersection_ratio(Rectangle::new(0.0, 0.0, 0.0, 10.0), viewport()), 0.0);
    }

    #[test]
    fn fires_once_above_threshold() {
        let mut observer = IntersectionObserver::new(VISIBLE_THRESHOLD);
        let inside = Rectangle::new(10.0, 10.0, 100.0, 100.0);
        assert!(!observer.check(inside, viewport()), "not observing yet");

        observer.observe();
        // 95% exactly is not enough
        assert!(!observer.check(Rectangle::new(0.0, 505.0, 100.0, 100.0), viewport()));
        assert!(observer.check(inside, viewport()));
        assert!(!observer.check(inside, viewport()));
    }

    #[test]
    fn unsupported_platform_gets_noop() {
        let mut strategy = select_strategy(true, Capabilities { intersection_observer: false });
        strategy.observe();
        assert!(!strategy.check(Rectangle::new(0.0, 0.0, 10.0, 10.0), viewport()));

        let mut strategy = select_strategy(false, Capabilities::default());
        strategy.observe();
        assert!(!strategy.check(Rectangle::new(0.0, 0.0, 10.0, 10.0), viewport()));
    }
}
