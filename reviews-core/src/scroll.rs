//! Prefetch-distance heuristic for loading the next page.

/// Where a scroll gesture is heading, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollGeometry {
    pub viewport_height: f64,
    pub content_height: f64,
    /// Offset the scroll will settle at (the target, not the current position).
    pub target_offset_y: f64,
}

/// Decides whether the list is close enough to its end to fetch more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    /// How many viewport heights of content must remain below the target offset
    /// before a fetch is requested.
    pub screens_ahead: f64,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self { screens_ahead: 2.5 }
    }
}

impl ScrollTrigger {
    pub fn new(screens_ahead: f64) -> Self {
        Self { screens_ahead }
    }

    /// True when the content left below the target offset is within
    /// `screens_ahead` viewports.
    ///
    /// Content shorter than the viewport always triggers.
    pub fn should_load_next_page(&self, geometry: ScrollGeometry) -> bool {
        let remaining = geometry.content_height - geometry.viewport_height - geometry.target_offset_y;
        let threshold = geometry.viewport_height * self.screens_ahead;
        remaining <= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(viewport: f64, content: f64, offset: f64) -> ScrollGeometry {
        ScrollGeometry { viewport_height: viewport, content_height: content, target_offset_y: offset }
    }

    #[test]
    fn short_content_triggers_immediately() {
        let trigger = ScrollTrigger::default();
        assert!(trigger.should_load_next_page(geometry(800.0, 300.0, 0.0)));
        assert!(trigger.should_load_next_page(geometry(800.0, 0.0, 0.0)));
    }

    #[test]
    fn triggers_within_two_and_a_half_screens() {
        let trigger = ScrollTrigger::default();
        // remaining = 10_000 - 800 - offset, threshold = 2000.
        assert!(!trigger.should_load_next_page(geometry(800.0, 10_000.0, 7_199.0)));
        assert!(trigger.should_load_next_page(geometry(800.0, 10_000.0, 7_200.0)));
        assert!(trigger.should_load_next_page(geometry(800.0, 10_000.0, 9_200.0)));
    }

    #[test]
    fn screens_ahead_is_tunable() {
        let eager = ScrollTrigger::new(12.0);
        let lazy = ScrollTrigger::new(0.0);
        let g = geometry(800.0, 10_000.0, 0.0);
        assert!(eager.should_load_next_page(g));
        assert!(!lazy.should_load_next_page(g));
        assert!(lazy.should_load_next_page(geometry(800.0, 10_000.0, 9_200.0)));
    }
}
