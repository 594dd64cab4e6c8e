use serde::Serialize;

/// Declarative transition parameters for the product card. The values are
/// injected into the page template as CSS custom properties, so the
/// animation stays a pure function of this block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageMotion {
    /// Page fade-in and card entrance duration, in seconds.
    pub duration_secs: f64,
    /// Scale the card enters from before settling at 1.0.
    pub card_enter_scale: f64,
    /// Scale applied to the card while hovered.
    pub card_hover_scale: f64,
    /// Upward card travel on hover, in pixels.
    pub card_hover_lift_px: u32,
    pub button_hover_scale: f64,
    pub button_press_scale: f64,
}

impl Default for PageMotion {
    fn default() -> Self {
        Self {
            duration_secs: 0.5,
            card_enter_scale: 0.9,
            card_hover_scale: 1.05,
            card_hover_lift_px: 10,
            button_hover_scale: 1.1,
            button_press_scale: 0.95,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageMotion;

    #[test]
    fn default_motion_matches_page_design() {
        let motion = PageMotion::default();
        assert_eq!(motion.duration_secs, 0.5);
        assert_eq!(motion.card_enter_scale, 0.9);
        assert_eq!(motion.card_hover_scale, 1.05);
        assert_eq!(motion.card_hover_lift_px, 10);
    }
}
