//! Tests for Mode State.

#[cfg(test)]
mod tests {
    use super::super::mode::{resolve_mode_switch, ActiveMode, ModeTracker, MovementMode};
    use crate::input::ModeSwitchEdges;

    #[test]
    fn test_switch_mode_overwrites() {
        let mut active = ActiveMode::default();
        assert_eq!(active.mode, MovementMode::Direct);

        assert_eq!(active.switch_mode(MovementMode::Navigate), Some(MovementMode::Direct));
        assert_eq!(active.mode, MovementMode::Navigate);

        // Любой режим достижим из любого
        assert_eq!(active.switch_mode(MovementMode::Direct), Some(MovementMode::Navigate));
        assert_eq!(active.switch_mode(MovementMode::DualStick), Some(MovementMode::Direct));
    }

    #[test]
    fn test_switch_mode_idempotent() {
        let mut active = ActiveMode::new(MovementMode::DualStick);
        assert_eq!(active.switch_mode(MovementMode::DualStick), None);
        assert_eq!(active.mode, MovementMode::DualStick);
    }

    #[test]
    fn test_no_edges_keeps_current() {
        let edges = ModeSwitchEdges::default();
        assert_eq!(
            resolve_mode_switch(MovementMode::Navigate, &edges),
            MovementMode::Navigate
        );
    }

    #[test]
    fn test_last_edge_wins() {
        // Navigate и DualStick в одном кадре → DualStick (ascending order)
        let mut edges = ModeSwitchEdges::default();
        edges.press(MovementMode::DualStick);
        edges.press(MovementMode::Navigate);

        assert_eq!(
            resolve_mode_switch(MovementMode::Direct, &edges),
            MovementMode::DualStick
        );
    }

    #[test]
    fn test_all_edges_resolve_to_highest() {
        let mut edges = ModeSwitchEdges::default();
        for mode in MovementMode::ALL {
            edges.press(mode);
        }
        assert_eq!(
            resolve_mode_switch(MovementMode::Navigate, &edges),
            MovementMode::DualStick
        );
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("direct".parse::<MovementMode>().ok(), Some(MovementMode::Direct));
        assert_eq!("Click".parse::<MovementMode>().ok(), Some(MovementMode::Navigate));
        assert_eq!("dual-stick".parse::<MovementMode>().ok(), Some(MovementMode::DualStick));
        assert_eq!("mobile".parse::<MovementMode>().ok(), Some(MovementMode::DualStick));
        assert!("hover".parse::<MovementMode>().is_err());
    }

    #[test]
    fn test_mode_display_roundtrips_through_parse() {
        for mode in MovementMode::ALL {
            assert_eq!(mode.to_string().parse::<MovementMode>().ok(), Some(mode));
        }
    }

    #[test]
    fn test_tracker_first_observation_is_silent() {
        let mut tracker = ModeTracker::default();
        assert_eq!(tracker.observe(MovementMode::Navigate), None);
        assert_eq!(tracker.last, Some(MovementMode::Navigate));
    }

    #[test]
    fn test_tracker_reports_any_change() {
        let mut tracker = ModeTracker::default();
        tracker.observe(MovementMode::Navigate);

        assert_eq!(tracker.observe(MovementMode::Navigate), None);
        assert_eq!(tracker.observe(MovementMode::Direct), Some(MovementMode::Navigate));
        assert_eq!(tracker.observe(MovementMode::DualStick), Some(MovementMode::Direct));
        assert_eq!(tracker.last, Some(MovementMode::DualStick));
    }
}
