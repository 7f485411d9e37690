//! One-way scroll reveal of portfolio cards.

use crate::config::RevealConfig;
use crate::state::Command;
use serde::Serialize;

/// Reveal state of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reveal {
    /// Not yet armed; no inline style applied
    Idle,
    /// Hidden and observed
    Hidden,
    /// Shown; never hidden again
    Revealed,
}

/// Inline style for a card in a given reveal state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealStyle {
    /// `opacity`
    pub opacity: &'static str,
    /// `transform`
    pub transform: String,
    /// `transition`, set when hiding
    pub transition: Option<String>,
}

impl RevealStyle {
    /// Style for `state`, or `None` when the card keeps its stylesheet look.
    #[must_use]
    pub fn for_state(state: Reveal, config: &RevealConfig) -> Option<Self> {
        match state {
            Reveal::Idle => None,
            Reveal::Hidden => Some(Self {
                opacity: "0",
                transform: format!("translateY({}px)", config.offset_px),
                transition: Some(config.transition.clone()),
            }),
            Reveal::Revealed => Some(Self {
                opacity: "1",
                transform: "translateY(0)".to_string(),
                transition: None,
            }),
        }
    }
}

/// Tracks which cards have been revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealObserver {
    items: Vec<Reveal>,
}

impl RevealObserver {
    /// Track `count` cards, all idle.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            items: vec![Reveal::Idle; count],
        }
    }

    /// Hide every idle card and start observing.
    pub fn arm<M>(&mut self) -> Command<M> {
        for state in &mut self.items {
            if *state == Reveal::Idle {
                *state = Reveal::Hidden;
            }
        }
        tracing::debug!(items = self.items.len(), "scroll reveal armed");
        Command::ObserveReveal
    }

    /// Record an intersection report. Returns whether the card was revealed now.
    pub fn intersect(&mut self, index: usize, intersecting: bool) -> bool {
        match self.items.get_mut(index) {
            Some(state) if intersecting && *state == Reveal::Hidden => {
                *state = Reveal::Revealed;
                true
            }
            _ => false,
        }
    }

    /// State of card `index`.
    #[must_use]
    pub fn state(&self, index: usize) -> Option<Reveal> {
        self.items.get(index).copied()
    }

    /// States of all cards in document order.
    #[must_use]
    pub fn states(&self) -> &[Reveal] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_hides_all_and_observes() {
        let mut observer = RevealObserver::new(3);
        assert_eq!(observer.state(0), Some(Reveal::Idle));

        let cmd: Command<()> = observer.arm();
        assert_eq!(cmd, Command::ObserveReveal);
        assert!(observer.states().iter().all(|s| *s == Reveal::Hidden));
    }

    #[test]
    fn test_reveal_is_one_way() {
        let mut observer = RevealObserver::new(2);
        let _: Command<()> = observer.arm();

        assert!(observer.intersect(1, true));
        assert!(!observer.intersect(1, false));
        assert_eq!(observer.state(1), Some(Reveal::Revealed));
        assert_eq!(observer.state(0), Some(Reveal::Hidden));
    }

    #[test]
    fn test_intersection_before_arming_ignored() {
        let mut observer = RevealObserver::new(1);
        assert!(!observer.intersect(0, true));
        assert_eq!(observer.state(0), Some(Reveal::Idle));
        assert!(!observer.intersect(7, true));
    }

    #[test]
    fn test_styles() {
        let config = RevealConfig::default();
        assert!(RevealStyle::for_state(Reveal::Idle, &config).is_none());

        let hidden = RevealStyle::for_state(Reveal::Hidden, &config).unwrap();
        assert_eq!(hidden.opacity, "0");
        assert_eq!(hidden.transform, "translateY(30px)");
        assert_eq!(
            hidden.transition.as_deref(),
            Some("opacity 0.6s ease, transform 0.6s ease")
        );

        let shown = RevealStyle::for_state(Reveal::Revealed, &config).unwrap();
        assert_eq!(shown.opacity, "1");
        assert_eq!(shown.transform, "translateY(0)");
    }
}
