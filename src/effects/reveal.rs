//! Reveal placeholder cards once the page has loaded

/// One-shot reveal; later load notifications are ignored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealOnLoad {
    revealed: bool,
}

impl RevealOnLoad {
    /// Returns true the first time only
    pub fn on_load(&mut self) -> bool {
        !std::mem::replace(&mut self.revealed, true)
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_once() {
        let mut reveal = RevealOnLoad::default();
        assert!(!reveal.is_revealed());
        assert!(reveal.on_load());
        assert!(!reveal.on_load());
        assert!(reveal.is_revealed());
    }
}
