use super::rng::Rng;
use super::route::Route;
use super::sequence::{characters, next_character, random_character, Category, Mode};
use crate::api::content::{to_upper, CaseMode, PracticeContent};

/// Longest word accepted for word practice.
pub const MAX_WORD_LEN: usize = 12;

/// Trim, uppercase and cap a typed word. Empty input is rejected.
pub fn normalize_word(input: &str) -> Option<String> {
    let word: String = input.trim().chars().map(to_upper).take(MAX_WORD_LEN).collect();
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

/// What the tracing screen is currently showing and how it advances.
///
/// Hosts drive the board from this: after every call that changes the
/// template, feed [`PracticeSession::content`] to the board; when
/// [`PracticeSession::clear_count`] changes, request an ink clear.
pub struct PracticeSession {
    category: Category,
    mode: Mode,
    case: CaseMode,
    word: Option<String>,
    current: char,
    clear_count: u32,
    rng: Rng,
}

impl PracticeSession {
    /// Start a letters or numbers session.
    pub fn new(category: Category, mode: Mode, case: CaseMode, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let first = match mode {
            Mode::Random => random_character(&mut rng, category, case, None),
            Mode::Sequence => characters(category, case).first().copied(),
        };
        Self {
            category,
            mode,
            case,
            word: None,
            current: first.unwrap_or('A'),
            clear_count: 0,
            rng,
        }
    }

    /// Start a word session. The word is shown whole.
    pub fn for_word(word: impl Into<String>) -> Self {
        Self {
            category: Category::Words,
            mode: Mode::Sequence,
            case: CaseMode::Uppercase,
            word: Some(word.into()),
            current: 'A',
            clear_count: 0,
            rng: Rng::new(1),
        }
    }

    /// The session a tracing route opens. Selection screens have none.
    pub fn from_route(route: &Route, seed: u64) -> Option<Self> {
        match route {
            Route::Tracing { category, mode, case } if *category != Category::Words => {
                Some(Self::new(*category, *mode, *case, seed))
            }
            Route::WordTracing { word } => normalize_word(word).map(Self::for_word),
            _ => None,
        }
    }

    /// The route that reopens this session.
    pub fn route(&self) -> Route {
        match &self.word {
            Some(word) => Route::WordTracing { word: word.clone() },
            None => Route::Tracing {
                category: self.category,
                mode: self.mode,
                case: self.case,
            },
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn case(&self) -> CaseMode {
        self.case
    }

    pub fn current_character(&self) -> char {
        self.current
    }

    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// Incremented whenever the ink must be wiped.
    pub fn clear_count(&self) -> u32 {
        self.clear_count
    }

    /// The template for the board.
    pub fn content(&self) -> PracticeContent {
        match &self.word {
            Some(word) => PracticeContent::word(word.clone()),
            None => PracticeContent::character(self.current, self.case),
        }
    }

    /// Advance to the next character (sequence or random) and wipe the ink.
    /// Word sessions keep their word and only wipe.
    pub fn next(&mut self) {
        if self.word.is_none() {
            let next = match self.mode {
                Mode::Random => {
                    random_character(&mut self.rng, self.category, self.case, Some(self.current))
                }
                Mode::Sequence => next_character(self.current, self.category, self.case),
            };
            if let Some(c) = next {
                self.current = c;
            }
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        self.clear_count = self.clear_count.wrapping_add(1);
    }

    /// Cycle uppercase → lowercase → both and re-case the current character.
    /// Only letter sessions have a case.
    pub fn toggle_case(&mut self) {
        if self.category != Category::Letters {
            return;
        }
        self.case = self.case.cycle();
        self.current = self.case.apply(self.current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_typed_word() {
        assert_eq!(normalize_word("  casa "), Some("CASA".to_string()));
        assert_eq!(normalize_word("   "), None);
        assert_eq!(normalize_word("abcdefghijklmnop").unwrap().len(), MAX_WORD_LEN);
        assert_eq!(normalize_word("maçã"), Some("MAÇÃ".to_string()));
    }

    #[test]
    fn sequence_session_starts_at_first() {
        let s = PracticeSession::new(Category::Letters, Mode::Sequence, CaseMode::Lowercase, 1);
        assert_eq!(s.current_character(), 'a');
        assert_eq!(s.content(), PracticeContent::character('a', CaseMode::Lowercase));
    }

    #[test]
    fn next_advances_and_clears() {
        let mut s = PracticeSession::new(Category::Numbers, Mode::Sequence, CaseMode::Uppercase, 1);
        s.next();
        assert_eq!(s.current_character(), '1');
        assert_eq!(s.clear_count(), 1);
    }

    #[test]
    fn random_session_does_not_repeat() {
        let mut s = PracticeSession::new(Category::Letters, Mode::Random, CaseMode::Uppercase, 99);
        for _ in 0..50 {
            let before = s.current_character();
            s.next();
            assert_ne!(s.current_character(), before);
        }
    }

    #[test]
    fn toggle_case_recases_character() {
        let mut s = PracticeSession::new(Category::Letters, Mode::Sequence, CaseMode::Uppercase, 1);
        s.next(); // B
        s.toggle_case();
        assert_eq!(s.case(), CaseMode::Lowercase);
        assert_eq!(s.current_character(), 'b');
        s.toggle_case();
        assert_eq!(s.case(), CaseMode::Both);
        assert_eq!(s.current_character(), 'B');
        assert!(s.content().is_dual_case());
        s.toggle_case();
        assert_eq!(s.case(), CaseMode::Uppercase);
    }

    #[test]
    fn numbers_ignore_case_toggle() {
        let mut s = PracticeSession::new(Category::Numbers, Mode::Sequence, CaseMode::Uppercase, 1);
        s.toggle_case();
        assert_eq!(s.case(), CaseMode::Uppercase);
    }

    #[test]
    fn word_session_keeps_word() {
        let mut s = PracticeSession::for_word("GATO");
        s.next();
        assert_eq!(s.content(), PracticeContent::word("GATO"));
        assert_eq!(s.clear_count(), 1);
        s.toggle_case();
        assert_eq!(s.word(), Some("GATO"));
    }

    #[test]
    fn tracing_routes_open_sessions() {
        let route = Route::parse("#/letters/sequence/lowercase");
        let s = PracticeSession::from_route(&route, 7).unwrap();
        assert_eq!(s.content(), PracticeContent::character('a', CaseMode::Lowercase));
        assert_eq!(s.route(), route);

        let word = PracticeSession::from_route(&Route::parse("#/words/sol"), 7).unwrap();
        assert_eq!(word.content(), PracticeContent::word("SOL"));
        assert_eq!(word.route().to_hash(), "#/words/SOL");

        assert!(PracticeSession::from_route(&Route::parse("#/numbers"), 7).is_none());
        assert!(PracticeSession::from_route(&Route::parse("#/words/%20"), 7).is_none());
    }

    #[test]
    fn toggled_case_shows_in_route() {
        let mut s = PracticeSession::new(Category::Letters, Mode::Random, CaseMode::Uppercase, 3);
        s.toggle_case();
        assert_eq!(s.route().to_hash(), "#/letters/random/lowercase");
    }
}
