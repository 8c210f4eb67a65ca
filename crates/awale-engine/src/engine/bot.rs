use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Board, Decision};

/// Maximum number of authors a bot may declare.
pub const MAX_AUTHORS: usize = 2;

/// Anything that can choose moves on a board.
pub trait Player {
    /// Returns one confidence per hole of the side to move.
    ///
    /// The engine plays the legal hole with the highest finite confidence.
    fn decide(&mut self, board: &Board) -> Decision;
}

impl<P> Player for Box<P>
where
    P: Player + ?Sized,
{
    fn decide(&mut self, board: &Board) -> Decision {
        (**self).decide(board)
    }
}

/// A named participant of the ranking harness.
pub trait Bot: Player + fmt::Debug {
    fn identity(&self) -> &BotIdentity;

    /// Resets per-match transient state. Called before every match.
    fn initialize(&mut self) {}

    /// Trains the bot. Called once, after construction.
    fn learn(&mut self) {}
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("a bot has at most {MAX_AUTHORS} authors")]
pub struct TooManyAuthors;

/// Name and authors of a bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIdentity {
    name: String,
    authors: Vec<String>,
}

impl BotIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authors: vec![author.into()],
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Result<Self, TooManyAuthors> {
        if self.authors.len() >= MAX_AUTHORS {
            return Err(TooManyAuthors);
        }
        self.authors.push(author.into());
        Ok(self)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }
}

impl fmt::Display for BotIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.authors.join(" and "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_most_two_authors() {
        let identity = BotIdentity::new("bot", "Ada")
            .with_author("Grace")
            .unwrap();
        assert_eq!(identity.authors().len(), 2);
        assert_eq!(identity.to_string(), "bot (Ada and Grace)");
        assert!(identity.with_author("Linus").is_err());
    }
}
