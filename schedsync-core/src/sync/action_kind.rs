use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Insert,
    Delete,
}

impl ActionKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            ActionKind::Insert => "+",
            ActionKind::Delete => "-",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
