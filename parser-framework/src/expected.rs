use common_framework::Token;
use std::fmt;

/// One expected slot: a single token type or a set of acceptable types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Type(String),
    AnyOf(Vec<String>),
}

impl Expected {
    pub fn any_of<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expected::AnyOf(types.into_iter().map(Into::into).collect())
    }

    /// Returns true if any of the token's tags is acceptable.
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Expected::Type(ty) => token.matches_type(ty),
            Expected::AnyOf(types) => types.iter().any(|ty| token.matches_type(ty)),
        }
    }
}

impl From<&str> for Expected {
    fn from(ty: &str) -> Self {
        Expected::Type(ty.to_string())
    }
}

impl From<String> for Expected {
    fn from(ty: String) -> Self {
        Expected::Type(ty)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Type(ty) => f.write_str(ty),
            Expected::AnyOf(types) => f.write_str(&types.join(", ")),
        }
    }
}
