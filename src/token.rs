use std::fmt;
use std::str::FromStr;

use crate::error::TokenParseError;
use crate::hierarchy::{ClassKey, DepartmentKey, NodeId, SubclassKey};

/// One saved selection path, written as `d`, `d_c` or `d_c_s` (1-based ordinals).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionToken {
    /// Department selected with no classes under it.
    Department(DepartmentKey),
    /// Class selected with no subclasses under it.
    Class(ClassKey),
    /// Fully specified subclass.
    Subclass(SubclassKey),
}

impl SelectionToken {
    /// Deepest node the token names.
    pub const fn node(self) -> NodeId {
        match self {
            Self::Department(key) => NodeId::Department(key),
            Self::Class(key) => NodeId::Class(key),
            Self::Subclass(key) => NodeId::Subclass(key),
        }
    }
}

impl From<NodeId> for SelectionToken {
    fn from(node: NodeId) -> Self {
        match node {
            NodeId::Department(key) => Self::Department(key),
            NodeId::Class(key) => Self::Class(key),
            NodeId::Subclass(key) => Self::Subclass(key),
        }
    }
}

impl fmt::Display for SelectionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Department(key) => write!(f, "{}", key.ordinal()),
            Self::Class(key) => write!(f, "{}_{}", key.department().ordinal(), key.ordinal()),
            Self::Subclass(key) => write!(
                f,
                "{}_{}_{}",
                key.department().ordinal(),
                key.class().ordinal(),
                key.ordinal()
            ),
        }
    }
}

impl FromStr for SelectionToken {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TokenParseError::Empty);
        }

        let mut ordinals = [0u16; 3];
        let mut count = 0;
        for part in s.split('_') {
            if count == ordinals.len() {
                return Err(TokenParseError::TooManyParts(s.to_string()));
            }
            ordinals[count] = parse_ordinal(s, part)?;
            count += 1;
        }

        let department = DepartmentKey::new(ordinals[0]);
        Ok(match count {
            1 => Self::Department(department),
            2 => Self::Class(department.class(ordinals[1])),
            _ => Self::Subclass(department.class(ordinals[1]).subclass(ordinals[2])),
        })
    }
}

fn parse_ordinal(token: &str, part: &str) -> Result<u16, TokenParseError> {
    match part.parse::<u16>() {
        Ok(ordinal) if ordinal >= 1 && !part.starts_with('+') => Ok(ordinal),
        _ => Err(TokenParseError::InvalidOrdinal {
            token: token.to_string(),
            part: part.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_underscore_joined_ordinals() {
        let dept = DepartmentKey::new(2);

        assert_eq!(SelectionToken::Department(dept).to_string(), "2");
        assert_eq!(SelectionToken::Class(dept.class(1)).to_string(), "2_1");
        assert_eq!(
            SelectionToken::Subclass(dept.class(1).subclass(2)).to_string(),
            "2_1_2"
        );
    }

    #[test]
    fn parses_each_depth() {
        assert_eq!(
            "10".parse(),
            Ok(SelectionToken::Department(DepartmentKey::new(10)))
        );
        assert_eq!(
            "3_2_1".parse(),
            Ok(SelectionToken::Subclass(
                DepartmentKey::new(3).class(2).subclass(1)
            ))
        );
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!("".parse::<SelectionToken>(), Err(TokenParseError::Empty));
        assert_eq!(
            "1_2_3_4".parse::<SelectionToken>(),
            Err(TokenParseError::TooManyParts("1_2_3_4".to_string()))
        );
        assert_eq!(
            "1__2".parse::<SelectionToken>(),
            Err(TokenParseError::InvalidOrdinal {
                token: "1__2".to_string(),
                part: String::new(),
            })
        );
        assert!("0".parse::<SelectionToken>().is_err());
        assert!("+1".parse::<SelectionToken>().is_err());
        assert!("1_x".parse::<SelectionToken>().is_err());
    }

    #[test]
    fn converts_from_deepest_node() {
        let leaf = NodeId::from(DepartmentKey::new(4).class(1).subclass(2));
        let token = SelectionToken::from(leaf);

        assert_eq!(token.to_string(), "4_1_2");
        assert_eq!(token.node(), leaf);
        assert_eq!(
            SelectionToken::from(NodeId::from(DepartmentKey::new(4))),
            SelectionToken::Department(DepartmentKey::new(4))
        );
    }
}
