//! Reserved and contextual keywords of Java 21
//!
//! Both sets are closed and disjoint. Classification is by exact spelling;
//! whether a contextual keyword acts as a keyword is left to the parser.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unconditionally reserved keywords, including `_`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Underscore,
    Abstract,
    Assert,
    Boolean,
    Break,
    Byte,
    Case,
    Catch,
    Char,
    Class,
    Const,
    Continue,
    Default,
    Do,
    Double,
    Else,
    Enum,
    Extends,
    Final,
    Finally,
    Float,
    For,
    Goto,
    If,
    Implements,
    Import,
    Instanceof,
    Int,
    Interface,
    Long,
    Native,
    New,
    Package,
    Private,
    Protected,
    Public,
    Return,
    Short,
    Static,
    Strictfp,
    Super,
    Switch,
    Synchronized,
    This,
    Throw,
    Throws,
    Transient,
    Try,
    Void,
    Volatile,
    While,
}

impl Keyword {
    pub const ALL: [Keyword; 51] = [
        Self::Underscore,
        Self::Abstract,
        Self::Assert,
        Self::Boolean,
        Self::Break,
        Self::Byte,
        Self::Case,
        Self::Catch,
        Self::Char,
        Self::Class,
        Self::Const,
        Self::Continue,
        Self::Default,
        Self::Do,
        Self::Double,
        Self::Else,
        Self::Enum,
        Self::Extends,
        Self::Final,
        Self::Finally,
        Self::Float,
        Self::For,
        Self::Goto,
        Self::If,
        Self::Implements,
        Self::Import,
        Self::Instanceof,
        Self::Int,
        Self::Interface,
        Self::Long,
        Self::Native,
        Self::New,
        Self::Package,
        Self::Private,
        Self::Protected,
        Self::Public,
        Self::Return,
        Self::Short,
        Self::Static,
        Self::Strictfp,
        Self::Super,
        Self::Switch,
        Self::Synchronized,
        Self::This,
        Self::Throw,
        Self::Throws,
        Self::Transient,
        Self::Try,
        Self::Void,
        Self::Volatile,
        Self::While,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Underscore => "_",
            Self::Abstract => "abstract",
            Self::Assert => "assert",
            Self::Boolean => "boolean",
            Self::Break => "break",
            Self::Byte => "byte",
            Self::Case => "case",
            Self::Catch => "catch",
            Self::Char => "char",
            Self::Class => "class",
            Self::Const => "const",
            Self::Continue => "continue",
            Self::Default => "default",
            Self::Do => "do",
            Self::Double => "double",
            Self::Else => "else",
            Self::Enum => "enum",
            Self::Extends => "extends",
            Self::Final => "final",
            Self::Finally => "finally",
            Self::Float => "float",
            Self::For => "for",
            Self::Goto => "goto",
            Self::If => "if",
            Self::Implements => "implements",
            Self::Import => "import",
            Self::Instanceof => "instanceof",
            Self::Int => "int",
            Self::Interface => "interface",
            Self::Long => "long",
            Self::Native => "native",
            Self::New => "new",
            Self::Package => "package",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Public => "public",
            Self::Return => "return",
            Self::Short => "short",
            Self::Static => "static",
            Self::Strictfp => "strictfp",
            Self::Super => "super",
            Self::Switch => "switch",
            Self::Synchronized => "synchronized",
            Self::This => "this",
            Self::Throw => "throw",
            Self::Throws => "throws",
            Self::Transient => "transient",
            Self::Try => "try",
            Self::Void => "void",
            Self::Volatile => "volatile",
            Self::While => "while",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "_" => Some(Self::Underscore),
            "abstract" => Some(Self::Abstract),
            "assert" => Some(Self::Assert),
            "boolean" => Some(Self::Boolean),
            "break" => Some(Self::Break),
            "byte" => Some(Self::Byte),
            "case" => Some(Self::Case),
            "catch" => Some(Self::Catch),
            "char" => Some(Self::Char),
            "class" => Some(Self::Class),
            "const" => Some(Self::Const),
            "continue" => Some(Self::Continue),
            "default" => Some(Self::Default),
            "do" => Some(Self::Do),
            "double" => Some(Self::Double),
            "else" => Some(Self::Else),
            "enum" => Some(Self::Enum),
            "extends" => Some(Self::Extends),
            "final" => Some(Self::Final),
            "finally" => Some(Self::Finally),
            "float" => Some(Self::Float),
            "for" => Some(Self::For),
            "goto" => Some(Self::Goto),
            "if" => Some(Self::If),
            "implements" => Some(Self::Implements),
            "import" => Some(Self::Import),
            "instanceof" => Some(Self::Instanceof),
            "int" => Some(Self::Int),
            "interface" => Some(Self::Interface),
            "long" => Some(Self::Long),
            "native" => Some(Self::Native),
            "new" => Some(Self::New),
            "package" => Some(Self::Package),
            "private" => Some(Self::Private),
            "protected" => Some(Self::Protected),
            "public" => Some(Self::Public),
            "return" => Some(Self::Return),
            "short" => Some(Self::Short),
            "static" => Some(Self::Static),
            "strictfp" => Some(Self::Strictfp),
            "super" => Some(Self::Super),
            "switch" => Some(Self::Switch),
            "synchronized" => Some(Self::Synchronized),
            "this" => Some(Self::This),
            "throw" => Some(Self::Throw),
            "throws" => Some(Self::Throws),
            "transient" => Some(Self::Transient),
            "try" => Some(Self::Try),
            "void" => Some(Self::Void),
            "volatile" => Some(Self::Volatile),
            "while" => Some(Self::While),
            _ => None,
        }
    }

    /// Reserved words with no current meaning in the language
    pub const fn is_unused(self) -> bool {
        matches!(self, Self::Const | Self::Goto)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restricted identifiers and contextual keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextualKeyword {
    Exports,
    Module,
    NonSealed,
    Open,
    Opens,
    Permits,
    Provides,
    Record,
    Requires,
    Sealed,
    To,
    Transitive,
    Uses,
    Var,
    When,
    With,
    Yield,
}

impl ContextualKeyword {
    pub const ALL: [ContextualKeyword; 17] = [
        Self::Exports,
        Self::Module,
        Self::NonSealed,
        Self::Open,
        Self::Opens,
        Self::Permits,
        Self::Provides,
        Self::Record,
        Self::Requires,
        Self::Sealed,
        Self::To,
        Self::Transitive,
        Self::Uses,
        Self::Var,
        Self::When,
        Self::With,
        Self::Yield,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exports => "exports",
            Self::Module => "module",
            Self::NonSealed => "non-sealed",
            Self::Open => "open",
            Self::Opens => "opens",
            Self::Permits => "permits",
            Self::Provides => "provides",
            Self::Record => "record",
            Self::Requires => "requires",
            Self::Sealed => "sealed",
            Self::To => "to",
            Self::Transitive => "transitive",
            Self::Uses => "uses",
            Self::Var => "var",
            Self::When => "when",
            Self::With => "with",
            Self::Yield => "yield",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "exports" => Some(Self::Exports),
            "module" => Some(Self::Module),
            "non-sealed" => Some(Self::NonSealed),
            "open" => Some(Self::Open),
            "opens" => Some(Self::Opens),
            "permits" => Some(Self::Permits),
            "provides" => Some(Self::Provides),
            "record" => Some(Self::Record),
            "requires" => Some(Self::Requires),
            "sealed" => Some(Self::Sealed),
            "to" => Some(Self::To),
            "transitive" => Some(Self::Transitive),
            "uses" => Some(Self::Uses),
            "var" => Some(Self::Var),
            "when" => Some(Self::When),
            "with" => Some(Self::With),
            "yield" => Some(Self::Yield),
            _ => None,
        }
    }

    /// Keywords that only appear in module declarations
    pub const fn is_module_directive(self) -> bool {
        matches!(
            self,
            Self::Exports
                | Self::Module
                | Self::Open
                | Self::Opens
                | Self::Provides
                | Self::Requires
                | Self::To
                | Self::Transitive
                | Self::Uses
                | Self::With
        )
    }
}

impl fmt::Display for ContextualKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_reserved_keyword(word: &str) -> bool {
    Keyword::from_str(word).is_some()
}

pub fn is_contextual_keyword(word: &str) -> bool {
    ContextualKeyword::from_str(word).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spellings_round_trip() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_str(keyword.as_str()), Some(keyword));
        }
        for keyword in ContextualKeyword::ALL {
            assert_eq!(ContextualKeyword::from_str(keyword.as_str()), Some(keyword));
        }
    }

    #[test]
    fn sets_are_disjoint() {
        for keyword in ContextualKeyword::ALL {
            assert!(!is_reserved_keyword(keyword.as_str()), "{}", keyword);
        }
    }

    #[test]
    fn literals_and_case_variants_are_not_keywords() {
        for word in ["true", "false", "null", "Class", "WHILE", "nonsealed", "non"] {
            assert!(!is_reserved_keyword(word), "{}", word);
            assert!(!is_contextual_keyword(word), "{}", word);
        }
        assert!(is_contextual_keyword("non-sealed"));
        assert!(Keyword::Goto.is_unused());
        assert!(ContextualKeyword::Requires.is_module_directive());
        assert!(!ContextualKeyword::Record.is_module_directive());
    }
}
