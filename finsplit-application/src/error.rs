#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerParseError {
    MissingMembersDeclaration,
    UnknownMember { name: String, line: usize },
    DuplicateMember { name: String, line: usize },
    InvalidAmount { text: String, line: usize },
    InvalidSplit { line: usize, detail: String },
    Syntax { line: usize, detail: String },
}
