/// Wire envelope parsing and the closed set of wall actions
///
/// A payload is `<kind> ~ ~ <body>`: two fields joined by a fixed delimiter.
/// There is no escaping, so a body containing the delimiter makes the payload
/// malformed.
use std::fmt;

use crate::errors::EnvelopeError;

/// Field separator on the wire (space, tilde, space, tilde, space)
pub const DELIMITER: &str = " ~ ~ ";

// ============================================================================
// ENVELOPE
// ============================================================================

/// A parsed `(kind, body)` pair borrowing from the raw payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    pub kind: &'a str,
    pub body: &'a str,
}

impl<'a> Envelope<'a> {
    /// Split a raw payload into kind and body
    ///
    /// Exactly one delimiter occurrence is required. Payloads that are not
    /// UTF-8 are rejected as malformed.
    pub fn parse(payload: &'a [u8]) -> Result<Self, EnvelopeError> {
        let text = std::str::from_utf8(payload).map_err(|_| EnvelopeError::InvalidUtf8)?;

        let mut parts = text.split(DELIMITER);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(kind), Some(body), None) => Ok(Self { kind, body }),
            _ => Err(EnvelopeError::BadSplit {
                parts: text.split(DELIMITER).count(),
            }),
        }
    }

    /// The action this envelope names, `None` for unknown kinds
    pub fn action(&self) -> Option<Action> {
        Action::from_kind(self.kind)
    }

    /// Join kind and body in wire format
    ///
    /// Neither field is escaped.
    pub fn to_wire(kind: &str, body: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(kind.len() + DELIMITER.len() + body.len());
        out.extend_from_slice(kind.as_bytes());
        out.extend_from_slice(DELIMITER.as_bytes());
        out.extend_from_slice(body.as_bytes());
        out
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Actions scoped to the connection that sent them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionAction {
    Init,
    AddWall,
}

/// Actions whose effects are broadcast to a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallAction {
    AddCard,
    DeleteCard,
    AddBoard,
    ChangeWallName,
    ChangeBoardName,
    ChangeCardTitle,
    ChangeCardDetails,
    MoveCard,
    AddChecklistItem,
    UpdateChecklistItem,
    DeleteChecklistItem,
}

/// Every recognized message kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Connection(ConnectionAction),
    Wall(WallAction),
}

impl ConnectionAction {
    pub const ALL: [ConnectionAction; 2] = [ConnectionAction::Init, ConnectionAction::AddWall];

    pub fn kind(&self) -> &'static str {
        match self {
            ConnectionAction::Init => "init",
            ConnectionAction::AddWall => "addWall",
        }
    }
}

impl WallAction {
    pub const ALL: [WallAction; 11] = [
        WallAction::AddCard,
        WallAction::DeleteCard,
        WallAction::AddBoard,
        WallAction::ChangeWallName,
        WallAction::ChangeBoardName,
        WallAction::ChangeCardTitle,
        WallAction::ChangeCardDetails,
        WallAction::MoveCard,
        WallAction::AddChecklistItem,
        WallAction::UpdateChecklistItem,
        WallAction::DeleteChecklistItem,
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            WallAction::AddCard => "addCard",
            WallAction::DeleteCard => "deleteCard",
            WallAction::AddBoard => "addBoard",
            WallAction::ChangeWallName => "changeWallName",
            WallAction::ChangeBoardName => "changeBoardName",
            WallAction::ChangeCardTitle => "changeCardTitle",
            WallAction::ChangeCardDetails => "changeCardDetails",
            WallAction::MoveCard => "moveCard",
            WallAction::AddChecklistItem => "addChecklistItem",
            WallAction::UpdateChecklistItem => "updateChecklistItem",
            WallAction::DeleteChecklistItem => "deleteChecklistItem",
        }
    }
}

impl Action {
    /// Look up an action by its wire kind (case-sensitive)
    pub fn from_kind(kind: &str) -> Option<Self> {
        let action = match kind {
            "init" => Action::Connection(ConnectionAction::Init),
            "addWall" => Action::Connection(ConnectionAction::AddWall),
            "addCard" => Action::Wall(WallAction::AddCard),
            "deleteCard" => Action::Wall(WallAction::DeleteCard),
            "addBoard" => Action::Wall(WallAction::AddBoard),
            "changeWallName" => Action::Wall(WallAction::ChangeWallName),
            "changeBoardName" => Action::Wall(WallAction::ChangeBoardName),
            "changeCardTitle" => Action::Wall(WallAction::ChangeCardTitle),
            "changeCardDetails" => Action::Wall(WallAction::ChangeCardDetails),
            "moveCard" => Action::Wall(WallAction::MoveCard),
            "addChecklistItem" => Action::Wall(WallAction::AddChecklistItem),
            "updateChecklistItem" => Action::Wall(WallAction::UpdateChecklistItem),
            "deleteChecklistItem" => Action::Wall(WallAction::DeleteChecklistItem),
            _ => return None,
        };
        Some(action)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::Connection(action) => action.kind(),
            Action::Wall(action) => action.kind(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

impl fmt::Display for ConnectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

impl fmt::Display for WallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}
