//! List-id syntax.
//!
//! A list id is a small expression:
//!
//! ```text
//! id       := "!(" id ")" | "!" id | plain
//! plain    := "Mint" | "All" | "AllWithMint" | "None"
//!           | "AllWithout" piece (":" piece)*
//!           | piece (":" piece)*          -- inline whitelist
//!           | stored-id                   -- [A-Za-z0-9]+
//! ```
//!
//! [`ListExpr::parse`] turns the string into a tagged tree once; evaluation
//! then needs no further string inspection. Reserved and inline decodings win
//! over stored ids, which is why such ids can never be created.

use issuance_kernel_core::{AddressValidator, MINT_ADDRESS};

use crate::error::{ListError, Result};
use crate::list::{validate_stored_id, AddressList};

/// How plain pieces of an id are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveMode {
    /// Pieces must be valid addresses; anything else is a stored id.
    AddressList,
    /// Pieces are opaque aliases (approval ids). Nothing is looked up.
    Tracker,
}

/// A list whose meaning is defined by rule rather than by storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReservedList {
    /// Only the mint sentinel.
    Mint,
    /// Everyone.
    All,
    /// Everyone (alias of `All`).
    AllWithMint,
    /// No-one.
    None,
    /// Everyone except the listed pieces.
    AllWithout(Vec<String>),
}

impl ReservedList {
    /// The list this reserved id denotes.
    pub fn to_list(&self) -> AddressList {
        match self {
            ReservedList::Mint => AddressList::whitelist("", vec![MINT_ADDRESS.to_string()]),
            ReservedList::All | ReservedList::AllWithMint => AddressList::all(),
            ReservedList::None => AddressList::none(),
            ReservedList::AllWithout(excluded) => AddressList::blacklist("", excluded.clone()),
        }
    }
}

/// A parsed list id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListExpr {
    Reserved(ReservedList),
    Inline(Vec<String>),
    Stored(String),
    Inverted(Box<ListExpr>),
}

const ALL_WITHOUT: &str = "AllWithout";

impl ListExpr {
    /// Parse a list id.
    pub fn parse(id: &str, mode: ResolveMode, validator: &dyn AddressValidator) -> Result<Self> {
        parse_expr(id, id, mode, validator)
    }

    /// True for reserved and inline decodings at any inversion depth.
    pub fn is_rule_defined(&self) -> bool {
        match self {
            ListExpr::Reserved(_) | ListExpr::Inline(_) => true,
            ListExpr::Stored(_) => false,
            ListExpr::Inverted(inner) => inner.is_rule_defined(),
        }
    }

    /// The stored id this expression refers to, if any.
    pub fn stored_id(&self) -> Option<&str> {
        match self {
            ListExpr::Stored(id) => Some(id),
            ListExpr::Inverted(inner) => inner.stored_id(),
            _ => None,
        }
    }

    /// Evaluate to a list, loading stored lists with `load`.
    ///
    /// The returned list carries no meaningful id; callers restore the
    /// requested one.
    pub fn evaluate<F>(&self, load: &mut F) -> Result<AddressList>
    where
        F: FnMut(&str) -> Result<AddressList>,
    {
        match self {
            ListExpr::Reserved(reserved) => Ok(reserved.to_list()),
            ListExpr::Inline(pieces) => Ok(AddressList::whitelist("", pieces.clone())),
            ListExpr::Stored(id) => load(id),
            ListExpr::Inverted(inner) => Ok(inner.evaluate(load)?.inverted()),
        }
    }
}

/// True for the reserved words and anything in the `AllWithout` family.
pub fn is_reserved_id(id: &str) -> bool {
    matches!(id, "Mint" | "All" | "AllWithMint" | "None") || id.starts_with(ALL_WITHOUT)
}

fn parse_expr(
    id: &str,
    full: &str,
    mode: ResolveMode,
    validator: &dyn AddressValidator,
) -> Result<ListExpr> {
    if id.is_empty() {
        return Err(ListError::invalid_id(full, "empty id"));
    }

    if let Some(inner) = id.strip_prefix("!(").and_then(|rest| rest.strip_suffix(')')) {
        let inner = parse_expr(inner, full, mode, validator)?;
        return Ok(ListExpr::Inverted(Box::new(inner)));
    }
    if let Some(rest) = id.strip_prefix('!') {
        let inner = parse_expr(rest, full, mode, validator)?;
        return Ok(ListExpr::Inverted(Box::new(inner)));
    }

    parse_plain(id, full, mode, validator)
}

fn parse_plain(
    id: &str,
    full: &str,
    mode: ResolveMode,
    validator: &dyn AddressValidator,
) -> Result<ListExpr> {
    match id {
        "Mint" => return Ok(ListExpr::Reserved(ReservedList::Mint)),
        "All" => return Ok(ListExpr::Reserved(ReservedList::All)),
        "AllWithMint" => return Ok(ListExpr::Reserved(ReservedList::AllWithMint)),
        "None" => return Ok(ListExpr::Reserved(ReservedList::None)),
        _ => {}
    }

    if let Some(suffix) = id.strip_prefix(ALL_WITHOUT) {
        let excluded = split_pieces(suffix, full, mode, validator)?;
        return Ok(ListExpr::Reserved(ReservedList::AllWithout(excluded)));
    }

    match mode {
        ResolveMode::Tracker => Ok(ListExpr::Inline(split_pieces(id, full, mode, validator)?)),
        // Stored ids never contain ':', so this can only be an inline list.
        ResolveMode::AddressList if id.contains(':') => {
            Ok(ListExpr::Inline(split_pieces(id, full, mode, validator)?))
        }
        ResolveMode::AddressList => {
            if validator.is_valid(id, true) {
                return Ok(ListExpr::Inline(vec![id.to_string()]));
            }
            validate_stored_id(id).map_err(|e| match e {
                ListError::InvalidId { reason, .. } => ListError::invalid_id(full, reason),
                other => other,
            })?;
            Ok(ListExpr::Stored(id.to_string()))
        }
    }
}

/// Split `s` on ':' and check every piece for `mode`.
fn split_pieces(
    s: &str,
    full: &str,
    mode: ResolveMode,
    validator: &dyn AddressValidator,
) -> Result<Vec<String>> {
    for piece in s.split(':') {
        match mode {
            ResolveMode::Tracker if piece.is_empty() => {
                return Err(ListError::invalid_id(full, "empty alias"));
            }
            ResolveMode::Tracker => {}
            ResolveMode::AddressList => {
                validator.validate(piece, true).map_err(|e| {
                    ListError::invalid_id(full, format!("invalid embedded address: {e}"))
                })?;
            }
        }
    }
    Ok(dedup(s.split(':')))
}

/// Keep the first occurrence of each piece.
fn dedup<'a>(pieces: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for piece in pieces {
        if !out.iter().any(|p| p == piece) {
            out.push(piece.to_string());
        }
    }
    out
}
