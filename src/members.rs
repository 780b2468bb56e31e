//! CMIP6 ensemble member ids.
//!
//! Member ids follow the `r<realization>i<initialization>p<physics>f<forcing>`
//! convention. Only the realization and initialization indices matter here:
//! members initialised with index 10 or above are dropped (these are usually
//! decadal-prediction style runs) and the rest are ordered by realization.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::error::{Cmip6Error, Result};

/// Members with an initialization index at or above this are dropped
pub const DEFAULT_MAX_INITIALIZATION: u64 = 10;

static MEMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"r(\d+)i(\d+)").expect("member pattern is valid"));

/// Realization and initialization indices of a member id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberId {
    pub realization: u64,
    pub initialization: u64,
}

impl MemberId {
    /// Parse the first `r<N>i<M>` occurrence in `member`
    pub fn parse(member: &str) -> Option<Self> {
        let captures = MEMBER_PATTERN.captures(member)?;
        let realization = captures.get(1)?.as_str().parse().ok()?;
        let initialization = captures.get(2)?.as_str().parse().ok()?;
        Some(Self {
            realization,
            initialization,
        })
    }
}

/// Deduplicate, drop members with `initialization >= max_initialization` and
/// sort the rest by realization.
///
/// Members sharing a realization keep lexicographic order. An id without an
/// `r<N>i<M>` pattern fails with [`Cmip6Error::MalformedMember`].
pub fn sort_and_filter_members<'a, I>(members: I, max_initialization: u64) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let distinct: BTreeSet<&str> = members.into_iter().collect();

    let mut kept = Vec::with_capacity(distinct.len());
    for member in distinct {
        let id = MemberId::parse(member).ok_or_else(|| Cmip6Error::MalformedMember {
            member: member.to_string(),
        })?;
        if id.initialization < max_initialization {
            kept.push((id, member));
        }
    }

    kept.sort_by_key(|(id, _)| id.realization);
    Ok(kept.into_iter().map(|(_, member)| member.to_string()).collect())
}
