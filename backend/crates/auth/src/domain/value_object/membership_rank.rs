use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank of a user within a resource
///
/// Totally ordered: `Viewer < Member < Maintainer < Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum MembershipRank {
    Viewer = 0,
    Member = 1,
    Maintainer = 2,
    Owner = 3,
}

impl MembershipRank {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use MembershipRank::*;
        match self {
            Viewer => "viewer",
            Member => "member",
            Maintainer => "maintainer",
            Owner => "owner",
        }
    }

    /// Whether this rank meets `required` (ties succeed)
    #[inline]
    pub fn satisfies(&self, required: MembershipRank) -> bool {
        *self >= required
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        use MembershipRank::*;
        match id {
            0 => Some(Viewer),
            1 => Some(Member),
            2 => Some(Maintainer),
            3 => Some(Owner),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use MembershipRank::*;
        match code {
            "viewer" => Some(Viewer),
            "member" => Some(Member),
            "maintainer" => Some(Maintainer),
            "owner" => Some(Owner),
            _ => None,
        }
    }
}

impl fmt::Display for MembershipRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        assert!(MembershipRank::Owner > MembershipRank::Maintainer);
        assert!(MembershipRank::Maintainer > MembershipRank::Member);
        assert!(MembershipRank::Member > MembershipRank::Viewer);
    }

    #[test]
    fn test_satisfies() {
        assert!(MembershipRank::Owner.satisfies(MembershipRank::Maintainer));
        assert!(MembershipRank::Maintainer.satisfies(MembershipRank::Maintainer));
        assert!(!MembershipRank::Member.satisfies(MembershipRank::Maintainer));
        assert!(!MembershipRank::Viewer.satisfies(MembershipRank::Owner));
    }

    #[test]
    fn test_rank_from_code() {
        assert_eq!(MembershipRank::from_code("owner"), Some(MembershipRank::Owner));
        assert_eq!(MembershipRank::from_code("viewer"), Some(MembershipRank::Viewer));
        assert_eq!(MembershipRank::from_code("admin"), None);
    }

    #[test]
    fn test_rank_id_roundtrip() {
        for rank in [
            MembershipRank::Viewer,
            MembershipRank::Member,
            MembershipRank::Maintainer,
            MembershipRank::Owner,
        ] {
            assert_eq!(MembershipRank::from_id(rank.id()), Some(rank));
        }
        assert_eq!(MembershipRank::from_id(9), None);
    }
}
