use super::way::Id;

/// Relation type names that express a mandatory turn: only the named target
/// way may be entered from the source way
pub const ALLOW_RELATION_TYPES: [&str; 3] = [
    "restriction_only_right_turn",
    "restriction_only_left_turn",
    "restriction_only_straight_on",
];

/// Relation type names that express a forbidden turn
pub const FORBID_RELATION_TYPES: [&str; 4] = [
    "restriction_no_right_turn",
    "restriction_no_left_turn",
    "restriction_no_u_turn",
    "restriction_no_straight_on",
];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RestrictionKind {
    Allow,
    Forbid,
}

/// A turn restriction through a via node: entering from `from`, the turn
/// onto `to` is mandatory (`Allow`) or forbidden (`Forbid`)
#[derive(Copy, Clone, Debug)]
pub struct Restriction {
    pub from: Id,
    pub to: Id,
    pub kind: RestrictionKind,
}

/// Decide whether the turn `from -> to` is permitted under the restrictions
/// registered at one via node. An `Allow` entry for the source way forbids
/// every other target; a `Forbid` entry denies only its own target. When
/// allow and forbid entries are mixed for the same source, the last entry
/// scanned sets the fallback; that order dependence is part of the output
/// format contract and must not be "fixed".
pub fn can_turn(restrictions: &[Restriction], from: Id, to: Id) -> bool {
    let mut default_return = true;

    for restriction in restrictions {
        if restriction.from != from {
            continue;
        }

        match restriction.kind {
            RestrictionKind::Allow => {
                if restriction.to == to {
                    return true;
                }
                default_return = false;
            }
            RestrictionKind::Forbid => {
                if restriction.to == to {
                    return false;
                }
                default_return = true;
            }
        }
    }

    default_return
}

#[cfg(test)]
mod test {
    use super::*;

    fn allow(from: Id, to: Id) -> Restriction {
        Restriction {
            from,
            to,
            kind: RestrictionKind::Allow,
        }
    }

    fn forbid(from: Id, to: Id) -> Restriction {
        Restriction {
            from,
            to,
            kind: RestrictionKind::Forbid,
        }
    }

    #[test]
    fn no_restrictions() {
        assert!(can_turn(&[], 1, 2));
        assert!(can_turn(&[], 2, 1));
    }

    #[test]
    fn allow_only_named_target() {
        let restrictions = [allow(1, 2)];
        assert!(can_turn(&restrictions, 1, 2));
        assert!(!can_turn(&restrictions, 1, 3));
        assert!(!can_turn(&restrictions, 1, 4));
    }

    #[test]
    fn forbid_only_named_target() {
        let restrictions = [forbid(1, 2)];
        assert!(!can_turn(&restrictions, 1, 2));
        assert!(can_turn(&restrictions, 1, 3));
    }

    #[test]
    fn other_source_does_not_apply() {
        let restrictions = [allow(7, 2), forbid(8, 3)];
        assert!(can_turn(&restrictions, 1, 3));
        assert!(can_turn(&restrictions, 1, 2));
    }

    #[test]
    fn mixed_entries_keep_last_default() {
        // The entry scanned last for the source way wins the fallback
        let restrictions = [allow(1, 2), forbid(1, 3)];
        assert!(can_turn(&restrictions, 1, 4));

        let restrictions = [forbid(1, 3), allow(1, 2)];
        assert!(!can_turn(&restrictions, 1, 4));
    }
}
