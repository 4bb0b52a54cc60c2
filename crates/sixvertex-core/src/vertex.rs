//! The six vertex types and the fixed edge-orientation table derived from them.

/// One of the six ice-rule-satisfying arrow configurations.
///
/// The numeric discriminant is the bit-exact code used by snapshot buffers
/// and cross-process hand-off: `0=a1, 1=a2, 2=b1, 3=b2, 4=c1, 5=c2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VertexType {
    /// Code 0.
    A1 = 0,
    /// Code 1.
    A2 = 1,
    /// Code 2.
    B1 = 2,
    /// Code 3.
    B2 = 3,
    /// Code 4.
    C1 = 4,
    /// Code 5.
    C2 = 5,
}

/// All six types in code order, for iteration (histograms, ρ enumeration).
pub const ALL: [VertexType; 6] = [
    VertexType::A1,
    VertexType::A2,
    VertexType::B1,
    VertexType::B2,
    VertexType::C1,
    VertexType::C2,
];

impl VertexType {
    /// Returns the bit-exact wire code for this type.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Recovers a type from its wire code.
    ///
    /// Returns `None` for any value outside `0..=5`.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::A1),
            1 => Some(Self::A2),
            2 => Some(Self::B1),
            3 => Some(Self::B2),
            4 => Some(Self::C1),
            5 => Some(Self::C2),
            _ => None,
        }
    }

    /// Index into the 6-bucket weight/histogram arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self.code() as usize
    }
}

/// Fixed per-side arrow orientation for a vertex type, expressed relative to
/// a clockwise traversal of the unit face the vertex occupies: `true` means
/// the arrow runs in the clockwise direction along that side, `false` means
/// counter-clockwise.
///
/// This is the sole source of truth for edge orientation (§3): the ice rule
/// (exactly two clockwise, two counter-clockwise sides) holds for every
/// type by construction, and the table is the unique (up to global mirror)
/// assignment consistent with the plaquette-flip substitution rules in
/// [`crate::flip`] — applying a flip reverses the two internal sides of the
/// 2x2 block and leaves the two external sides of each corner cell
/// unchanged. See `DESIGN.md` for the derivation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeSides {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

const EDGE_TABLE: [EdgeSides; 6] = [
    // A1
    EdgeSides { left: true, right: false, top: true, bottom: false },
    // A2
    EdgeSides { left: false, right: true, top: false, bottom: true },
    // B1
    EdgeSides { left: false, right: true, top: true, bottom: false },
    // B2
    EdgeSides { left: true, right: false, top: false, bottom: true },
    // C1
    EdgeSides { left: true, right: true, top: false, bottom: false },
    // C2
    EdgeSides { left: false, right: false, top: true, bottom: true },
];

impl VertexType {
    pub(crate) fn edges(self) -> EdgeSides {
        EDGE_TABLE[self.index()]
    }

    /// Height delta crossing this vertex's top edge while walking rightward.
    pub(crate) fn delta_top(self) -> i64 {
        if self.edges().top {
            1
        } else {
            -1
        }
    }

    /// Height delta crossing this vertex's bottom edge while walking rightward.
    pub(crate) fn delta_bottom(self) -> i64 {
        if self.edges().bottom {
            -1
        } else {
            1
        }
    }

    /// Height delta crossing this vertex's left edge while walking downward.
    pub(crate) fn delta_left(self) -> i64 {
        if self.edges().left {
            1
        } else {
            -1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_satisfies_the_ice_rule() {
        for ty in ALL {
            let e = ty.edges();
            let ins = [e.left, e.right, e.top, e.bottom]
                .iter()
                .filter(|&&v| v)
                .count();
            assert_eq!(ins, 2, "{ty:?} does not carry exactly two clockwise sides");
        }
    }

    #[test]
    fn code_roundtrips() {
        for ty in ALL {
            assert_eq!(VertexType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(VertexType::from_code(6), None);
    }
}
