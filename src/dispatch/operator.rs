use std::fmt;

use serde::Serialize;

use crate::runtime::type_id::PrimitiveKind;

/// The closed set of binary operators a generic value supports.
///
/// Discriminants index the registry's per-operator matrices and must stay
/// dense and stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum OperatorKind {
    Add = 0,
    Sub = 1,
    Mul = 2,
    Div = 3,
    Mod = 4,
    Eq = 5,
    Ne = 6,
    Gt = 7,
    Lt = 8,
    Ge = 9,
    Le = 10,
    And = 11,
    Or = 12,
    BitAnd = 13,
    BitOr = 14,
    BitXor = 15,
}

/// Broad operator families; well-formedness and result types are decided
/// per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorFamily {
    Arithmetic,
    Comparison,
    Logical,
    Bitwise,
}

impl OperatorKind {
    pub const COUNT: usize = 16;

    pub const ALL: [OperatorKind; Self::COUNT] = [
        OperatorKind::Add,
        OperatorKind::Sub,
        OperatorKind::Mul,
        OperatorKind::Div,
        OperatorKind::Mod,
        OperatorKind::Eq,
        OperatorKind::Ne,
        OperatorKind::Gt,
        OperatorKind::Lt,
        OperatorKind::Ge,
        OperatorKind::Le,
        OperatorKind::And,
        OperatorKind::Or,
        OperatorKind::BitAnd,
        OperatorKind::BitOr,
        OperatorKind::BitXor,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::And => "&&",
            Self::Or => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
        }
    }

    /// Human-readable name used in reports and the CLI.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Mod => "mod",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Ge => "ge",
            Self::Le => "le",
            Self::And => "and",
            Self::Or => "or",
            Self::BitAnd => "bit_and",
            Self::BitOr => "bit_or",
            Self::BitXor => "bit_xor",
        }
    }

    /// Accepts either the symbol (`&`) or the display name (`bit_and`).
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.symbol() == text || op.display_name() == text)
    }

    pub fn family(self) -> OperatorFamily {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod => OperatorFamily::Arithmetic,
            Self::Eq | Self::Ne | Self::Gt | Self::Lt | Self::Ge | Self::Le => {
                OperatorFamily::Comparison
            }
            Self::And | Self::Or => OperatorFamily::Logical,
            Self::BitAnd | Self::BitOr | Self::BitXor => OperatorFamily::Bitwise,
        }
    }

    /// Operators that have no floating-point form: the bitwise family and
    /// the remainder.
    pub fn integral_only(self) -> bool {
        self == Self::Mod || self.family() == OperatorFamily::Bitwise
    }

    /// Whether the native operator is well-formed for the ordered pair.
    ///
    /// Integral-only operators need two integral operands; every other
    /// operator is defined once both sides are converted to their common
    /// type.
    pub fn accepts(self, lhs: PrimitiveKind, rhs: PrimitiveKind) -> bool {
        !self.integral_only() || (lhs.is_integral() && rhs.is_integral())
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense() {
        for (i, op) in OperatorKind::ALL.into_iter().enumerate() {
            assert_eq!(op.index(), i);
            assert_eq!(OperatorKind::from_id(op.id()), Some(op));
        }
        assert_eq!(OperatorKind::from_id(16), None);
    }

    #[test]
    fn parse_accepts_symbols_and_names() {
        assert_eq!(OperatorKind::parse("-"), Some(OperatorKind::Sub));
        assert_eq!(OperatorKind::parse("bit_xor"), Some(OperatorKind::BitXor));
        assert_eq!(OperatorKind::parse("&&"), Some(OperatorKind::And));
        assert_eq!(OperatorKind::parse("**"), None);
    }

    #[test]
    fn integral_only_operators_reject_floats_on_either_side() {
        use PrimitiveKind::*;
        assert!(OperatorKind::BitAnd.accepts(Bool, Char));
        assert!(!OperatorKind::BitAnd.accepts(Bool, F32));
        assert!(!OperatorKind::BitXor.accepts(F16, I8));
        assert!(OperatorKind::Mod.accepts(U64, I8));
        assert!(!OperatorKind::Mod.accepts(F64, I32));
        assert!(!OperatorKind::Mod.accepts(I32, F16));
        assert!(OperatorKind::Div.accepts(F64, I32));
        assert!(OperatorKind::Or.accepts(F64, F16));
    }
}
