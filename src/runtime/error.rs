use std::fmt;

use crate::dispatch::operator::OperatorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    pub code: &'static str,
    pub title: &'static str,
}

pub const RECURSIVE_ABSTRACTION: ErrorCode = ErrorCode {
    code: "E1101",
    title: "RECURSIVE ABSTRACTION",
};
pub const UNSUPPORTED_REFERENCE_WRAP: ErrorCode = ErrorCode {
    code: "E1102",
    title: "UNSUPPORTED REFERENCE WRAP",
};
pub const UNSUPPORTED_OPERAND_TYPES: ErrorCode = ErrorCode {
    code: "E1103",
    title: "UNSUPPORTED OPERAND TYPES",
};
pub const DISPATCH_PRODUCED_NOTHING: ErrorCode = ErrorCode {
    code: "E1104",
    title: "DISPATCH PRODUCED NOTHING",
};
pub const DIVISION_BY_ZERO: ErrorCode = ErrorCode {
    code: "E1105",
    title: "DIVISION BY ZERO",
};
pub const PARSE_FAILURE: ErrorCode = ErrorCode {
    code: "E1106",
    title: "PARSE FAILURE",
};
pub const UNEXPECTED_END_OF_INPUT: ErrorCode = ErrorCode {
    code: "E1107",
    title: "UNEXPECTED END OF INPUT",
};
pub const LENGTH_MISMATCH: ErrorCode = ErrorCode {
    code: "E1108",
    title: "LENGTH MISMATCH",
};

/// Failures raised by value cells, generic values and dispatch.
///
/// Every variant is raised synchronously at the offending call; nothing in
/// the crate retries or recovers from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarError {
    /// A generic value was offered as the payload of a value cell.
    RecursiveAbstraction,
    /// Only primitive payloads may be wrapped by reference.
    UnsupportedReferenceWrap { type_name: &'static str },
    /// No implementation is bound for `(op, lhs, rhs)`.
    UnsupportedOperandTypes {
        op: OperatorKind,
        lhs: &'static str,
        rhs: &'static str,
    },
    /// A bound implementation ran but could not produce a value.
    DispatchProducedNothing {
        op: OperatorKind,
        lhs: &'static str,
        rhs: &'static str,
    },
    DivisionByZero {
        op: OperatorKind,
        lhs: &'static str,
        rhs: &'static str,
    },
    Parse {
        type_name: &'static str,
        token: String,
    },
    UnexpectedEndOfInput { type_name: &'static str },
    LengthMismatch { lhs: usize, rhs: usize },
}

impl VarError {
    pub fn code(&self) -> &'static ErrorCode {
        match self {
            VarError::RecursiveAbstraction => &RECURSIVE_ABSTRACTION,
            VarError::UnsupportedReferenceWrap { .. } => &UNSUPPORTED_REFERENCE_WRAP,
            VarError::UnsupportedOperandTypes { .. } => &UNSUPPORTED_OPERAND_TYPES,
            VarError::DispatchProducedNothing { .. } => &DISPATCH_PRODUCED_NOTHING,
            VarError::DivisionByZero { .. } => &DIVISION_BY_ZERO,
            VarError::Parse { .. } => &PARSE_FAILURE,
            VarError::UnexpectedEndOfInput { .. } => &UNEXPECTED_END_OF_INPUT,
            VarError::LengthMismatch { .. } => &LENGTH_MISMATCH,
        }
    }

    fn detail(&self) -> String {
        match self {
            VarError::RecursiveAbstraction => {
                "a generic value cannot be wrapped inside another value cell".to_string()
            }
            VarError::UnsupportedReferenceWrap { type_name } => {
                format!("cannot wrap a reference to non-primitive type {}", type_name)
            }
            VarError::UnsupportedOperandTypes { op, lhs, rhs } => format!(
                "no `{}` operation is registered for {} and {}",
                op.symbol(),
                lhs,
                rhs
            ),
            VarError::DispatchProducedNothing { op, lhs, rhs } => format!(
                "`{}` for {} and {} ran but produced no value",
                op.symbol(),
                lhs,
                rhs
            ),
            VarError::DivisionByZero { op, lhs, rhs } => format!(
                "integer `{}` by zero ({} {} {})",
                op.symbol(),
                lhs,
                op.symbol(),
                rhs
            ),
            VarError::Parse { type_name, token } => {
                format!("cannot parse `{}` as {}", token, type_name)
            }
            VarError::UnexpectedEndOfInput { type_name } => {
                format!("input ended while reading {}", type_name)
            }
            VarError::LengthMismatch { lhs, rhs } => {
                format!("operand slices differ in length ({} vs {})", lhs, rhs)
            }
        }
    }
}

impl fmt::Display for VarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code();
        write!(f, "error[{}]: {}: {}", code.code, code.title, self.detail())
    }
}

impl std::error::Error for VarError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_title() {
        let err = VarError::UnsupportedOperandTypes {
            op: OperatorKind::BitAnd,
            lhs: "f64",
            rhs: "f64",
        };
        assert_eq!(
            err.to_string(),
            "error[E1103]: UNSUPPORTED OPERAND TYPES: no `&` operation is registered for f64 and f64"
        );
    }

    #[test]
    fn codes_are_unique() {
        let codes = [
            RECURSIVE_ABSTRACTION,
            UNSUPPORTED_REFERENCE_WRAP,
            UNSUPPORTED_OPERAND_TYPES,
            DISPATCH_PRODUCED_NOTHING,
            DIVISION_BY_ZERO,
            PARSE_FAILURE,
            UNEXPECTED_END_OF_INPUT,
            LENGTH_MISMATCH,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
    }
}
