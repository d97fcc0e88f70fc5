use crate::store::BinaryOp;

/// Executes a single binary operator over two resolved values.
///
/// Total over `i64`: add/mul wrap on overflow, division and modulo by zero
/// yield 0, and `i64::MIN / -1` wraps instead of trapping. Division truncates
/// toward zero, so the remainder takes the sign of the dividend.
#[inline(always)]
pub fn execute_binary(op: BinaryOp, a: i64, b: i64) -> i64 {
    match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div => {
            if b == 0 { 0 } else { a.wrapping_div(b) }
        }
        BinaryOp::Mod => {
            if b == 0 { 0 } else { a.wrapping_rem(b) }
        }
        BinaryOp::Eql => (a == b) as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BinaryOp::Add, 5, -8, -3)]
    #[case(BinaryOp::Mul, -4, 6, -24)]
    #[case(BinaryOp::Div, 7, 2, 3)]
    #[case(BinaryOp::Div, -7, 2, -3)] // truncates toward zero
    #[case(BinaryOp::Div, 7, -2, -3)]
    #[case(BinaryOp::Mod, 7, 3, 1)]
    #[case(BinaryOp::Mod, -7, 3, -1)] // sign follows dividend
    #[case(BinaryOp::Mod, 7, -3, 1)]
    #[case(BinaryOp::Eql, 4, 4, 1)]
    #[case(BinaryOp::Eql, 4, -4, 0)]
    fn test_operator_table(#[case] op: BinaryOp, #[case] a: i64, #[case] b: i64, #[case] expected: i64) {
        assert_eq!(execute_binary(op, a, b), expected);
    }

    // Division and modulo by zero are defined as 0, not an error. Changing
    // this changes which states the search can reach.
    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(-26)]
    #[case(i64::MAX)]
    #[case(i64::MIN)]
    fn test_div_mod_by_zero_yield_zero(#[case] dividend: i64) {
        assert_eq!(execute_binary(BinaryOp::Div, dividend, 0), 0);
        assert_eq!(execute_binary(BinaryOp::Mod, dividend, 0), 0);
    }

    #[test]
    fn test_eql_is_boolean() {
        for a in -3..=3 {
            for b in -3..=3 {
                let r = execute_binary(BinaryOp::Eql, a, b);
                assert!(r == 0 || r == 1);
            }
        }
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(execute_binary(BinaryOp::Add, i64::MAX, 1), i64::MIN);
        assert_eq!(execute_binary(BinaryOp::Div, i64::MIN, -1), i64::MIN);
        assert_eq!(execute_binary(BinaryOp::Mod, i64::MIN, -1), 0);
    }
}
