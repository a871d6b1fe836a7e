//! Literal equalisation.
//!
//! When a binary expression's two operands have different *underlying*
//! basic kinds, one side is a bare literal, and widening it would make
//! both sides agree, the literal is rewritten in place to the wider
//! kind. Typed, non-literal expressions are never implicitly converted
//! — only literal nodes move.

use cogc_ast::{Basic, Expr, ExprKind, Ty};

/// Tries to widen whichever side is the narrower literal so both sides
/// share an underlying kind. Idempotent: once the two sides agree,
/// calling this again is a no-op.
pub(crate) fn equalise_infix(left: &mut Expr, right: &mut Expr) {
    let (Some(lb), Some(rb)) = (left.ty.as_basic(), right.ty.as_basic()) else {
        return;
    };
    if lb == rb {
        return;
    }

    if lb.is_string() && rb.is_string() {
        widen_string(left, Basic::Utf8);
        widen_string(right, Basic::Utf8);
        return;
    }

    // A bare (default-width) literal paired with an already-typed,
    // non-literal expression narrows to that expression's width instead of
    // going through the generic widen-toward-wider-rank rule below: the
    // non-literal side's width is fixed by its declaration, not just the
    // larger of the two ranks.
    if !is_int_literal(left) && is_int_literal(right) {
        narrow_to_identifier_width(&left.ty, right);
        if right.ty.as_basic() == Some(lb) {
            return;
        }
    }
    if !is_int_literal(right) && is_int_literal(left) {
        narrow_to_identifier_width(&right.ty, left);
        if left.ty.as_basic() == Some(rb) {
            return;
        }
    }

    if let (Some(lr), Some(rr)) = (lb.integer_rank(), rb.integer_rank()) {
        let reference = if lr >= rr { lb } else { rb };
        widen_integer(left, reference);
        widen_integer(right, reference);
        return;
    }

    if let (Some(lr), Some(rr)) = (lb.float_rank(), rb.float_rank()) {
        let reference = if lr >= rr { lb } else { rb };
        widen_float(left, reference);
        widen_float(right, reference);
    }
}

fn is_int_literal(e: &Expr) -> bool {
    matches!(&*e.kind, ExprKind::IntLit { .. })
}

fn widen_integer(e: &mut Expr, target: Basic) {
    if let ExprKind::IntLit { width, .. } = &mut *e.kind {
        *width = target;
        e.ty = Ty::Basic(target);
    }
}

fn widen_float(e: &mut Expr, target: Basic) {
    if let ExprKind::FloatLit { width, .. } = &mut *e.kind {
        *width = target;
        e.ty = Ty::Basic(target);
    }
}

fn widen_string(e: &mut Expr, target: Basic) {
    if let ExprKind::StringLit { kind, .. } = &mut *e.kind {
        *kind = target;
        e.ty = Ty::Basic(target);
    }
}

/// The narrow-on-demand path: retypes a bare (still-default-width) `int64`
/// literal to match an already-typed expression's width, without going
/// through the general widen-toward-reference rule (the other side's width
/// is authoritative, not just the "wider" one).
pub(crate) fn narrow_to_identifier_width(identifier_ty: &Ty, literal: &mut Expr) {
    let Some(target) = identifier_ty.as_basic() else { return };
    if target.integer_rank().is_some() {
        if let ExprKind::IntLit { width, .. } = &mut *literal.kind {
            if *width == Basic::Int64 {
                *width = target;
                literal.ty = Ty::Basic(target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogc_util::Position;

    fn int_lit(value: i128, width: Basic) -> Expr {
        Expr::new(ExprKind::IntLit { value, width }, Position::start(), Ty::Basic(width))
    }

    #[test]
    fn narrower_integer_literal_widens_to_match_the_other_side() {
        let mut left = int_lit(1, Basic::Int8);
        let mut right = int_lit(2, Basic::Int32);
        equalise_infix(&mut left, &mut right);
        assert_eq!(left.ty.as_basic(), Some(Basic::Int32));
        assert_eq!(right.ty.as_basic(), Some(Basic::Int32));
    }

    #[test]
    fn equalising_an_already_equal_pair_is_a_no_op() {
        let mut left = int_lit(1, Basic::Int32);
        let mut right = int_lit(2, Basic::Int32);
        equalise_infix(&mut left, &mut right);
        equalise_infix(&mut left, &mut right);
        assert_eq!(left.ty.as_basic(), Some(Basic::Int32));
        assert_eq!(right.ty.as_basic(), Some(Basic::Int32));
    }

    #[test]
    fn bare_literal_narrows_to_a_typed_identifiers_width_instead_of_widening() {
        let mut interner = cogc_util::Interner::new();
        let name = interner.intern("x");
        let mut left = Expr::new(ExprKind::Identifier(name), Position::start(), Ty::Basic(Basic::Int8));
        let mut right = int_lit(1, Basic::Int64);
        equalise_infix(&mut left, &mut right);
        assert_eq!(left.ty.as_basic(), Some(Basic::Int8));
        assert_eq!(right.ty.as_basic(), Some(Basic::Int8));
    }
}
