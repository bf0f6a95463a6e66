//! Factor-weight allocation conditioned on what data exists for a pair.

use crate::models::{WeightContext, WeightVector};

/// Base vector when no decided head-to-head meeting exists. Class level
/// carries nearly everything; the components are renormalized before use.
const BASE_NO_H2H: WeightVector = WeightVector {
    class_level: 0.90,
    recent_form: 0.0,
    head_to_head: 0.0,
    point_differential: 0.0,
    tournament_performance: 0.0,
    ranking: 0.05,
};

/// Base vector when head-to-head history exists.
const BASE_WITH_H2H: WeightVector = WeightVector {
    class_level: 0.08,
    recent_form: 0.02,
    head_to_head: 0.75,
    point_differential: 0.10,
    tournament_performance: 0.02,
    ranking: 0.03,
};

/// Weight moved from head-to-head to point differential when both
/// players' recent matches have been close.
const CLOSE_SHIFT: f64 = 0.15;

/// Class-level weight when exactly one player is Elite.
const ELITE_CLASS_WEIGHT: f64 = 0.95;

/// Produce the six-factor weight vector for the given situation.
///
/// All adjustments are applied to a fresh base vector in a fixed order,
/// and the result is renormalized so the components sum to 1.0.
pub fn allocate_weights(ctx: &WeightContext) -> WeightVector {
    let mut w = if ctx.has_head_to_head {
        BASE_WITH_H2H
    } else {
        BASE_NO_H2H
    };

    // Close historical margins make the meeting record less decisive;
    // part of its weight moves onto the point differential. Without a
    // record there is nothing to move.
    if ctx.has_head_to_head && ctx.close_head_to_head {
        w.head_to_head -= CLOSE_SHIFT;
        w.point_differential += CLOSE_SHIFT;
    }

    if ctx.same_class {
        w = redistribute_class_weight(w);
    }
    if ctx.elite_vs_lower {
        w = concentrate_on_class(w);
    }

    w.normalized()
}

/// Same estimated level on both sides: the class factor says nothing, so
/// its weight moves proportionally onto the other positive factors.
/// Component 0 of the array form is the class-level weight.
fn redistribute_class_weight(w: WeightVector) -> WeightVector {
    let removed = w.class_level;
    let mut parts = w.to_array();
    parts[0] = 0.0;
    let others: f64 = parts.iter().skip(1).sum();
    if others > 0.0 && removed > 0.0 {
        for part in parts.iter_mut().skip(1) {
            if *part > 0.0 {
                *part += *part / others * removed;
            }
        }
    }
    WeightVector::from_array(parts)
}

/// Elite against a lower class: the class gap dominates every other
/// signal, and the remaining factors share what little is left.
fn concentrate_on_class(w: WeightVector) -> WeightVector {
    let mut parts = w.to_array();
    let others: f64 = parts.iter().skip(1).sum();
    parts[0] = ELITE_CLASS_WEIGHT;
    if others > 0.0 {
        let scale = (1.0 - ELITE_CLASS_WEIGHT) / others;
        for part in parts.iter_mut().skip(1) {
            *part *= scale;
        }
    }
    WeightVector::from_array(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(
        has_head_to_head: bool,
        same_class: bool,
        elite_vs_lower: bool,
        close_head_to_head: bool,
    ) -> WeightContext {
        WeightContext {
            has_head_to_head,
            same_class,
            elite_vs_lower,
            close_head_to_head,
        }
    }

    #[test]
    fn test_every_flag_combination_normalizes() {
        for bits in 0..16u8 {
            let c = ctx(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
            let w = allocate_weights(&c);
            assert!(
                (w.sum() - 1.0).abs() < 1e-6,
                "flags {bits:04b} sum to {}",
                w.sum()
            );
            assert!(
                w.to_array().iter().all(|part| *part >= 0.0),
                "flags {bits:04b} produced a negative weight"
            );
        }
    }

    #[test]
    fn test_no_head_to_head_base_renormalized() {
        let w = allocate_weights(&ctx(false, false, false, false));
        assert!((w.class_level - 0.90 / 0.95).abs() < 1e-9);
        assert!((w.ranking - 0.05 / 0.95).abs() < 1e-9);
        assert_eq!(w.head_to_head, 0.0);
        assert_eq!(w.recent_form, 0.0);
    }

    #[test]
    fn test_with_head_to_head_base() {
        let w = allocate_weights(&ctx(true, false, false, false));
        assert!((w.head_to_head - 0.75).abs() < 1e-9);
        assert!((w.class_level - 0.08).abs() < 1e-9);
        assert!((w.ranking - 0.03).abs() < 1e-9);
    }

    #[test]
    fn test_close_meetings_shift_weight_to_margins() {
        let w = allocate_weights(&ctx(true, false, false, true));
        assert!((w.head_to_head - 0.60).abs() < 1e-9);
        assert!((w.point_differential - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_close_flag_ignored_without_head_to_head() {
        let with_flag = allocate_weights(&ctx(false, false, false, true));
        let without_flag = allocate_weights(&ctx(false, false, false, false));
        assert_eq!(with_flag, without_flag);
    }

    #[test]
    fn test_same_class_zeroes_class_weight() {
        let w = allocate_weights(&ctx(true, true, false, false));
        assert_eq!(w.class_level, 0.0);
        // The removed 0.08 spreads proportionally over the rest.
        assert!((w.head_to_head - 0.75 / 0.92).abs() < 1e-9);
        assert!((w.ranking - 0.03 / 0.92).abs() < 1e-9);
        assert!((w.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_class_without_head_to_head_leaves_only_ranking() {
        let w = allocate_weights(&ctx(false, true, false, false));
        assert_eq!(w.class_level, 0.0);
        assert!((w.ranking - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_elite_override_dominates() {
        let w = allocate_weights(&ctx(false, false, true, false));
        assert!((w.class_level - 0.95).abs() < 1e-9);
        assert!((w.ranking - 0.05).abs() < 1e-9);

        let w = allocate_weights(&ctx(true, false, true, false));
        assert!((w.class_level - 0.95).abs() < 1e-9);
        assert!((w.head_to_head - 0.75 * 0.05 / 0.92).abs() < 1e-9);
    }
}
