//! Tracking policy: reconcile a goal's declared aggregation with the shape of
//! the activity it tracks.

use crate::activity::ValueShape;
use crate::goal::TrackingKind;

/// The aggregation actually applied to a goal.
///
/// Increment-style counters always accumulate, whatever the goal declares.
/// `Count` only makes sense for fixed-amount activities and falls back to
/// `Sum` elsewhere.
pub fn effective_tracking(declared: TrackingKind, shape: &ValueShape) -> TrackingKind {
    if shape.is_increment() {
        return TrackingKind::Sum;
    }
    match declared {
        TrackingKind::Count if !shape.is_fixed_amount() => TrackingKind::Sum,
        kind => kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::InputStyle;

    fn range(input: InputStyle) -> ValueShape {
        ValueShape::ContinuousRange {
            min: 0.0,
            max: None,
            step: 1.0,
            input,
        }
    }

    #[test]
    fn test_increment_forces_sum() {
        for declared in [
            TrackingKind::Average,
            TrackingKind::Sum,
            TrackingKind::Absolute,
            TrackingKind::Count,
        ] {
            assert_eq!(
                effective_tracking(declared, &range(InputStyle::Increment)),
                TrackingKind::Sum
            );
        }
    }

    #[test]
    fn test_slider_keeps_declared_kind() {
        let slider = range(InputStyle::Slider);
        assert_eq!(effective_tracking(TrackingKind::Average, &slider), TrackingKind::Average);
        assert_eq!(effective_tracking(TrackingKind::Absolute, &slider), TrackingKind::Absolute);
    }

    #[test]
    fn test_count_only_for_fixed_amount() {
        let fixed = ValueShape::FixedAmount { amount: 250.0 };
        assert_eq!(effective_tracking(TrackingKind::Count, &fixed), TrackingKind::Count);
        assert_eq!(
            effective_tracking(TrackingKind::Count, &ValueShape::BinaryToggle),
            TrackingKind::Sum
        );
        assert_eq!(
            effective_tracking(TrackingKind::Count, &range(InputStyle::Slider)),
            TrackingKind::Sum
        );
    }
}
