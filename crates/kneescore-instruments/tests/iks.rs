use kneescore_core::models::answer::{AnswerSet, AnswerValue};
use kneescore_instruments::instruments::iks::{
    compute_iks_scores, deduction_from_active_extension_deficit, deduction_from_alignment,
    deduction_from_flexion_contracture, points_from_flexion, Alignment, Iks, IksInput,
};
use kneescore_instruments::scoring::ScoreResult;
use kneescore_instruments::Instrument;

fn aligned(degrees: f64) -> Alignment {
    Alignment {
        degrees: Some(degrees),
        other: false,
    }
}

fn best_knee() -> IksInput {
    IksInput {
        pain_pts: Some(50.0),
        flex_deg: Some(125.0),
        ap_pts: Some(10.0),
        ml_pts: Some(15.0),
        contracture_deg: Some(0.0),
        ext_def_deg: Some(0.0),
        alignment: aligned(7.0),
        walk_pts: Some(50.0),
        stairs_pts: Some(50.0),
        aids_deduction: Some(0.0),
    }
}

#[test]
fn flexion_points() {
    assert_eq!(points_from_flexion(140.0), 25.0);
    assert_eq!(points_from_flexion(125.0), 25.0);
    assert_eq!(points_from_flexion(121.0), 25.0);
    assert_eq!(points_from_flexion(120.0), 24.0);
    assert_eq!(points_from_flexion(100.0), 20.0);
    assert_eq!(points_from_flexion(0.0), 0.0);
    assert_eq!(points_from_flexion(-30.0), 0.0);
    assert_eq!(points_from_flexion(f64::NAN), 0.0);
}

#[test]
fn flexion_contracture_tiers() {
    assert_eq!(deduction_from_flexion_contracture(-5.0), 0.0);
    assert_eq!(deduction_from_flexion_contracture(0.0), 0.0);
    assert_eq!(deduction_from_flexion_contracture(0.5), -2.0);
    assert_eq!(deduction_from_flexion_contracture(10.0), -2.0);
    assert_eq!(deduction_from_flexion_contracture(15.0), -5.0);
    assert_eq!(deduction_from_flexion_contracture(20.0), -10.0);
    assert_eq!(deduction_from_flexion_contracture(20.5), -15.0);
}

#[test]
fn extension_deficit_tiers_are_asymmetric_at_11() {
    assert_eq!(deduction_from_active_extension_deficit(0.0), 0.0);
    assert_eq!(deduction_from_active_extension_deficit(-3.0), 0.0);
    assert_eq!(deduction_from_active_extension_deficit(10.9), -5.0);
    assert_eq!(deduction_from_active_extension_deficit(11.0), -10.0);
    assert_eq!(deduction_from_active_extension_deficit(20.0), -10.0);
    assert_eq!(deduction_from_active_extension_deficit(21.0), -15.0);
}

#[test]
fn alignment_deductions() {
    assert_eq!(deduction_from_alignment(aligned(5.0)), 0.0);
    assert_eq!(deduction_from_alignment(aligned(10.0)), 0.0);
    assert_eq!(deduction_from_alignment(aligned(0.0)), -15.0);
    assert_eq!(deduction_from_alignment(aligned(3.0)), -6.0);
    assert_eq!(deduction_from_alignment(aligned(12.0)), -6.0);
    assert_eq!(deduction_from_alignment(aligned(15.0)), -15.0);
    assert_eq!(deduction_from_alignment(aligned(20.0)), -20.0);
    assert_eq!(deduction_from_alignment(aligned(-1.0)), -20.0);
    assert_eq!(
        deduction_from_alignment(Alignment {
            degrees: None,
            other: false
        }),
        0.0
    );
}

#[test]
fn other_deformity_is_always_minus_20() {
    for degrees in [Some(7.0), Some(0.0), Some(40.0), None] {
        let alignment = Alignment {
            degrees,
            other: true,
        };
        assert_eq!(deduction_from_alignment(alignment), -20.0);
    }
}

#[test]
fn best_knee_scores_100_on_both() {
    let scores = compute_iks_scores(&best_knee());
    assert_eq!(scores.mobility_pts, 25.0);
    assert_eq!(scores.stability_pts, 25.0);
    assert_eq!(scores.knee_positive, 100.0);
    assert_eq!(scores.knee_deductions, 0.0);
    assert_eq!(scores.knee_score, 100.0);
    assert_eq!(scores.function_score, 100.0);
    assert!(scores.inputs_missing.is_empty());
    assert_eq!(scores.inputs_present, 6);
}

#[test]
fn deductions_are_subtracted_and_clamped_at_zero() {
    let input = IksInput {
        pain_pts: Some(10.0),
        flex_deg: Some(90.0),
        ap_pts: Some(0.0),
        ml_pts: Some(0.0),
        contracture_deg: Some(25.0),
        ext_def_deg: Some(25.0),
        alignment: Alignment {
            degrees: None,
            other: true,
        },
        walk_pts: Some(10.0),
        stairs_pts: Some(0.0),
        aids_deduction: Some(-20.0),
    };
    let scores = compute_iks_scores(&input);
    // 90° flexion: 35° short, 7 steps.
    assert_eq!(scores.mobility_pts, 18.0);
    assert_eq!(scores.knee_positive, 28.0);
    assert_eq!(scores.knee_deductions, -50.0);
    assert_eq!(scores.knee_score, 0.0);
    assert_eq!(scores.function_raw, -10.0);
    assert_eq!(scores.function_score, 0.0);
}

#[test]
fn scores_above_range_are_truncated_not_rescaled() {
    let mut input = best_knee();
    input.ap_pts = Some(40.0);
    let scores = compute_iks_scores(&input);
    assert_eq!(scores.knee_positive, 130.0);
    assert_eq!(scores.knee_score, 100.0);
}

#[test]
fn missing_inputs_count_as_zero() {
    let scores = compute_iks_scores(&IksInput::default());
    assert_eq!(scores.knee_score, 0.0);
    assert_eq!(scores.function_score, 0.0);
    assert_eq!(scores.inputs_present, 0);
    assert_eq!(
        scores.inputs_missing,
        vec!["painPts", "flexDeg", "apPts", "mlPts", "walkPts", "stairsPts"]
    );
}

#[test]
fn inputs_resolve_through_aliases() {
    let answers: AnswerSet = [
        ("pain_points", AnswerValue::from(45)),
        ("flex", AnswerValue::from(120)),
        ("apPts", AnswerValue::from(5)),
        ("ml_points", AnswerValue::from(10)),
        ("contracture", AnswerValue::from(8)),
        ("alignment_deg", AnswerValue::from(7)),
        ("alignOther", AnswerValue::from("false")),
        ("walk", AnswerValue::from(40)),
        ("stairs_points", AnswerValue::from(30)),
        ("aidsDeduction", AnswerValue::from(-5)),
    ]
    .into_iter()
    .collect();

    let input = IksInput::from_answers(&answers);
    assert_eq!(input.pain_pts, Some(45.0));
    assert_eq!(input.flex_deg, Some(120.0));
    assert!(!input.alignment.other);
    assert_eq!(input.ext_def_deg, None);

    let ScoreResult::Iks(scores) = Iks.score(&answers) else {
        panic!("expected IKS scores");
    };
    // 45 + 24 + 15 - 2
    assert_eq!(scores.knee_score, 82.0);
    // 40 + 30 - 5
    assert_eq!(scores.function_score, 65.0);
}

#[test]
fn align_other_flag_accepts_truthy_strings() {
    let answers: AnswerSet = [("alignOther", AnswerValue::from("true"))].into_iter().collect();
    assert!(IksInput::from_answers(&answers).alignment.other);

    let answers: AnswerSet = [("alignOther", AnswerValue::from(1))].into_iter().collect();
    assert!(IksInput::from_answers(&answers).alignment.other);
}

#[test]
fn tier_tables_live_in_the_registry() {
    let iks = Iks;
    let pain = iks.question("painPts").expect("pain question");
    assert_eq!(pain.options().len(), 7);
    assert_eq!(pain.max_value(), 50.0);
    let aids = iks.question("aidsDeduction").expect("aids question");
    assert_eq!(aids.min_value(), -20.0);
    assert_eq!(iks.question("walkPts").map(|q| q.options().len()), Some(6));
    assert_eq!(iks.question("stairsPts").map(|q| q.options().len()), Some(6));
}
