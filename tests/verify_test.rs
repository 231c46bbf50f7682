//! 答案核对算法测试：大小写/空白容错、多值比较、聚合报告

use serde_json::json;

use exam_engine::models::{AnswerExpectation, AnswerMap, AnswerValue};
use exam_engine::services::verify::normalize_text;
use exam_engine::services::{check_answer, check_answers};
use exam_engine::ExamSession;

fn text(s: &str) -> AnswerValue {
    AnswerValue::Text(s.to_string())
}

fn many(items: &[&str]) -> AnswerValue {
    AnswerValue::Many(items.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_normalize_text() {
    assert_eq!(normalize_text("  true "), "TRUE");
    assert_eq!(normalize_text("solar   power"), "SOLAR POWER");
    assert_eq!(normalize_text("\tNot\n Given "), "NOT GIVEN");
    assert_eq!(normalize_text(""), "");
}

#[test]
fn test_single_value_case_and_whitespace() {
    assert!(check_answer(&text("  true "), &text("TRUE")));
    assert!(check_answer(&text("Paris"), &text("paris")));
    assert!(check_answer(&text("not  given"), &text("NOT GIVEN")));
    assert!(!check_answer(&text("FALSE"), &text("TRUE")));
}

#[test]
fn test_multi_value_order_insensitive() {
    assert!(check_answer(&many(&["D", "A"]), &many(&["A", "D"])));
    assert!(check_answer(&text("A, D"), &many(&["A", "D"])));
    assert!(check_answer(&many(&["a", "d"]), &text("D,A")));
    assert!(!check_answer(&many(&["A"]), &text("A,D")));
    assert!(!check_answer(&many(&["A", "B", "D"]), &many(&["A", "D"])));
}

#[test]
fn test_single_multi_coercion() {
    // 单元素两种形态可互相转换
    assert!(check_answer(&many(&["A"]), &text("A")));
    assert!(check_answer(&text("A"), &many(&["A"])));
    // 多元素作答永远匹配不上单值期望
    assert!(!check_answer(&many(&["A", "D"]), &text("A")));
}

#[test]
fn test_bracket_layer_stripped() {
    assert!(check_answer(&text("(A), [D]"), &many(&["A", "D"])));
    assert!(check_answer(&many(&["(B)", "C"]), &many(&["C", "B"])));
}

#[test]
fn test_empty_answers() {
    // 未作答只在期望也为空时判对
    assert!(check_answer(&text(""), &text("")));
    assert!(!check_answer(&text(""), &text("TRUE")));
    assert!(check_answer(&many(&[]), &many(&[])));
    assert!(!check_answer(&many(&[]), &many(&["A"])));
}

#[test]
fn test_check_answers_aggregate() {
    let expectations = vec![
        AnswerExpectation::new("1", "TRUE"),
        AnswerExpectation::new("2", "FALSE"),
        AnswerExpectation::new("3", many(&["A", "D"])),
    ];

    let mut answers = AnswerMap::new();
    answers.insert("1".to_string(), text("true"));
    answers.insert("2".to_string(), text("TRUE"));
    answers.insert("3".to_string(), many(&["D", "A"]));

    let report = check_answers(&expectations, &answers);
    assert_eq!(report.total, 3);
    assert_eq!(report.correct, 2);
    assert_eq!(report.wrong, 1);

    assert!(report.detail[0].correct);
    assert!(!report.detail[1].correct);
    assert!(report.detail[2].correct);
    assert_eq!(report.detail[1].id, "2");
    assert_eq!(report.detail[1].user, text("TRUE"));
    assert_eq!(report.detail[1].expected, text("FALSE"));
}

#[test]
fn test_check_answers_missing_id_counts_wrong() {
    // 映射里不存在的 id 按空作答核对
    let expectations = vec![AnswerExpectation::new("99", "TRUE")];
    let report = check_answers(&expectations, &AnswerMap::new());
    assert_eq!(report.total, 1);
    assert_eq!(report.wrong, 1);
}

#[test]
fn test_corrupt_expected_degrades_to_wrong() {
    // 期望答案字段形态损坏时降级为空值，判错但不 panic
    let corrupt = AnswerValue::from_json(&json!({ "unexpected": "object" }));
    assert_eq!(corrupt, text(""));
    assert!(!check_answer(&text("TRUE"), &corrupt));
}

#[test]
fn test_scenario_tfng_marks_correct() {
    let raw = json!({
        "module": "reading",
        "sections": [{
            "section_number": 1,
            "question_groups": [{
                "type": "true_false_notgiven",
                "questions": [
                    { "id": 1, "question": "骆驼在 19 世纪被引入", "correct_answer": "TRUE" }
                ]
            }]
        }]
    });

    let mut session = ExamSession::new(&raw, None).expect("考试加载应成功");
    session.set_answer("1", "true");

    let submission = session.submit();
    assert_eq!(submission.report.total, 1);
    assert_eq!(submission.report.correct, 1);
    let detail = &submission.report.detail[0];
    assert_eq!(detail.id, "1");
    assert!(detail.correct, "大小写不同的 TRUE 应判对");
}

#[test]
fn test_scenario_table_placeholder_verification() {
    let raw = json!({
        "module": "listening",
        "sections": [{
            "section_number": 1,
            "question_groups": [{
                "type": "table_completion",
                "table": { "cells": [["维护费", "[14]"], ["人工费", "25"]] },
                "answers": [{ "id": "14", "correct_answer": "25" }]
            }]
        }]
    });

    let mut session = ExamSession::new(&raw, None).expect("考试加载应成功");

    // 全表只有 [14] 一个作答位，"25" 是普通文本
    let ids: Vec<&String> = session.answers().keys().collect();
    assert_eq!(ids, vec!["14"]);

    session.set_answer("14", "25");
    let submission = session.submit();
    assert_eq!(submission.report.correct, 1);
}
