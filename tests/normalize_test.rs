//! 占位符解析、题型归一化与各适配器的单元级测试
//!
//! 覆盖两条核心性质：
//! - 占位符拆分可无损还原原文
//! - 每个适配器对自身输出再适配一次结果不变（幂等）

use serde_json::json;

use exam_engine::models::{GroupType, QuestionGroup};
use exam_engine::services::{
    extract_placeholder_ids, has_placeholder, normalize_group, normalize_type,
    split_by_placeholders, Token,
};

/// 拼接全部片段原文
fn reassemble(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.literal()).collect()
}

/// 从片段里按首次出现顺序取占位符 id（去重）
fn token_ids(tokens: &[Token]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for token in tokens {
        if let Token::Placeholder { id, .. } = token {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
    }
    ids
}

#[test]
fn test_placeholder_round_trip() {
    let cases = [
        "",
        "没有任何占位符的普通文本",
        "[1]",
        "开头[1]中间[2]结尾",
        "[1][2]相邻占位符",
        "重复出现 [3] 再次 [3] 收尾 [4]",
        "The camels were brought to [14] in the 19th century.",
    ];

    for text in cases {
        let tokens = split_by_placeholders(text);
        assert_eq!(reassemble(&tokens), text, "拆分后应能无损还原: {}", text);
        assert_eq!(
            extract_placeholder_ids(text),
            token_ids(&tokens),
            "提取的 id 应与拆分结果一致: {}",
            text
        );
    }
}

#[test]
fn test_placeholder_extract_order_and_dedup() {
    let ids = extract_placeholder_ids("先 [12] 再 [7] 又见 [12] 最后 [3]");
    assert_eq!(ids, vec!["12", "7", "3"]);

    assert!(extract_placeholder_ids("").is_empty());
    assert!(extract_placeholder_ids("无占位符").is_empty());
}

#[test]
fn test_placeholder_malformed_stays_literal() {
    // 括号不配对、内容非数字：不匹配，按普通文本处理
    for text in ["[abc]", "[12", "12]", "[ 5 ]", "[]"] {
        assert!(!has_placeholder(text), "不应识别为占位符: {}", text);
        let tokens = split_by_placeholders(text);
        assert_eq!(tokens.len(), 1);
        assert_eq!(reassemble(&tokens), text);
    }
}

#[test]
fn test_placeholder_split_shape() {
    let tokens = split_by_placeholders("[1]text[2]");
    assert_eq!(
        tokens,
        vec![
            Token::Text {
                value: "".to_string()
            },
            Token::Placeholder {
                id: "1".to_string(),
                raw: "[1]".to_string()
            },
            Token::Text {
                value: "text".to_string()
            },
            Token::Placeholder {
                id: "2".to_string(),
                raw: "[2]".to_string()
            },
            Token::Text {
                value: "".to_string()
            },
        ]
    );

    // 无占位符时返回单个完整文本片段
    assert_eq!(
        split_by_placeholders("plain"),
        vec![Token::Text {
            value: "plain".to_string()
        }]
    );
}

#[test]
fn test_type_aliases() {
    let cases = [
        ("true_false_notgiven", GroupType::Tfng),
        ("TFNG", GroupType::Tfng),
        ("yes_no_not_given", GroupType::Ynng),
        ("matching_headings", GroupType::Matching),
        ("matching_info", GroupType::Matching),
        ("note_completion", GroupType::GapFill),
        ("sentence_completion", GroupType::GapFill),
        ("Summary_Completion", GroupType::GapFill),
        ("form_completion", GroupType::GapFill),
        ("short_answer", GroupType::GapFill),
        ("flow_chart_completion", GroupType::GapFill),
        ("table_completion", GroupType::TableCompletion),
        ("plan_map_diagram", GroupType::DiagramLabel),
        ("listening_map", GroupType::DiagramLabel),
    ];

    for (label, expected) in cases {
        let raw = json!({ "type": label });
        assert_eq!(normalize_type(&raw), expected, "标签: {}", label);
    }
}

#[test]
fn test_unknown_type_passes_through_uppercased() {
    let raw = json!({ "type": "alien_type" });
    let group_type = normalize_type(&raw);
    assert_eq!(group_type, GroupType::Unsupported("ALIEN_TYPE".to_string()));
    assert_eq!(group_type.as_str(), "ALIEN_TYPE");
}

#[test]
fn test_mult_choice_ambiguity() {
    // 单题、无布局提示 → 单选
    let single = json!({
        "type": "mult_choice",
        "questions": [{ "id": 1, "question": "只有一道题" }]
    });
    assert_eq!(normalize_type(&single), GroupType::McSingle);

    // 勾选布局提示 → 多选
    let hinted = json!({
        "type": "mult_choice",
        "layout": "checkbox",
        "questions": [{ "id": 1, "question": "仍是一道题" }]
    });
    assert_eq!(normalize_type(&hinted), GroupType::McMulti);

    // 多道题 → 多选
    let many = json!({
        "type": "mult_choice",
        "questions": [
            { "id": 1, "question": "第一题" },
            { "id": 2, "question": "第二题" }
        ]
    });
    assert_eq!(normalize_type(&many), GroupType::McMulti);
}

/// 适配一次再适配一次，结果必须相同
fn assert_idempotent(raw: serde_json::Value) {
    let once = normalize_group(&raw);
    let serialized = serde_json::to_value(&once).expect("归一化结果应可序列化");
    let twice = normalize_group(&serialized);
    assert_eq!(once, twice, "适配器应幂等: {}", raw);
}

#[test]
fn test_adapter_idempotence() {
    assert_idempotent(json!({
        "type": "true_false_notgiven",
        "instructions": "判断下列说法",
        "questions": [
            { "id": 1, "question": "骆驼原产澳大利亚", "answer": "FALSE" },
            { "id": "2", "text": "淡水资源有限", "correct_answer": "TRUE" }
        ]
    }));

    assert_idempotent(json!({
        "type": "mult_choice",
        "questions": [{
            "id": "q1",
            "question": "作者的主要观点是？",
            "options": ["A. 第一项", "B. 第二项", "C) 第三项"],
            "answer": "B"
        }]
    }));

    assert_idempotent(json!({
        "type": "multiple_choice_multi",
        "required_count": 2,
        "questions": [{
            "id": "q2",
            "question": "选出两项",
            "options": [
                { "key": "A", "text": "第一项" },
                { "key": "B", "text": "第二项" },
                { "key": "C", "text": "第三项" }
            ],
            "answer": ["A", "C"]
        }]
    }));

    assert_idempotent(json!({
        "type": "matching_headings",
        "use_once": true,
        "questions": [
            { "id": 1, "question": "Paragraph A", "answer": "ii" },
            { "id": 2, "question": "Paragraph B", "answer": "i" }
        ],
        "headings": ["i. 标题一", "ii. 标题二", "iii. 标题三"]
    }));

    assert_idempotent(json!({
        "type": "summary_completion",
        "passage": "Farming began [5] years ago in [6].",
        "answers": [
            { "id": "5", "correct_answer": "10000" },
            { "id": "6", "correct_answer": "Mesopotamia" }
        ]
    }));

    assert_idempotent(json!({
        "type": "short_answer",
        "questions": [
            { "id": 7, "question": "What fuels the pump?", "answer": "solar power" }
        ]
    }));

    assert_idempotent(json!({
        "type": "table_completion",
        "table": {
            "title": "年度开销",
            "cells": [["项目", "金额"], ["维护费", "[14]"], ["人工费", "25"]]
        },
        "answers": [{ "id": "14", "correct_answer": "25" }]
    }));

    assert_idempotent(json!({
        "type": "plan_map_diagram",
        "image": "https://cdn.example.com/map.png",
        "items": [
            { "id": "21", "text": "入口北侧是 [21]" },
            { "id": "22", "text": "停车场" }
        ],
        "answers": [{ "id": "21", "correct_answer": "售票处" }]
    }));

    assert_idempotent(json!({ "type": "alien_type" }));
}

#[test]
fn test_choice_option_parsing() {
    // 字符串选项走前导字母模式，不匹配时按位置字母兜底
    let raw = json!({
        "type": "multiple_choice",
        "questions": [{
            "id": "q1",
            "question": "测试",
            "options": ["A. 第一项", "无标号选项", "C、第三项"]
        }]
    });

    let QuestionGroup::ChoiceSingle(group) = normalize_group(&raw) else {
        panic!("应归一化为单选题组");
    };
    let options = &group.questions[0].options;
    assert_eq!(options[0].key, "A");
    assert_eq!(options[0].text, "第一项");
    assert_eq!(options[1].key, "B", "无标号选项按位置字母兜底");
    assert_eq!(options[1].text, "无标号选项");
    assert_eq!(options[2].key, "C");
    assert_eq!(options[2].text, "第三项");
}

#[test]
fn test_matching_fallback_from_questions() {
    // 旧版数据：左列放在题目列表里，答案跟在题目上
    let raw = json!({
        "type": "matching_info",
        "questions": [
            { "id": 1, "question": "Paragraph A", "answer": "ii" },
            { "id": 2, "question": "Paragraph B", "answer": "iii" }
        ],
        "options": ["i. 标题一", "ii. 标题二", "iii. 标题三"]
    });

    let QuestionGroup::Matching(group) = normalize_group(&raw) else {
        panic!("应归一化为配对题组");
    };

    assert!(group.matrix, "matching_info 应按勾选矩阵渲染");
    assert_eq!(group.left_items.len(), 2);
    assert_eq!(group.left_items[0].id, "1");
    assert_eq!(group.left_items[0].text, "Paragraph A");
    assert_eq!(group.right_options.len(), 3);
    assert_eq!(group.right_options[1].id, "ii");

    // 题目自带的答案收进期望答案列表
    assert_eq!(group.answers.len(), 2);
    assert_eq!(group.answers[0].id, "1");
}

#[test]
fn test_table_legacy_rows_field() {
    // 旧版数据把数据行直接放在 rows 里
    let raw = json!({
        "type": "table",
        "rows": [["表头一", "表头二"], ["正文", "[31]"]]
    });

    let QuestionGroup::TableCompletion(group) = normalize_group(&raw) else {
        panic!("应归一化为表格填空题组");
    };
    assert_eq!(group.rows, 2);
    assert_eq!(group.columns, 2);
    assert_eq!(group.cells[1][1], "[31]");
}

#[test]
fn test_table_ragged_rows_padded() {
    let raw = json!({
        "type": "table_completion",
        "cells": [["一", "二", "三"], ["四"]]
    });

    let QuestionGroup::TableCompletion(group) = normalize_group(&raw) else {
        panic!("应归一化为表格填空题组");
    };
    assert_eq!(group.columns, 3);
    assert_eq!(group.cells[1], vec!["四", "", ""], "不规则行应补空串成稠密网格");
}

#[test]
fn test_empty_shapes_do_not_panic() {
    // 畸形题组归一化成空态，不抛错
    let empty_table = normalize_group(&json!({ "type": "table_completion" }));
    let QuestionGroup::TableCompletion(group) = &empty_table else {
        panic!("应归一化为表格填空题组");
    };
    assert_eq!(group.rows, 0);
    assert_eq!(group.columns, 0);

    let empty_diagram = normalize_group(&json!({ "type": "diagram_label" }));
    let QuestionGroup::DiagramLabel(group) = &empty_diagram else {
        panic!("应归一化为图示标注题组");
    };
    assert!(group.items.is_empty());

    let empty_matching = normalize_group(&json!({ "type": "matching" }));
    let QuestionGroup::Matching(group) = &empty_matching else {
        panic!("应归一化为配对题组");
    };
    assert!(group.left_items.is_empty());
}
