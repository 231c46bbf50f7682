//! 端到端集成测试：整卷归一化 → 播种 → 渲染 → 作答 → 判分

use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

use exam_engine::models::{load_all_exam_files, load_exam_file, AnswerMap, AnswerValue};
use exam_engine::services;
use exam_engine::workflow::Surface;
use exam_engine::{ExamSession, GroupType};

/// 一份覆盖全部题型的混合考试
fn mixed_exam() -> serde_json::Value {
    json!({
        "module": "reading",
        "sections": [
            {
                "section_number": 1,
                "passage": "The history of Australian camels...",
                "question_groups": [
                    {
                        "type": "true_false_notgiven",
                        "questions": [
                            { "id": 1, "question": "骆驼原产澳大利亚", "correct_answer": "FALSE" },
                            { "id": 2, "question": "骆驼在内陆运输中发挥过作用", "correct_answer": "TRUE" }
                        ]
                    },
                    {
                        "type": "mult_choice",
                        "questions": [{
                            "id": "3",
                            "question": "作者的态度是？",
                            "options": ["A. 支持", "B. 反对", "C. 中立"],
                            "correct_answer": "C"
                        }]
                    },
                    {
                        "type": "mult_choice",
                        "layout": "checkbox",
                        "required_count": 2,
                        "questions": [{
                            "id": "4",
                            "question": "文中提到了哪两项？",
                            "options": ["A. 铁路", "B. 电报线", "C. 运河", "D. 公路"],
                            "correct_answer": ["A", "B"]
                        }]
                    }
                ]
            },
            {
                "section_number": 2,
                "question_groups": [
                    {
                        "type": "matching_headings",
                        "use_once": true,
                        "questions": [
                            { "id": 5, "question": "Paragraph A", "answer": "ii" },
                            { "id": 6, "question": "Paragraph B", "answer": "i" }
                        ],
                        "headings": ["i. 早期历史", "ii. 现状", "iii. 未来展望"]
                    },
                    {
                        "type": "summary_completion",
                        "passage": "Wild camels now number about [7] across [8] regions.",
                        "answers": [
                            { "id": "7", "correct_answer": "300000" },
                            { "id": "8", "correct_answer": "desert" }
                        ]
                    },
                    {
                        "type": "diagram_label",
                        "image": "https://cdn.example.com/pump.png",
                        "items": [
                            { "id": "9", "text": "水箱上方是 [9]" },
                            { "id": "10", "text": "进水口" }
                        ],
                        "answers": [
                            { "id": "9", "correct_answer": "水泵" },
                            { "id": "10", "correct_answer": "阀门" }
                        ]
                    },
                    { "type": "alien_widget", "payload": "unknown" }
                ]
            }
        ]
    })
}

#[test]
fn test_seed_completeness() {
    let session = ExamSession::new(&mixed_exam(), None).expect("考试加载应成功");

    // 每个题组枚举出的作答位都必须在播种后的映射里
    for group in session.exam().groups() {
        for slot in services::answer_slots(group) {
            assert!(
                session.answers().contains_key(&slot.id),
                "作答位 {} 缺少种子值",
                slot.id
            );
        }
    }

    // 多选位播 []，其余播 ""
    assert_eq!(session.answers()["4"], AnswerValue::Many(vec![]));
    assert_eq!(session.answers()["1"], AnswerValue::Text(String::new()));
    assert_eq!(session.answers().len(), 10);
}

#[test]
fn test_full_exam_flow() {
    let mut session = ExamSession::new(&mixed_exam(), None).expect("考试加载应成功");

    session.set_answer("1", "false");
    session.set_answer("2", "true");
    session.set_answer("3", "C");
    session.toggle_answer("4", "A");
    session.toggle_answer("4", "B");
    session.set_answer("5", "ii");
    session.set_answer("6", "i");
    session.set_answer("7", "300,000"); // 逗号分节写法按多值歧义判错
    session.set_answer("8", " DESERT ");
    session.set_answer("9", "水泵");
    session.set_answer("10", "阀门");

    let submission = session.submit();
    assert_eq!(submission.report.total, 10);
    assert_eq!(submission.report.wrong, 1, "只有 300,000 因逗号歧义判错");
    assert_eq!(submission.report.correct, 9);

    let wrong: Vec<&str> = submission
        .report
        .detail
        .iter()
        .filter(|d| !d.correct)
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(wrong, vec!["7"]);
}

#[test]
fn test_multi_select_toggle() {
    let mut session = ExamSession::new(&mixed_exam(), None).expect("考试加载应成功");

    session.toggle_answer("4", "A");
    session.toggle_answer("4", "B");
    assert_eq!(
        session.answers()["4"],
        AnswerValue::Many(vec!["A".to_string(), "B".to_string()])
    );

    // 再次勾选同一项 = 取消
    session.toggle_answer("4", "A");
    assert_eq!(session.answers()["4"], AnswerValue::Many(vec!["B".to_string()]));
}

#[test]
fn test_use_once_matching_excludes_taken_options() {
    let mut session = ExamSession::new(&mixed_exam(), None).expect("考试加载应成功");

    // 行 5 选走 "i" 之前，行 6 能看到全部三个选项
    let options_before = matching_row_options(&session, "6");
    assert_eq!(options_before, vec!["i", "ii", "iii"]);

    session.set_answer("5", "i");
    let options_after = matching_row_options(&session, "6");
    assert_eq!(options_after, vec!["ii", "iii"], "被选走的 i 应从行 6 剔除");

    // 行 5 自己的候选集仍包含 "i"
    let own_options = matching_row_options(&session, "5");
    assert!(own_options.contains(&"i".to_string()));

    // 取消选择后 "i" 立即回到行 6 的候选集
    session.set_answer("5", "");
    let options_restored = matching_row_options(&session, "6");
    assert_eq!(options_restored, vec!["i", "ii", "iii"]);
}

/// 从渲染结果里取配对某一行的候选选项 id
fn matching_row_options(session: &ExamSession, row_id: &str) -> Vec<String> {
    for section in session.render() {
        for surface in section.groups {
            if let Surface::MatchingSelect { rows, .. } = surface {
                for row in rows {
                    if row.id == row_id {
                        return row.options.into_iter().map(|o| o.id).collect();
                    }
                }
            }
        }
    }
    panic!("找不到配对行 {}", row_id);
}

#[test]
fn test_unsupported_group_renders_inert() {
    let session = ExamSession::new(&mixed_exam(), None).expect("考试加载应成功");

    let surfaces = session.render();
    let last_section = &surfaces[1];
    let Some(Surface::Unsupported { raw_type }) = last_section.groups.last() else {
        panic!("未识别题组应渲染为惰性占位");
    };
    assert_eq!(raw_type, "ALIEN_WIDGET");

    // 未识别题组不产生作答位，也不参与判分
    let unsupported_count = session
        .exam()
        .groups()
        .filter(|g| matches!(g.group_type(), GroupType::Unsupported(_)))
        .count();
    assert_eq!(unsupported_count, 1);
    assert_eq!(session.submit().report.total, 10);
}

#[test]
fn test_resume_with_saved_answers() {
    let mut saved = AnswerMap::new();
    saved.insert("1".to_string(), AnswerValue::Text("FALSE".to_string()));
    saved.insert(
        "4".to_string(),
        AnswerValue::Many(vec!["A".to_string()]),
    );

    let session = ExamSession::new(&mixed_exam(), Some(&saved)).expect("考试加载应成功");

    // 已保存的值生效，其余作答位照常播种空值
    assert_eq!(session.answers()["1"], AnswerValue::Text("FALSE".to_string()));
    assert_eq!(
        session.answers()["4"],
        AnswerValue::Many(vec!["A".to_string()])
    );
    assert_eq!(session.answers()["2"], AnswerValue::Text(String::new()));
    assert_eq!(session.answered_count(), 2);
}

#[test]
fn test_change_listener_fires_on_every_write() {
    let mut session = ExamSession::new(&mixed_exam(), None).expect("考试加载应成功");

    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let seen_in_listener = Rc::clone(&seen);
    session.on_change(move |answers| {
        seen_in_listener.borrow_mut().push(answers.len());
    });

    session.set_answer("1", "TRUE");
    session.toggle_answer("4", "A");
    session.update_answer("3", |_, _| AnswerValue::Text("C".to_string()));

    // 每次写入都带上整张映射通知一次
    assert_eq!(seen.borrow().len(), 3);
    assert!(seen.borrow().iter().all(|len| *len == 10));
}

#[test]
fn test_legacy_exam_conversion() {
    let raw = json!({
        "type": "listening",
        "reading": [],
        "listening": [
            {
                "audio": "https://cdn.example.com/section1.mp3",
                "groups": [{
                    "type": "note_completion",
                    "passage": "Caller name: [1], phone: [2]",
                    "answers": [
                        { "id": "1", "correct_answer": "Sarah" },
                        { "id": "2", "correct_answer": "83092" }
                    ]
                }]
            },
            {
                "section": 2,
                "groups": [{
                    "type": "listening_map",
                    "items": [{ "id": "3", "text": "图书馆" }],
                    "answers": [{ "id": "3", "correct_answer": "B" }]
                }]
            }
        ]
    });

    let mut session = ExamSession::new(&raw, None).expect("旧版考试应能转换");
    let exam = session.exam();

    assert_eq!(exam.module, "listening");
    assert_eq!(exam.sections.len(), 2);
    assert_eq!(exam.sections[0].section_number, 1);
    assert_eq!(
        exam.sections[0].audio_url.as_deref(),
        Some("https://cdn.example.com/section1.mp3")
    );
    assert_eq!(exam.sections[1].section_number, 2);
    assert_eq!(
        exam.sections[1].question_groups[0].group_type(),
        GroupType::DiagramLabel
    );

    session.set_answer("1", "sarah");
    session.set_answer("2", "83092");
    session.set_answer("3", "b");
    assert_eq!(session.submit().report.correct, 3);
}

#[test]
fn test_load_exam_files_from_folder() {
    let folder = std::env::temp_dir().join(format!("exam_engine_test_{}", std::process::id()));
    std::fs::create_dir_all(&folder).expect("创建临时目录应成功");

    std::fs::write(
        folder.join("paper1.json"),
        serde_json::to_string(&mixed_exam()).expect("序列化应成功"),
    )
    .expect("写入 JSON 文件应成功");

    // TOML 形态的考试文件（另一代编辑工具的产出）
    std::fs::write(
        folder.join("paper2.toml"),
        r#"
module = "reading"

[[sections]]
section_number = 1

[[sections.question_groups]]
type = "short_answer"

[[sections.question_groups.questions]]
id = "1"
question = "What powers the pump?"
answer = "solar power"
"#,
    )
    .expect("写入 TOML 文件应成功");

    // 无法解析的文件只跳过，不影响其余文件
    std::fs::write(folder.join("broken.json"), "{ not json").expect("写入损坏文件应成功");

    let loaded = load_all_exam_files(&folder.to_string_lossy()).expect("扫描目录应成功");
    assert_eq!(loaded.len(), 2, "损坏文件应被跳过");
    assert_eq!(loaded[0].0, "paper1.json");
    assert_eq!(loaded[1].0, "paper2.toml");

    let toml_exam = load_exam_file(&folder.join("paper2.toml")).expect("TOML 考试应能加载");
    let mut session = ExamSession::new(&toml_exam, None).expect("TOML 考试应能归一化");
    session.set_answer("1", "Solar  Power");
    assert_eq!(session.submit().report.correct, 1);

    std::fs::remove_dir_all(&folder).ok();
}
