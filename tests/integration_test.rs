use science_bowl_reader::config::Config;
use science_bowl_reader::extractor::{ExtractorConfig, QuestionExtractor};
use science_bowl_reader::models::{load_questions, Category, QuestionStyle, QuestionType};
use science_bowl_reader::orchestrator::{App, Flow, SourceMode};
use science_bowl_reader::extractor::DiscardReason;
use science_bowl_reader::services::{DocumentService, QuestionBankService};
use science_bowl_reader::session::Phase;
use science_bowl_reader::ui::{Command, TerminalRenderer};
use std::path::PathBuf;

const QUESTIONS_JSON: &str = r#"[
    {"number": "1", "category": "MATH", "style": "Short Answer", "type": "TOSS UP",
     "question": "What is 6 times 7?", "answer": "42"},
    {"number": "1", "category": "MATH", "style": "Multiple Choice", "type": "BONUS",
     "question": "Which is prime?\nW) 4\nX) 6\nY) 7\nZ) 9", "answer": "Y) 7"},
    {"number": "2", "category": "PHYSICS", "style": "Short Answer", "type": "TOSS UP",
     "question": "What is the SI unit of force?", "answer": "NEWTON"},
    {"number": "3", "category": "MATH", "style": "Short Answer", "type": "TOSS UP",
     "question": "What is 2 cubed?", "answer": "8"},
    {"number": "2", "category": "PHYSICS", "style": "Short Answer", "type": "BONUS",
     "question": "What is g in m/s^2?", "answer": "9.8"}
]"#;

/// 在临时目录写入测试文件
fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "science_bowl_reader_{}_{}",
        std::process::id(),
        name
    ));
    std::fs::write(&path, content).expect("写入临时文件失败");
    path
}

fn test_config(questions: &PathBuf, log_name: &str) -> Config {
    Config {
        questions_source: questions.display().to_string(),
        categories_source: None,
        output_log_file: std::env::temp_dir()
            .join(format!("science_bowl_reader_{}_{}", std::process::id(), log_name))
            .display()
            .to_string(),
        rng_seed: Some(7),
        ..Config::default()
    }
}

#[test]
fn test_load_questions_with_tokio_test() {
    let path = temp_file("block_on.json", QUESTIONS_JSON);
    let questions = tokio_test::block_on(load_questions(path.to_str().unwrap())).unwrap();

    assert_eq!(questions.len(), 5);
    assert_eq!(questions[1].style, QuestionStyle::MultipleChoice);
    assert_eq!(questions[1].question_type, QuestionType::Bonus);
}

#[tokio::test]
async fn test_bank_derives_categories_when_list_missing() {
    let path = temp_file("bank.json", QUESTIONS_JSON);
    let mut config = test_config(&path, "bank.log");
    config.categories_source = Some("no/such/categories.json".to_string());

    let bank = QuestionBankService::new(&config).load().await.unwrap();
    assert_eq!(bank.questions.len(), 5);
    assert_eq!(bank.categories, vec!["MATH", "PHYSICS"]);
}

#[tokio::test]
async fn test_bank_uses_category_file() {
    let path = temp_file("bank2.json", QUESTIONS_JSON);
    let categories = temp_file("categories.json", r#"["PHYSICS", "MATH", "ENERGY"]"#);
    let mut config = test_config(&path, "bank2.log");
    config.categories_source = Some(categories.display().to_string());

    let bank = QuestionBankService::new(&config).load().await.unwrap();
    assert_eq!(bank.categories, vec!["PHYSICS", "MATH", "ENERGY"]);
}

#[tokio::test]
async fn test_malformed_database_is_source_error() {
    let path = temp_file("broken.json", "[{\"number\": 1");
    let err = load_questions(path.to_str().unwrap()).await.unwrap_err();
    assert!(err.to_string().contains("JSON"));
}

#[tokio::test]
async fn test_practice_round_through_commands() {
    let path = temp_file("round.json", QUESTIONS_JSON);
    let mut app = App::with_writer(test_config(&path, "round.log"), Vec::new()).unwrap();

    assert_eq!(app.handle_command(Command::LoadDatabase).await.unwrap(), Flow::Continue);
    assert_eq!(app.session().stats_line(), "Showing 5 of 5 questions");

    app.handle_command(Command::Filter("math".to_string())).await.unwrap();
    assert_eq!(app.session().filtered_len(), 3);
    assert_eq!(app.session().current_index(), Some(0));

    // 抢答前作答无效
    app.handle_command(Command::Answer("42".to_string())).await.unwrap();
    assert_eq!(app.stats().answered, 0);

    app.handle_command(Command::Buzz).await.unwrap();
    assert_eq!(app.session().phase(), Phase::Buzzed);
    app.handle_command(Command::Answer(" 42 ".to_string())).await.unwrap();
    assert_eq!(app.session().phase(), Phase::Graded);

    app.handle_command(Command::Next).await.unwrap();
    assert_eq!(app.session().phase(), Phase::Revealing);
    app.handle_command(Command::Buzz).await.unwrap();
    app.handle_command(Command::Answer("y".to_string())).await.unwrap();

    let stats = app.stats();
    assert_eq!(stats.answered, 2);
    assert_eq!(stats.correct, 2);
    assert_eq!(app.handle_command(Command::Quit).await.unwrap(), Flow::Quit);

    let output = String::from_utf8(app.into_output()).unwrap();
    assert!(output.contains("Showing 3 of 5 questions"));
    assert!(output.contains("✅ 正确！"));
}

#[tokio::test]
async fn test_unreadable_pdf_keeps_state() {
    let path = temp_file("keep.json", QUESTIONS_JSON);
    let mut app = App::with_writer(test_config(&path, "keep.log"), Vec::new()).unwrap();
    app.handle_command(Command::LoadDatabase).await.unwrap();
    app.handle_command(Command::Next).await.unwrap();

    app.handle_command(Command::LoadPdf(PathBuf::from("no/such/round.pdf")))
        .await
        .unwrap();

    assert_eq!(app.mode(), &SourceMode::Database);
    assert_eq!(app.session().questions().len(), 5);
    assert_eq!(app.session().current_index(), Some(1));
    let output = String::from_utf8(app.into_output()).unwrap();
    assert!(output.contains("读取 PDF 失败"));
}

#[tokio::test]
async fn test_missing_database_leaves_session_empty() {
    let path = PathBuf::from("no/such/questions.json");
    let mut app = App::with_writer(test_config(&path, "missing.log"), Vec::new()).unwrap();
    app.handle_command(Command::LoadDatabase).await.unwrap();

    assert_eq!(app.session().phase(), Phase::Empty);
    assert_eq!(app.session().stats_line(), "Showing 0 of 0 questions");
    let output = String::from_utf8(app.into_output()).unwrap();
    assert!(output.contains("⚠️ 加载题库失败"));
}

#[tokio::test]
async fn test_filter_accepts_category_aliases() {
    let path = temp_file(
        "aliases.json",
        r#"[
        {"number": "1", "category": "EARTH & SPACE", "style": "Short Answer", "type": "TOSS UP",
         "question": "What is the closest star to Earth?", "answer": "SUN"},
        {"number": "2", "category": "Mathematics", "style": "Short Answer", "type": "TOSS UP",
         "question": "What is 3 squared?", "answer": "9"}
    ]"#,
    );
    let mut app = App::with_writer(test_config(&path, "aliases.log"), Vec::new()).unwrap();
    app.handle_command(Command::LoadDatabase).await.unwrap();

    assert_eq!(
        app.session().categories().to_vec(),
        vec!["EARTH AND SPACE", "MATH"]
    );
    app.handle_command(Command::Filter("EARTH & SPACE".to_string()))
        .await
        .unwrap();
    assert_eq!(app.session().filtered_len(), 1);
    app.handle_command(Command::Filter("mathematics".to_string()))
        .await
        .unwrap();
    assert_eq!(app.session().filtered_len(), 1);
}

#[tokio::test]
async fn test_debug_without_pdf_reports_nothing_loaded() {
    let path = temp_file("debug.json", QUESTIONS_JSON);
    let mut app = App::with_writer(test_config(&path, "debug.log"), Vec::new()).unwrap();
    app.handle_command(Command::ToggleDebug).await.unwrap();
    app.handle_command(Command::ToggleDebug).await.unwrap();

    assert!(app.last_extraction().is_none());
    let output = String::from_utf8(app.into_output()).unwrap();
    assert!(output.contains("还没有从 PDF 提取过题目"));
    assert!(output.contains("已隐藏提取报告"));
}

#[test]
fn test_extraction_report_from_text() {
    let transcript = "MIT Science Bowl 2024 Round 2 \
        TOSS UP 1) PHYSICS Short Answer What is g? ANSWER: 9.8 \
        BONUS 1) PHYSICS Short Answer Name the unit of charge. \
        TOSS UP no header in this block ANSWER: lost";

    let service = DocumentService::new(&ExtractorConfig::default()).unwrap();
    let extraction = service.extract_from_text(transcript).unwrap();

    assert_eq!(extraction.block_count(), 3);
    assert_eq!(extraction.questions.len(), 1);
    let reasons: Vec<_> = extraction.discarded.iter().map(|d| d.reason).collect();
    assert_eq!(
        reasons,
        vec![DiscardReason::MissingAnswerMarker, DiscardReason::MissingHeader]
    );

    let mut renderer = TerminalRenderer::new(Vec::new());
    renderer
        .render_extraction_report("round2.pdf", &extraction)
        .unwrap();
    let output = String::from_utf8(renderer.into_inner()).unwrap();
    assert!(output.contains("题块 3 个 | 提取 1 道 | 丢弃 2 个"));
    assert!(output.contains("#2 BONUS [缺少 ANSWER:]"));
    assert!(output.contains("#3 TOSS UP [缺少题头]"));
}

#[test]
fn test_extract_multi_page_transcript() {
    let transcript = "MIT Science Bowl 2024 Round 1\n\
        TOSS UP\n1) MATH Short Answer What is the sum of the interior angles of a triangle,\n\
        in degrees?\nANSWER: 180\n\
        BONUS\n1) MATH Multiple Choice Which of the following is irrational? W) 1/2 X) 0.25\n\
        MIT Science Bowl 2024 Page 1\n\
        Y) square root of 2 Z) 4\nANSWER: Y) SQUARE ROOT OF 2\n\
        TOSS UP\n2) PHYSICS Short Answer By what factor does kinetic energy change when speed doubles?\n\
        ANSWER: )\n\
        TOSS UP\n3) BIOLOGY Short Answer Name the powerhouse of the cell.\n\
        MIT Science Bowl 2024 Page 2\n";

    let extractor = QuestionExtractor::new(&ExtractorConfig::default()).unwrap();
    let extraction = extractor.extract_with_report(transcript);
    let questions = extraction.questions;

    assert_eq!(questions.len(), 3);

    assert_eq!(questions[0].category, Category::Math);
    assert_eq!(
        questions[0].question,
        "What is the sum of the interior angles of a triangle, in degrees?"
    );
    assert_eq!(questions[0].answer, "180");

    assert_eq!(questions[1].question_type, QuestionType::Bonus);
    assert_eq!(
        questions[1].question,
        "Which of the following is irrational?\nW) 1/2\nX) 0.25\nY) square root of 2\nZ) 4"
    );
    assert_eq!(questions[1].answer, "Y) SQUARE ROOT OF 2");

    assert_eq!(questions[2].category, Category::Physics);
    assert_eq!(questions[2].answer, "1/2");

    assert_eq!(extraction.discarded.len(), 1);
}
