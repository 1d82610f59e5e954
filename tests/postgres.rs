//! Repository tests against a real Postgres
//!
//! Need Docker: `cargo test -- --ignored`

use std::sync::OnceLock;

use chrono::Utc;
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use codequest_judge::{
    db::{
        self,
        repositories::{ProgressRepository, QuestionRepository, SubmissionRepository},
    },
    judge::languages::Language,
    models::{Difficulty, NewQuestion, NewSubmission, SkillTier, TestCase, Verdict},
};

static POSTGRES: OnceCell<ContainerAsync<Postgres>> = OnceCell::const_new();
static MIGRATED: OnceLock<()> = OnceLock::new();

/// Start (once) a Postgres container and connect a fresh pool to it
async fn pool() -> PgPool {
    let container = POSTGRES
        .get_or_init(|| async {
            Postgres::default()
                .with_user("codequest")
                .with_password("codequest_test")
                .with_db_name("codequest_test")
                .with_tag("16-alpine")
                .start()
                .await
                .expect("Failed to start PostgreSQL container")
        })
        .await;

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!(
        "postgres://codequest:codequest_test@{}:{}/codequest_test",
        host, port
    );

    let pool = PgPool::connect(&url).await.expect("Failed to connect");
    if MIGRATED.get().is_none() {
        db::run_migrations(&pool).await.expect("Failed to run migrations");
        let _ = MIGRATED.set(());
    }
    pool
}

fn new_question(owner: &str, difficulty: Difficulty) -> NewQuestion {
    NewQuestion {
        user_id: owner.to_string(),
        title: "Sum of two".to_string(),
        description: "Add two integers".to_string(),
        difficulty,
        category: "math".to_string(),
        constraints: None,
        examples: vec![],
        test_cases: vec![
            TestCase {
                input: "1 2".to_string(),
                expected_output: "3".to_string(),
                is_hidden: false,
            },
            TestCase {
                input: "10 -4".to_string(),
                expected_output: "6".to_string(),
                is_hidden: true,
            },
        ],
        starter_code: [(Language::Python, "def add(a, b): ...".to_string())].into(),
        hints: vec![],
        tags: vec!["math".to_string()],
        time_complexity: Some("O(1)".to_string()),
        space_complexity: Some("O(1)".to_string()),
    }
}

fn unique_user() -> String {
    format!("user_{}", Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore]
async fn question_round_trips_and_is_owner_scoped() {
    let pool = pool().await;
    let owner = unique_user();

    let created = QuestionRepository::create(&pool, &new_question(&owner, Difficulty::Medium))
        .await
        .unwrap();

    let found = QuestionRepository::find_for_owner(&pool, &created.id, &owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.test_cases, created.test_cases);
    assert_eq!(found.difficulty, Difficulty::Medium);
    assert_eq!(found.hidden_test_case_count(), 1);
    assert!(found.starter_code.contains_key(&Language::Python));

    let foreign = QuestionRepository::find_for_owner(&pool, &created.id, "someone_else")
        .await
        .unwrap();
    assert!(foreign.is_none());

    assert!(!QuestionRepository::delete_for_owner(&pool, &created.id, "someone_else")
        .await
        .unwrap());
    assert!(QuestionRepository::delete_for_owner(&pool, &created.id, &owner)
        .await
        .unwrap());
}

#[tokio::test]
#[ignore]
async fn submissions_outlive_their_question() {
    let pool = pool().await;
    let owner = unique_user();
    let question = QuestionRepository::create(&pool, &new_question(&owner, Difficulty::Easy))
        .await
        .unwrap();

    let submission = SubmissionRepository::create(
        &pool,
        &NewSubmission {
            user_id: owner.clone(),
            question_id: question.id,
            code: "print(sum(map(int, input().split())))".to_string(),
            language: Language::Python,
            status: Verdict::WrongAnswer,
            avg_time_ms: 12.5,
            avg_memory_kb: 3000.0,
            test_cases_passed: 1,
            total_test_cases: 2,
        },
    )
    .await
    .unwrap();
    assert_eq!(submission.verdict(), Some(Verdict::WrongAnswer));

    QuestionRepository::delete_for_owner(&pool, &question.id, &owner)
        .await
        .unwrap();

    let (history, total) =
        SubmissionRepository::list_for_owner(&pool, &owner, Some(&question.id), None, 0, 20)
            .await
            .unwrap();
    assert_eq!(total, 1);
    assert_eq!(history[0].id, submission.id);
}

#[tokio::test]
#[ignore]
async fn concurrent_progress_updates_are_not_lost() {
    let pool = pool().await;
    let user = unique_user();

    let tasks: Vec<_> = (0..12)
        .map(|i| {
            let pool = pool.clone();
            let user = user.clone();
            let difficulty = if i % 2 == 0 {
                Difficulty::Easy
            } else {
                Difficulty::Hard
            };
            tokio::spawn(async move {
                ProgressRepository::record_solved(&pool, &user, difficulty, Utc::now()).await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let progress = ProgressRepository::find(&pool, &user).await.unwrap().unwrap();
    assert_eq!(progress.total_solved, 12);
    assert_eq!(progress.easy_solved, 6);
    assert_eq!(progress.hard_solved, 6);
    assert_eq!(progress.skill_tier(), SkillTier::Intermediate);
}
