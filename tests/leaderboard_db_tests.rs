// tests/leaderboard_db_tests.rs
//
// These tests need a running Postgres reachable through DATABASE_URL:
//   DATABASE_URL=postgres://... cargo test -- --ignored

use sqlx::{PgPool, postgres::PgPoolOptions};
use team_leaderboard::{config::Config, routes, state::AppState, utils::jwt::sign_jwt};

const TEST_SECRET: &str = "leaderboard_db_test_secret";

async fn connect() -> PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    pool
}

async fn spawn_app(pool: PgPool) -> String {
    let config = Config {
        database_url: String::new(),
        jwt_secret: TEST_SECRET.to_string(),
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        sync_cooldown_secs: 30,
    };

    let app = routes::create_router(AppState::new(pool, config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn execute(pool: &PgPool, sql: &str, binds: &[&str]) {
    let mut query = sqlx::query(sql);
    for value in binds {
        query = query.bind(*value);
    }
    query.execute(pool).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn team_scores_are_consolidated_across_members() {
    let pool = connect().await;
    let address = spawn_app(pool.clone()).await;
    let client = reqwest::Client::new();

    // Unique ids so the test can share a database with other runs.
    let tag = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
    let id = |name: &str| format!("{}_{}", name, tag);

    execute(
        &pool,
        "INSERT INTO challenges (id, title) VALUES ($1, 'Warmup')",
        &[id("c1").as_str()],
    )
    .await;
    execute(
        &pool,
        "INSERT INTO problems (id, challenge_id, title) VALUES ($1, $2, 'Echo')",
        &[id("p1").as_str(), id("c1").as_str()],
    )
    .await;
    execute(
        &pool,
        "INSERT INTO teams (id, name) VALUES ($1, $2)",
        &[id("t1").as_str(), id("Ferris").as_str()],
    )
    .await;
    for user in ["u1", "u2"] {
        execute(
            &pool,
            "INSERT INTO users (id, display_name) VALUES ($1, $1)",
            &[id(user).as_str()],
        )
        .await;
        execute(
            &pool,
            "INSERT INTO team_members (team_id, user_id) VALUES ($1, $2)",
            &[id("t1").as_str(), id(user).as_str()],
        )
        .await;
    }
    for (user, score) in [("u1", 10.0_f64), ("u1", 4.0), ("u2", 20.0)] {
        sqlx::query(
            "INSERT INTO submissions (user_id, problem_id, total_score) VALUES ($1, $2, $3)",
        )
        .bind(id(user))
        .bind(id("p1"))
        .bind(score)
        .execute(&pool)
        .await
        .unwrap();
    }

    let profile: serde_json::Value = client
        .get(&format!("{}/api/leaderboard/teams/{}", address, id("t1")))
        .send()
        .await
        .expect("Failed to fetch team profile")
        .json()
        .await
        .unwrap();

    assert_eq!(profile["total_score"], 20.0);
    assert_eq!(profile["challenge_scores"][id("c1")], 20.0);
    assert_eq!(profile["stats"]["total_members"], 2);

    let board: serde_json::Value = client
        .get(&format!("{}/api/leaderboard/teams?q={}", address, id("Ferris")))
        .send()
        .await
        .expect("Failed to fetch leaderboard")
        .json()
        .await
        .unwrap();

    let rows = board["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["problem_scores"][id("c1")].as_array().unwrap().len(), 1);

    // `all` selects the overall board, same as no filter.
    let overall: serde_json::Value = client
        .get(&format!(
            "{}/api/leaderboard/teams?challenge=all&q={}",
            address,
            id("Ferris")
        ))
        .send()
        .await
        .expect("Failed to fetch leaderboard")
        .json()
        .await
        .unwrap();
    assert_eq!(overall["data"].as_array().unwrap().len(), 1);
    assert_eq!(overall["data"][0]["score"], 20.0);

    // u1's 4.0 resubmission does not add to its 10.0 best.
    let user: serde_json::Value = client
        .get(&format!("{}/api/leaderboard/users/{}", address, id("u1")))
        .send()
        .await
        .expect("Failed to fetch user standing")
        .json()
        .await
        .unwrap();
    assert_eq!(user["total_score"], 10.0);
    assert_eq!(user["team_id"], id("t1"));
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn second_sync_within_cooldown_is_refused() {
    let pool = connect().await;
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();
    let token = sign_jwt("user-1", "member", TEST_SECRET, 600).unwrap();
    let url = format!(
        "{}/api/workspaces/ws_{}/calendar/sync",
        address,
        uuid::Uuid::new_v4().simple()
    );

    let first = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 200);
    let first: serde_json::Value = first.json().await.unwrap();
    assert_eq!(first["status"], "allowed");

    let second = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 429);
    let second: serde_json::Value = second.json().await.unwrap();
    assert_eq!(second["status"], "cooling_down");
    assert!(second["retry_after_secs"].as_i64().unwrap() > 0);
}
