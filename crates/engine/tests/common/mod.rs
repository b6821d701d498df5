#![allow(dead_code)]

use chrono::NaiveDate;
use sea_orm::Database;

use engine::{Engine, User};
use migration::MigratorTrait;

pub async fn engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

pub async fn engine_with_user() -> (Engine, User) {
    let engine = engine().await;
    let user = engine
        .create_user("Alice", "alice@example.com", "password123")
        .await
        .unwrap();
    (engine, user)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
