mod common;

use common::cook;
use factory_cloud::db;
use factory_cloud::loader::{self, MissingCookPolicy, RowKind, UploadDocument};
use sqlx::PgPool;

fn document(json: &str) -> UploadDocument {
    serde_json::from_str(json).expect("valid upload document")
}

#[sqlx::test(migrations = "./migrations")]
async fn uploads_cooks_then_dishes(pool: PgPool) {
    let pool = &pool;

    let doc = document(
        r#"{
            "cooks": [
                {"name": "Dana", "floor": 1, "email": "dana@factory.com", "specialty": "bakery"},
                {"name": "Avi", "floor": 2}
            ],
            "dishes": [
                {"name": "Bread", "category": "bakery", "default_cook_name": "Dana", "preparation_time": 45},
                {"name": "Soup", "default_cook_name": "Avi"},
                {"name": "Salad"}
            ]
        }"#,
    );

    let report = loader::upload(pool, &doc, MissingCookPolicy::Unassigned).await;
    assert!(report.is_clean(), "{report}");
    assert_eq!(report.cooks_inserted, 2);
    assert_eq!(report.dishes_inserted, 3);
    assert_eq!(report.dishes_unassigned, 0);

    let dana = db::cooks::find_by_email(pool, "dana@factory.com").await.unwrap().unwrap();
    let menu = db::dishes::list_active_with_cooks(pool).await.unwrap();
    let bread = menu.iter().find(|d| d.dish.name == "Bread").unwrap();
    assert_eq!(bread.dish.default_cook_id, Some(dana.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn late_binds_existing_cooks(pool: PgPool) {
    let pool = &pool;

    let dana = cook(pool, "Dana").await;
    let doc = document(r#"{"dishes": [{"name": "Bread", "default_cook_name": "Dana"}]}"#);

    let report = loader::upload(pool, &doc, MissingCookPolicy::Fail).await;
    assert!(report.is_clean(), "{report}");

    let menu = db::dishes::list_active_with_cooks(pool).await.unwrap();
    assert_eq!(menu[0].dish.default_cook_id, Some(dana.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_cook_policy(pool: PgPool) {
    let pool = &pool;

    let doc = document(
        r#"{"dishes": [
            {"name": "Bread", "default_cook_name": "Ghost"},
            {"name": "Soup"}
        ]}"#,
    );

    let report = loader::upload(pool, &doc, MissingCookPolicy::Fail).await;
    assert_eq!(report.dishes_inserted, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, RowKind::Dish);
    assert_eq!(report.failures[0].name, "Bread");

    let report = loader::upload(pool, &doc, MissingCookPolicy::Unassigned).await;
    assert_eq!(report.dishes_inserted, 2);
    assert_eq!(report.dishes_unassigned, 1);
    assert!(report.is_clean());
}

#[sqlx::test(migrations = "./migrations")]
async fn failing_rows_do_not_stop_the_upload(pool: PgPool) {
    let pool = &pool;

    let doc = document(
        r#"{
            "cooks": [
                {"name": "Dana", "email": "dana@factory.com"},
                {"name": "Dana Copy", "email": "dana@factory.com"},
                {"name": "X"},
                {"name": "Avi"}
            ],
            "dishes": [
                {"name": "Bread", "default_cook_name": "Dana", "preparation_time": 0},
                {"name": "Soup", "default_cook_name": "Avi"}
            ]
        }"#,
    );

    let report = loader::upload(pool, &doc, MissingCookPolicy::Unassigned).await;
    assert_eq!(report.cooks_inserted, 2);
    assert_eq!(report.dishes_inserted, 1);

    let failed: Vec<(RowKind, &str)> = report
        .failures
        .iter()
        .map(|f| (f.kind, f.name.as_str()))
        .collect();
    assert_eq!(
        failed,
        [
            (RowKind::Cook, "Dana Copy"),
            (RowKind::Cook, "X"),
            (RowKind::Dish, "Bread"),
        ]
    );
}
