use chrono::{Days, NaiveDate, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    DashboardSession, Engine, EngineError, ItemNew, ItemQuery, ItemStatus, ItemStore, ItemUpdate,
    Money, Sale,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_item(name: &str, price_minor: i64, purchase_date: NaiveDate) -> ItemNew {
    ItemNew {
        name: name.to_string(),
        purchase_price: Money::new(price_minor),
        extra_cost: Money::ZERO,
        purchase_date,
        sale: None,
        group_name: None,
        category: None,
        daily_burn: true,
    }
}

#[tokio::test]
async fn create_and_fetch_item() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_item(ItemNew {
            group_name: Some(" Cameras ".to_string()),
            extra_cost: Money::new(50_00),
            ..new_item("Leica M6", 1000_00, date(2025, 1, 10))
        })
        .await
        .unwrap();

    let fetched = engine.item(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.group_name.as_deref(), Some("Cameras"));
    assert_eq!(fetched.status(), ItemStatus::Owned);
}

#[tokio::test]
async fn list_is_ordered_by_purchase_date_desc() {
    let (engine, _db) = engine_with_db().await;
    for (name, day) in [("old", 1), ("newest", 20), ("middle", 10)] {
        engine
            .create_item(new_item(name, 100, date(2025, 3, day)))
            .await
            .unwrap();
    }

    let names: Vec<String> = engine
        .list_items()
        .await
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(names, vec!["newest", "middle", "old"]);
}

#[tokio::test]
async fn invalid_items_are_not_written() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_item(new_item("Broken", -1, date(2025, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation { .. }));

    let err = engine
        .create_item(ItemNew {
            sale: Some(Sale {
                date: date(2024, 12, 31),
                price: Money::new(10),
            }),
            ..new_item("Time traveller", 100, date(2025, 1, 1))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation { .. }));

    let err = engine
        .create_item(new_item("   ", 100, date(2025, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));

    assert!(engine.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn sell_moves_item_to_sold_once() {
    let (engine, _db) = engine_with_db().await;
    let item = engine
        .create_item(ItemNew {
            extra_cost: Money::new(50_00),
            ..new_item("Lens", 500_00, date(2025, 1, 1))
        })
        .await
        .unwrap();

    let sale = Sale {
        date: date(2025, 2, 1),
        price: Money::new(700_00),
    };
    let sold = engine.sell_item(item.id, sale).await.unwrap();
    assert_eq!(sold.status(), ItemStatus::Sold);
    assert_eq!(sold.profit(), Some(Money::new(150_00)));
    assert_eq!(engine.item(item.id).await.unwrap().sale, Some(sale));

    let err = engine.sell_item(item.id, sale).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition(_)));
}

#[tokio::test]
async fn update_changes_and_clears_fields() {
    let (engine, _db) = engine_with_db().await;
    let item = engine
        .create_item(ItemNew {
            group_name: Some("Audio".to_string()),
            category: Some("Headphones".to_string()),
            ..new_item("HD600", 300_00, date(2025, 1, 1))
        })
        .await
        .unwrap();

    let updated = engine
        .update_item(
            item.id,
            ItemUpdate {
                name: Some("HD 600".to_string()),
                group_name: Some(None),
                daily_burn: Some(false),
                sale: Some(Some(Sale {
                    date: date(2025, 1, 5),
                    price: Money::new(250_00),
                })),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "HD 600");
    assert_eq!(updated.group_name, None);
    assert_eq!(updated.category.as_deref(), Some("Headphones"));
    assert!(!updated.daily_burn);
    assert_eq!(updated.status(), ItemStatus::Sold);
    assert_eq!(engine.item(item.id).await.unwrap(), updated);

    let reverted = engine
        .update_item(
            item.id,
            ItemUpdate {
                sale: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(reverted.status(), ItemStatus::Owned);

    let err = engine
        .update_item(item.id, ItemUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation {
            item_id: item.id.to_string(),
            reason: "update must change at least one field".to_string(),
        }
    );
}

#[tokio::test]
async fn rejected_update_leaves_row_untouched() {
    let (engine, _db) = engine_with_db().await;
    let item = engine
        .create_item(new_item("Desk", 100_00, date(2025, 1, 10)))
        .await
        .unwrap();

    let err = engine
        .update_item(
            item.id,
            ItemUpdate {
                purchase_date: Some(date(2025, 2, 1)),
                sale: Some(Some(Sale {
                    date: date(2025, 1, 20),
                    price: Money::new(1),
                })),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation { .. }));
    assert_eq!(engine.item(item.id).await.unwrap(), item);
}

#[tokio::test]
async fn delete_removes_item() {
    let (engine, _db) = engine_with_db().await;
    let item = engine
        .create_item(new_item("Chair", 100, date(2025, 1, 1)))
        .await
        .unwrap();

    engine.delete_item(item.id).await.unwrap();
    assert_eq!(
        engine.item(item.id).await.unwrap_err(),
        EngineError::KeyNotFound("item not exists".to_string())
    );
    assert_eq!(
        engine.delete_item(item.id).await.unwrap_err(),
        EngineError::KeyNotFound("item not exists".to_string())
    );
}

async fn insert_raw_row(db: &DatabaseConnection, purchase_date: &str) -> String {
    let id = Uuid::new_v4().to_string();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO items (id, name, purchase_price, extra_cost, purchase_date, status, daily_burn, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        vec![
            id.clone().into(),
            "Imported".into(),
            100i64.into(),
            0i64.into(),
            purchase_date.into(),
            "owned".into(),
            true.into(),
            Utc::now().into(),
        ],
    ))
    .await
    .unwrap();
    id
}

#[tokio::test]
async fn malformed_row_fails_the_read_with_its_id() {
    let (engine, db) = engine_with_db().await;
    engine
        .create_item(new_item("Fine", 100, date(2025, 1, 1)))
        .await
        .unwrap();

    let bad_id = insert_raw_row(&db, "yesterday").await;
    let err = engine.list_items().await.unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation {
            item_id: bad_id,
            reason: "unparseable purchase date 'yesterday'".to_string(),
        }
    );
}

#[tokio::test]
async fn session_keeps_snapshot_and_names_malformed_row() {
    let (engine, db) = engine_with_db().await;
    engine
        .create_item(new_item("Fine", 100, date(2025, 1, 1)))
        .await
        .unwrap();

    let mut session = DashboardSession::new(engine);
    session.reload(date(2025, 1, 11)).await.unwrap();

    let bad_id = insert_raw_row(&db, "yesterday").await;
    let err = session.reload(date(2025, 1, 12)).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation {
            item_id: bad_id,
            reason: "unparseable purchase date 'yesterday'".to_string(),
        }
    );

    let snapshot = session.snapshot().unwrap();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.computed_on, date(2025, 1, 11));
}

#[tokio::test]
async fn oversized_total_cost_is_not_written() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .create_item(ItemNew {
            extra_cost: Money::new(1),
            ..new_item("Priceless", i64::MAX, date(2025, 1, 1))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation { .. }));
    assert!(engine.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_session_over_database() {
    let (engine, _db) = engine_with_db().await;
    let today = Utc::now().date_naive();

    engine
        .create_item(ItemNew {
            group_name: Some("Cameras".to_string()),
            ..new_item("Body", 1000, today - Days::new(10))
        })
        .await
        .unwrap();
    let lens = engine
        .create_item(ItemNew {
            extra_cost: Money::new(50),
            ..new_item("Lens", 500, today - Days::new(30))
        })
        .await
        .unwrap();
    ItemStore::sell_item(
        &engine,
        lens.id,
        Sale {
            date: today - Days::new(5),
            price: Money::new(700),
        },
    )
    .await
    .unwrap();

    let mut session = DashboardSession::new(engine);
    session.reload(today).await.unwrap();
    let snapshot = session.snapshot().unwrap();
    assert_eq!(snapshot.stats.total_items, 2);
    assert_eq!(snapshot.stats.owned_items, 1);
    assert_eq!(snapshot.stats.sold_items, 1);
    assert_eq!(snapshot.stats.daily_burn_rate, 100.0);
    assert_eq!(snapshot.stats.total_profit, Money::new(150));
    assert_eq!(snapshot.facets.groups, vec!["Cameras"]);

    session.set_query(ItemQuery::new().with_status(Some(ItemStatus::Sold)));
    let page = session.visible();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].item.name, "Lens");
    assert_eq!(page.items[0].daily_burn, 550.0 / 25.0);
}
