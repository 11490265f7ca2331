//! Db context and migration integration tests

use core_kernel::PolicyNumber;
use infra_db::{migration_status, revert_migrations, run_migrations, Repository};
use test_utils::{
    assert_customer_matches, assert_duplicate_entry, assert_foreign_key_violation,
    assert_invalid_data, db_test, CustomerDetailsBuilder, CustomerFixtures,
};

async fn table_exists(pool: &sqlx::PgPool, table: &str) -> bool {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = $1
        )
        "#,
    )
    .bind(table)
    .fetch_one(pool)
    .await
    .unwrap()
}

db_test!(test_health_check, |db| {
    db.context().health_check().await.unwrap();
});

db_test!(test_enroll_customer_writes_customer_and_links, |db| {
    let ctx = db.context();
    let home = ctx.policies().create().await.unwrap();
    let car = ctx.policies().create().await.unwrap();
    let details = CustomerFixtures::complete();

    let enrolled = ctx
        .enroll_customer(&details, &[home.number, car.number])
        .await
        .unwrap();

    assert_eq!(enrolled.policies, vec![home.number, car.number]);
    let loaded = ctx.customers().get_with_policies(enrolled.id).await.unwrap();
    assert_eq!(loaded, enrolled);
    assert_customer_matches(&loaded, &details);
});

db_test!(test_enroll_customer_rolls_back_on_missing_policy, |db| {
    let ctx = db.context();
    let home = ctx.policies().create().await.unwrap();
    let marker = format!("Rollback-{}", home.number.value());
    let details = CustomerDetailsBuilder::new().with_last_name(marker.clone()).build();

    let result = ctx
        .enroll_customer(&details, &[home.number, PolicyNumber::new(999_999)])
        .await;
    assert_foreign_key_violation(result);

    let customers = ctx.customers().list().await.unwrap();
    assert!(customers
        .iter()
        .all(|c| c.details.last_name.as_deref() != Some(marker.as_str())));
    assert!(ctx.customer_policies().find_by_policy(home.number).await.unwrap().is_empty());
});

db_test!(test_enroll_customer_rejects_repeated_policy, |db| {
    let ctx = db.context();
    let home = ctx.policies().create().await.unwrap();

    assert_duplicate_entry(
        ctx.enroll_customer(&CustomerFixtures::complete(), &[home.number, home.number])
            .await,
    );
    assert!(ctx.customer_policies().find_by_policy(home.number).await.unwrap().is_empty());
});

db_test!(test_enroll_customer_validates_before_writing, |db| {
    let ctx = db.context();

    assert_invalid_data(
        ctx.enroll_customer(&CustomerFixtures::invalid_email(), &[])
            .await,
    );
});

db_test!(test_migration_status_reports_applied, |db| {
    let statuses = migration_status(db.pool()).await.unwrap();

    assert!(!statuses.is_empty());
    assert!(statuses.iter().all(|s| s.applied));
});

db_test!(test_revert_and_reapply_migrations, |db| {
    if !db.is_isolated() {
        eprintln!("skipping revert test on a shared database");
        return;
    }
    let pool = db.pool();

    revert_migrations(pool, 0).await.unwrap();
    for table in ["customers", "policies", "customer_policies", "claims"] {
        assert!(!table_exists(pool, table).await, "{} survived revert", table);
    }
    assert!(migration_status(pool).await.unwrap().iter().all(|s| !s.applied));

    run_migrations(pool).await.unwrap();
    for table in ["customers", "policies", "customer_policies", "claims"] {
        assert!(table_exists(pool, table).await, "{} missing after migrate", table);
    }

    // Migrating an up-to-date schema is a no-op
    run_migrations(pool).await.unwrap();
    let ctx = db.context();
    let customer = ctx.customers().create(&CustomerFixtures::minimal()).await.unwrap();
    assert!(ctx.customers().exists(customer.id).await.unwrap());
});
