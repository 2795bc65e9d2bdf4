pub mod amenities;
pub mod rooms;
pub mod users;
pub mod wishlists;

use std::str::FromStr;

use sqlx::{
    migrate::{MigrateError, Migrator},
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

/// Every migration under `migrations/`, applied in version order.
pub static MIGRATOR: Migrator = sqlx::migrate!();

pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Single-connection pool over a private in-memory database with every
/// migration applied. The connection is never recycled, so the data lives as
/// long as the pool.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_migrations(db_pool: &SqlitePool) -> Result<(), MigrateError> {
    let before = match applied_versions(db_pool).await {
        Ok(versions) => versions,
        // fresh database: the migrator creates its table on first run
        Err(sqlx::Error::Database(err)) if err.message().contains("no such table") => Vec::new(),
        Err(err) => return Err(MigrateError::Execute(err)),
    };

    MIGRATOR.run(db_pool).await?;

    for migration in MIGRATOR.iter() {
        if !before.contains(&migration.version) {
            tracing::info!(version = migration.version, "applied migration {}", migration.description);
        }
    }
    Ok(())
}

/// Versions recorded as successfully applied, oldest first.
pub async fn applied_versions(db_pool: &SqlitePool) -> Result<Vec<i64>, sqlx::Error> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT version FROM _sqlx_migrations WHERE success=1 ORDER BY version")
            .fetch_all(db_pool)
            .await?;

    Ok(rows.into_iter().map(|(version,)| version).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn bare_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn apply_through(db_pool: &SqlitePool, last: i64) {
        for migration in MIGRATOR.iter().filter(|m| m.version <= last) {
            sqlx::raw_sql(&migration.sql).execute(db_pool).await.unwrap();
        }
    }

    #[tokio::test]
    async fn migrations_apply_in_order_and_are_recorded() {
        let db_pool = connect_in_memory().await.unwrap();
        assert_eq!(applied_versions(&db_pool).await.unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn running_migrations_twice_is_a_no_op() {
        let db_pool = connect_in_memory().await.unwrap();
        run_migrations(&db_pool).await.unwrap();
        assert_eq!(applied_versions(&db_pool).await.unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn amenity_relation_survives_the_join_table_rewrite() {
        let db_pool = bare_pool().await;
        apply_through(&db_pool, 2).await;

        sqlx::raw_sql(
            r#"
            INSERT INTO users (id, username) VALUES (1, 'host');
            INSERT INTO amenities (id, name) VALUES (1, 'Wifi'), (2, 'Pool'), (3, 'Sauna');
            INSERT INTO rooms (id, name, country, city, price, kind, owner_id) VALUES
                (1, 'Loft', 'Korea', 'Seoul', 100, 'entire_place', 1),
                (2, 'Cabin', 'Korea', 'Busan', 80, 'private_room', 1),
                (3, 'Bunk', 'Korea', 'Jeju', 20, 'shared_room', 1);
            INSERT INTO rooms_room_amenities (room_id, amenity_id) VALUES
                (1, 1), (2, 1), (3, 1), (1, 2), (2, 2);
            "#,
        )
        .execute(&db_pool)
        .await
        .unwrap();

        let before: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT room_id,amenity_id FROM rooms_room_amenities ORDER BY room_id,amenity_id",
        )
        .fetch_all(&db_pool)
        .await
        .unwrap();

        let migration = MIGRATOR.iter().find(|m| m.version == 3).unwrap();
        sqlx::raw_sql(&migration.sql).execute(&db_pool).await.unwrap();

        let after: Vec<(i64, i64)> =
            sqlx::query_as("SELECT room_id,amenity_id FROM room_amenities ORDER BY room_id,amenity_id")
                .fetch_all(&db_pool)
                .await
                .unwrap();
        assert_eq!(before, after);

        let wifi: Vec<i64> = amenities::rooms(&db_pool, 1)
            .await
            .unwrap()
            .into_iter()
            .map(|room| room.pk)
            .collect();
        assert_eq!(wifi, vec![1, 2, 3]);

        let pool: Vec<i64> = amenities::rooms(&db_pool, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|room| room.pk)
            .collect();
        assert_eq!(pool, vec![1, 2]);

        assert!(amenities::rooms(&db_pool, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_pairs_are_rejected_after_the_rewrite() {
        let db_pool = bare_pool().await;
        apply_through(&db_pool, 3).await;

        sqlx::raw_sql(
            r#"
            INSERT INTO users (id, username) VALUES (1, 'host');
            INSERT INTO amenities (id, name) VALUES (1, 'Wifi');
            INSERT INTO rooms (id, name, country, city, price, kind, owner_id)
                VALUES (1, 'Loft', 'Korea', 'Seoul', 100, 'entire_place', 1);
            INSERT INTO room_amenities (room_id, amenity_id) VALUES (1, 1);
            "#,
        )
        .execute(&db_pool)
        .await
        .unwrap();

        let dup = sqlx::query("INSERT INTO room_amenities (room_id,amenity_id) VALUES (1,1)")
            .execute(&db_pool)
            .await;
        assert!(dup.is_err());
    }

    async fn count(db_pool: &SqlitePool, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db_pool)
            .await
            .unwrap();
        n
    }

    #[tokio::test]
    async fn fresh_database_is_migrated_from_scratch() {
        let db_pool = bare_pool().await;
        run_migrations(&db_pool).await.unwrap();
        assert_eq!(applied_versions(&db_pool).await.unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn modified_migration_is_refused() {
        let db_pool = connect_in_memory().await.unwrap();
        sqlx::query("UPDATE _sqlx_migrations SET checksum=X'00' WHERE version=3")
            .execute(&db_pool)
            .await
            .unwrap();

        let err = run_migrations(&db_pool).await.unwrap_err();
        assert!(matches!(err, MigrateError::VersionMismatch(3)), "{err}");
    }

    #[tokio::test]
    async fn unknown_applied_version_is_refused() {
        let db_pool = connect_in_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO _sqlx_migrations (version,description,success,checksum,execution_time) VALUES (99,'gone',TRUE,X'00',0)",
        )
        .execute(&db_pool)
        .await
        .unwrap();

        let err = run_migrations(&db_pool).await.unwrap_err();
        assert!(matches!(err, MigrateError::VersionMissing(99)), "{err}");
    }

    async fn furnished(db_pool: &SqlitePool) -> (users::User, rooms::Room, wishlists::Wishlist) {
        let host = users::create(db_pool, "host").await.unwrap();
        let loft = rooms::create(db_pool, &rooms::tests::new_room("Loft", host.pk, 100)).await.unwrap();
        let wifi = amenities::create(db_pool, "Wifi", None).await.unwrap();
        rooms::add_amenity(db_pool, loft.id, wifi.pk).await.unwrap();
        let summer = wishlists::create(db_pool, host.pk, "Summer").await.unwrap();
        wishlists::toggle_room(db_pool, summer.id, loft.id).await.unwrap();
        (host, loft, summer)
    }

    #[tokio::test]
    async fn deleting_a_user_takes_their_rooms_and_wishlists() {
        let db_pool = connect_in_memory().await.unwrap();
        let (host, _, _) = furnished(&db_pool).await;

        sqlx::query("DELETE FROM users WHERE id=?")
            .bind(host.pk)
            .execute(&db_pool)
            .await
            .unwrap();

        for table in ["rooms", "wishlists", "wishlists_rooms", "room_amenities"] {
            assert_eq!(count(&db_pool, table).await, 0, "{table}");
        }
        assert_eq!(count(&db_pool, "amenities").await, 1);
    }

    #[tokio::test]
    async fn deleting_a_room_unlinks_it_everywhere() {
        let db_pool = connect_in_memory().await.unwrap();
        let (_, loft, summer) = furnished(&db_pool).await;

        sqlx::query("DELETE FROM rooms WHERE id=?")
            .bind(loft.id)
            .execute(&db_pool)
            .await
            .unwrap();

        assert_eq!(count(&db_pool, "wishlists_rooms").await, 0);
        assert_eq!(count(&db_pool, "room_amenities").await, 0);
        assert_eq!(count(&db_pool, "amenities").await, 1);
        assert!(wishlists::rooms(&db_pool, summer.id).await.unwrap().is_empty());
        assert_eq!(count(&db_pool, "wishlists").await, 1);
    }
}
