//! Notification read access for the recipient.
//!
//! Notifications are created only by [`crate::core::dispatcher`]. The single mutation
//! offered here is marking one as read, and only its recipient may do that.

use crate::{
    entities::{Notification, notification},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::debug;

/// Lists a user's notifications, newest first.
pub async fn list_for_user<C>(
    db: &C,
    user_id: &str,
    unread_only: bool,
) -> Result<Vec<notification::Model>>
where
    C: ConnectionTrait,
{
    let mut query = Notification::find().filter(notification::Column::UserId.eq(user_id));
    if unread_only {
        query = query.filter(notification::Column::Read.eq(false));
    }
    query
        .order_by_desc(notification::Column::CreatedAt)
        .order_by_desc(notification::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the notifications raised by one entity, in creation order.
pub async fn list_for_entity<C>(
    db: &C,
    related_type: &str,
    related_id: i64,
) -> Result<Vec<notification::Model>>
where
    C: ConnectionTrait,
{
    Notification::find()
        .filter(notification::Column::RelatedType.eq(related_type))
        .filter(notification::Column::RelatedId.eq(related_id))
        .order_by_asc(notification::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Counts a user's unread notifications (the bell badge).
pub async fn unread_count<C>(db: &C, user_id: &str) -> Result<u64>
where
    C: ConnectionTrait,
{
    Notification::find()
        .filter(notification::Column::UserId.eq(user_id))
        .filter(notification::Column::Read.eq(false))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Marks a notification as read on behalf of `user_id`.
///
/// Marking an already-read notification is a no-op that returns the row unchanged.
///
/// # Errors
/// Returns `Error::NotificationNotFound` for an unknown id and `Error::NotRecipient`
/// when `user_id` is not the notification's recipient.
pub async fn mark_read<C>(
    db: &C,
    user_id: &str,
    notification_id: i64,
) -> Result<notification::Model>
where
    C: ConnectionTrait,
{
    let existing = Notification::find_by_id(notification_id)
        .one(db)
        .await?
        .ok_or(Error::NotificationNotFound { notification_id })?;

    if existing.user_id != user_id {
        return Err(Error::NotRecipient {
            user_id: user_id.to_string(),
            notification_id,
        });
    }
    if existing.read {
        return Ok(existing);
    }

    let mut active: notification::ActiveModel = existing.into();
    active.read = Set(true);
    let updated = active.update(db).await?;
    debug!(notification_id, user_id, "Notification marked read");
    Ok(updated)
}

/// Marks every unread notification of `user_id` as read. Returns how many changed.
pub async fn mark_all_read<C>(db: &C, user_id: &str) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Notification::update_many()
        .set(notification::ActiveModel {
            read: Set(true),
            ..Default::default()
        })
        .filter(notification::Column::UserId.eq(user_id))
        .filter(notification::Column::Read.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::NotificationKind;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_mark_read_only_by_recipient() -> Result<()> {
        let db = setup_test_db().await?;
        let note = insert_test_notification(&db, "cust-1").await?;
        assert_eq!(unread_count(&db, "cust-1").await?, 1);

        let denied = mark_read(&db, "cust-2", note.id).await;
        assert!(matches!(denied, Err(Error::NotRecipient { .. })));
        assert_eq!(unread_count(&db, "cust-1").await?, 1);

        let updated = mark_read(&db, "cust-1", note.id).await?;
        assert!(updated.read);
        // Everything except `read` is untouched
        assert_eq!(updated.title, note.title);
        assert_eq!(updated.message, note.message);
        assert_eq!(updated.kind, NotificationKind::Info);
        assert_eq!(updated.created_at, note.created_at);
        assert_eq!(unread_count(&db, "cust-1").await?, 0);

        // Idempotent
        let again = mark_read(&db, "cust-1", note.id).await?;
        assert_eq!(again, updated);
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_read_unknown_notification() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<notification::Model>::new()])
            .into_connection();

        let result = mark_read(&db, "cust-1", 42).await;
        assert!(matches!(
            result,
            Err(Error::NotificationNotFound {
                notification_id: 42
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_for_user_and_mark_all_read() -> Result<()> {
        let db = setup_test_db().await?;
        let first = insert_test_notification(&db, "cust-1").await?;
        let second = insert_test_notification(&db, "cust-1").await?;
        insert_test_notification(&db, "cust-2").await?;

        let all = list_for_user(&db, "cust-1", false).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);

        mark_read(&db, "cust-1", first.id).await?;
        let unread = list_for_user(&db, "cust-1", true).await?;
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].id, second.id);

        assert_eq!(mark_all_read(&db, "cust-1").await?, 1);
        assert_eq!(unread_count(&db, "cust-1").await?, 0);
        // Other users are unaffected
        assert_eq!(unread_count(&db, "cust-2").await?, 1);
        Ok(())
    }
}
