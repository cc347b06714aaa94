//! Checkout lifecycle against a live store

use serde_json::json;
use uuid::Uuid;

use shelfmark_server::{
    config::CheckoutConfig,
    error::AppError,
    models::{
        checkout::{CreateCheckout, HistoryQuery},
        copy::UpdateCopy,
        enums::{CheckoutStatus, CopyStatus, FollowUpStatus},
        follow_up::{CreateFollowUp, UpdateFollowUp},
    },
};

use crate::common::{add_copy, context, context_with, other_owner, seed_borrower, seed_copy, TestContext};

fn checkout_request(copy_id: Uuid, borrower_id: Uuid) -> CreateCheckout {
    serde_json::from_value(json!({
        "copy_id": copy_id,
        "borrower_id": borrower_id,
    }))
    .unwrap()
}

async fn copy_status(ctx: &TestContext, copy_id: Uuid) -> CopyStatus {
    ctx.services
        .catalog
        .copy_status(copy_id, ctx.owner)
        .await
        .unwrap()
        .status
}

#[tokio::test]
#[ignore]
async fn test_checkout_and_return_round_trip() {
    let ctx = context().await;
    let (book_id, copy_id) = seed_copy(&ctx, "A Wizard of Earthsea").await;
    let borrower_id = seed_borrower(&ctx, "Ged", "Sparrowhawk").await;

    let checkout = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, borrower_id))
        .await
        .unwrap();
    assert_eq!(checkout.status, CheckoutStatus::CheckedOut);
    assert_eq!(
        checkout.due_date,
        (checkout.checkout_date + chrono::Duration::days(14)).date_naive()
    );
    assert_eq!(copy_status(&ctx, copy_id).await, CopyStatus::CheckedOut);

    let active = ctx.services.checkouts.list_active(ctx.owner, None).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].checkout.id, checkout.id);
    assert_eq!(active[0].title, "A Wizard of Earthsea");
    assert_eq!(active[0].days_checked_out, 0);

    let returned = ctx
        .services
        .checkouts
        .return_checkout(checkout.id, ctx.owner)
        .await
        .unwrap();
    assert_eq!(returned.status, CheckoutStatus::Returned);
    assert!(returned.return_date.is_some());
    assert_eq!(copy_status(&ctx, copy_id).await, CopyStatus::Available);

    let active = ctx.services.checkouts.list_active(ctx.owner, None).await.unwrap();
    assert!(active.is_empty());

    let query = HistoryQuery {
        book_id: Some(book_id),
        ..Default::default()
    };
    let history = ctx.services.checkouts.history(ctx.owner, &query).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].checkout.status, CheckoutStatus::Returned);
}

#[tokio::test]
#[ignore]
async fn test_custom_due_days() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "The Dispossessed").await;
    let borrower_id = seed_borrower(&ctx, "Shevek", "Anarres").await;

    let request: CreateCheckout = serde_json::from_value(json!({
        "copy_id": copy_id,
        "borrower_id": borrower_id,
        "due_days": "3",
    }))
    .unwrap();
    let checkout = ctx.services.checkouts.create_checkout(ctx.owner, request).await.unwrap();

    assert_eq!(
        checkout.due_date,
        (checkout.checkout_date + chrono::Duration::days(3)).date_naive()
    );
}

#[tokio::test]
#[ignore]
async fn test_second_return_is_not_found() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "The Tombs of Atuan").await;
    let borrower_id = seed_borrower(&ctx, "Tenar", "Arha").await;

    let checkout = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, borrower_id))
        .await
        .unwrap();
    ctx.services
        .checkouts
        .return_checkout(checkout.id, ctx.owner)
        .await
        .unwrap();

    let err = ctx
        .services
        .checkouts
        .return_checkout(checkout.id, ctx.owner)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CheckoutNotFound));
    assert_eq!(copy_status(&ctx, copy_id).await, CopyStatus::Available);
}

#[tokio::test]
#[ignore]
async fn test_checked_out_copy_is_unavailable() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "The Farthest Shore").await;
    let first = seed_borrower(&ctx, "Arren", "Enlad").await;
    let second = seed_borrower(&ctx, "Lebannen", "Enlad").await;

    ctx.services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, first))
        .await
        .unwrap();

    let err = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, second))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CopyUnavailable));
}

#[tokio::test]
#[ignore]
async fn test_concurrent_checkouts_of_one_copy() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "Tehanu").await;
    let first = seed_borrower(&ctx, "Therru", "Gont").await;
    let second = seed_borrower(&ctx, "Ogion", "Gont").await;

    let (a, b) = tokio::join!(
        ctx.services
            .checkouts
            .create_checkout(ctx.owner, checkout_request(copy_id, first)),
        ctx.services
            .checkouts
            .create_checkout(ctx.owner, checkout_request(copy_id, second)),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1);
    let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(loser, AppError::CopyUnavailable));

    let active = ctx.services.checkouts.list_active(ctx.owner, None).await.unwrap();
    assert_eq!(active.iter().filter(|c| c.checkout.copy_id == copy_id).count(), 1);
    assert_eq!(copy_status(&ctx, copy_id).await, CopyStatus::CheckedOut);
}

#[tokio::test]
#[ignore]
async fn test_delete_active_checkout_keeps_copy_checked_out() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "Rocannon's World").await;
    let borrower_id = seed_borrower(&ctx, "Rocannon", "Fomalhaut").await;

    let checkout = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, borrower_id))
        .await
        .unwrap();

    ctx.services
        .checkouts
        .delete_checkout(checkout.id, ctx.owner)
        .await
        .unwrap();
    assert_eq!(copy_status(&ctx, copy_id).await, CopyStatus::CheckedOut);

    let err = ctx
        .services
        .checkouts
        .delete_checkout(checkout.id, ctx.owner)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[ignore]
async fn test_delete_active_checkout_can_release_copy() {
    let ctx = context_with(CheckoutConfig {
        release_copy_on_delete: true,
        purge_follow_ups_on_delete: true,
        ..CheckoutConfig::default()
    })
    .await;
    let (_, copy_id) = seed_copy(&ctx, "Planet of Exile").await;
    let borrower_id = seed_borrower(&ctx, "Rolery", "Askatevar").await;

    let checkout = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, borrower_id))
        .await
        .unwrap();
    ctx.services
        .follow_ups
        .create(
            ctx.owner,
            &CreateFollowUp {
                checkout_id: checkout.id,
                reason: None,
            },
        )
        .await
        .unwrap();

    ctx.services
        .checkouts
        .delete_checkout(checkout.id, ctx.owner)
        .await
        .unwrap();

    assert_eq!(copy_status(&ctx, copy_id).await, CopyStatus::Available);
    let stats = ctx.services.stats.dashboard(ctx.owner).await.unwrap();
    assert_eq!(stats.pending_follow_ups, 0);
    // Copy can be lent again
    ctx.services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, borrower_id))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore]
async fn test_follow_up_outlives_its_checkout() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "City of Illusions").await;
    let borrower_id = seed_borrower(&ctx, "Falk", "Ramarren").await;

    let checkout = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, borrower_id))
        .await
        .unwrap();
    ctx.services
        .follow_ups
        .create(
            ctx.owner,
            &CreateFollowUp {
                checkout_id: checkout.id,
                reason: Some("Overdue".to_string()),
            },
        )
        .await
        .unwrap();

    ctx.services
        .checkouts
        .return_checkout(checkout.id, ctx.owner)
        .await
        .unwrap();
    let listed = ctx.services.follow_ups.list(ctx.owner).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].follow_up.status, FollowUpStatus::Pending);

    ctx.services
        .checkouts
        .delete_checkout(checkout.id, ctx.owner)
        .await
        .unwrap();

    // The follow-up row stays behind; the list has nothing to join it to
    // while the dashboard still counts it.
    let listed = ctx.services.follow_ups.list(ctx.owner).await.unwrap();
    assert!(listed.is_empty());
    let stats = ctx.services.stats.dashboard(ctx.owner).await.unwrap();
    assert_eq!(stats.pending_follow_ups, 1);
}

#[tokio::test]
#[ignore]
async fn test_one_follow_up_per_checkout() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "The Lathe of Heaven").await;
    let borrower_id = seed_borrower(&ctx, "George", "Orr").await;

    let checkout = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, borrower_id))
        .await
        .unwrap();

    let request = CreateFollowUp {
        checkout_id: checkout.id,
        reason: Some("Overdue".to_string()),
    };
    let follow_up = ctx.services.follow_ups.create(ctx.owner, &request).await.unwrap();
    assert_eq!(follow_up.status, FollowUpStatus::Pending);

    let err = ctx.services.follow_ups.create(ctx.owner, &request).await.unwrap_err();
    assert!(matches!(err, AppError::FollowUpAlreadyExists));

    let listed = ctx.services.follow_ups.list(ctx.owner).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "The Lathe of Heaven");
    assert_eq!(listed[0].first_name, "George");
}

#[tokio::test]
#[ignore]
async fn test_follow_up_partial_update() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "Always Coming Home").await;
    let borrower_id = seed_borrower(&ctx, "Stone", "Telling").await;

    let checkout = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, borrower_id))
        .await
        .unwrap();
    let follow_up = ctx
        .services
        .follow_ups
        .create(
            ctx.owner,
            &CreateFollowUp {
                checkout_id: checkout.id,
                reason: Some("Asked for it back".to_string()),
            },
        )
        .await
        .unwrap();

    let update: UpdateFollowUp = serde_json::from_value(json!({
        "status": "Contacted",
        "contacted_date": "2024-03-01",
    }))
    .unwrap();
    let updated = ctx
        .services
        .follow_ups
        .update(follow_up.id, ctx.owner, &update)
        .await
        .unwrap();
    assert_eq!(updated.status, FollowUpStatus::Contacted);
    assert_eq!(updated.reason.as_deref(), Some("Asked for it back"));

    let update: UpdateFollowUp = serde_json::from_value(json!({
        "resolution_notes": "Returned by post",
    }))
    .unwrap();
    let updated = ctx
        .services
        .follow_ups
        .update(follow_up.id, ctx.owner, &update)
        .await
        .unwrap();
    assert_eq!(updated.status, FollowUpStatus::Contacted);
    assert!(updated.contacted_date.is_some());

    let err = ctx
        .services
        .follow_ups
        .update(Uuid::new_v4(), ctx.owner, &UpdateFollowUp::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::FollowUpNotFound));
}

#[tokio::test]
#[ignore]
async fn test_other_owner_sees_nothing() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "The Word for World Is Forest").await;
    let borrower_id = seed_borrower(&ctx, "Selver", "Athshe").await;
    let checkout = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, borrower_id))
        .await
        .unwrap();

    let stranger = other_owner(&ctx).await;

    let err = ctx
        .services
        .checkouts
        .create_checkout(stranger, checkout_request(copy_id, borrower_id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CopyNotFound));

    let err = ctx
        .services
        .checkouts
        .return_checkout(checkout.id, stranger)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CheckoutNotFound));

    let err = ctx
        .services
        .catalog
        .copy_status(copy_id, stranger)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CopyNotFound));

    let err = ctx
        .services
        .follow_ups
        .create(
            stranger,
            &CreateFollowUp {
                checkout_id: checkout.id,
                reason: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert!(ctx.services.checkouts.list_active(stranger, None).await.unwrap().is_empty());
    assert_eq!(copy_status(&ctx, copy_id).await, CopyStatus::CheckedOut);
}

#[tokio::test]
#[ignore]
async fn test_checkout_requires_owned_borrower() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "Lavinia").await;
    let stranger = other_owner(&ctx).await;

    let err = ctx
        .services
        .checkouts
        .create_checkout(stranger, checkout_request(copy_id, Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CopyNotFound));

    let err = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(copy_status(&ctx, copy_id).await, CopyStatus::Available);
}

#[tokio::test]
#[ignore]
async fn test_history_is_newest_first() {
    let ctx = context().await;
    let (book_id, first_copy) = seed_copy(&ctx, "Four Ways to Forgiveness").await;
    let second_copy = add_copy(&ctx, book_id).await;
    let borrower_id = seed_borrower(&ctx, "Yeowe", "Werel").await;

    let older = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(first_copy, borrower_id))
        .await
        .unwrap();
    let newer = ctx
        .services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(second_copy, borrower_id))
        .await
        .unwrap();

    let query = HistoryQuery {
        borrower_id: Some(borrower_id),
        ..Default::default()
    };
    let history = ctx.services.checkouts.history(ctx.owner, &query).await.unwrap();
    let ids: Vec<Uuid> = history.iter().map(|h| h.checkout.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    let active = ctx.services.checkouts.list_active(ctx.owner, None).await.unwrap();
    let ids: Vec<Uuid> = active.iter().map(|a| a.checkout.id).collect();
    assert_eq!(ids, vec![older.id, newer.id]);
}

#[tokio::test]
#[ignore]
async fn test_checked_out_copy_cannot_be_deleted() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "The Telling").await;
    let borrower_id = seed_borrower(&ctx, "Sutty", "Aka").await;

    ctx.services
        .checkouts
        .create_checkout(ctx.owner, checkout_request(copy_id, borrower_id))
        .await
        .unwrap();

    let err = ctx.services.catalog.delete_copy(copy_id, ctx.owner).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = ctx.services.borrowers.delete(borrower_id, ctx.owner).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
#[ignore]
async fn test_copy_numbers_increase_per_book() {
    let ctx = context().await;
    let (book_id, _) = seed_copy(&ctx, "Searoad").await;
    add_copy(&ctx, book_id).await;

    let copies = ctx.services.catalog.list_copies(book_id, ctx.owner).await.unwrap();
    let numbers: Vec<i32> = copies.iter().map(|c| c.copy.copy_number).collect();
    assert_eq!(numbers, vec![1, 2]);

    let book = ctx.services.catalog.get_book(book_id, ctx.owner).await.unwrap();
    assert_eq!(book.total_copies, 2);
    assert_eq!(book.available_copies, 2);
}

#[tokio::test]
#[ignore]
async fn test_copy_edit_can_clear_location_and_notes() {
    let ctx = context().await;
    let (_, copy_id) = seed_copy(&ctx, "Orsinian Tales").await;

    let edit = |body: serde_json::Value| -> UpdateCopy { serde_json::from_value(body).unwrap() };

    let copy = ctx
        .services
        .catalog
        .update_copy(
            copy_id,
            ctx.owner,
            &edit(json!({"location": "Shelf 2", "notes": "Foxed pages", "condition": "Fair"})),
        )
        .await
        .unwrap();
    assert_eq!(copy.location.as_deref(), Some("Shelf 2"));
    assert_eq!(copy.condition, "Fair");

    let copy = ctx
        .services
        .catalog
        .update_copy(copy_id, ctx.owner, &edit(json!({"notes": "Rebound"})))
        .await
        .unwrap();
    assert_eq!(copy.location.as_deref(), Some("Shelf 2"));
    assert_eq!(copy.notes.as_deref(), Some("Rebound"));

    let copy = ctx
        .services
        .catalog
        .update_copy(
            copy_id,
            ctx.owner,
            &edit(json!({"location": "", "notes": "", "condition": ""})),
        )
        .await
        .unwrap();
    assert_eq!(copy.location, None);
    assert_eq!(copy.notes, None);
    assert_eq!(copy.condition, "Fair");
}
