//! Ticket redemption and validation workflows

mod support;

use chrono::{Duration, Utc};
use std::collections::HashSet;

use platform::error::Error;
use platform::models::ticket::TicketStatus;
use platform::models::user::UserRole;
use platform::usecases::{
    EventStaffInput, ListClientTicketsInput, RedeemTicketsInput, ValidateTicketInput,
};

use support::{
    register_client, register_organizer, register_staff, seed_event, seed_running_event,
    test_state,
};

const CODE_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

fn redeem_input(event_id: i64, client_id: i64, count: u32) -> RedeemTicketsInput {
    RedeemTicketsInput {
        event_id,
        client_id,
        count,
        send_email: false,
    }
}

#[tokio::test]
async fn redeem_issues_pending_tickets_with_unique_codes() {
    let state = test_state().await;
    let organizer = register_organizer(&state, "org@example.com").await;
    let client = register_client(&state, "client@example.com").await;
    let event = seed_running_event(&state, organizer.id, 10).await;

    let issued = state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 3))
        .await
        .expect("redemption failed");

    assert_eq!(issued.len(), 3);

    let codes: HashSet<&str> = issued.iter().map(|t| t.code.as_str()).collect();
    assert_eq!(codes.len(), 3, "codes must be unique");

    for ticket in &issued {
        assert_eq!(ticket.status, TicketStatus::Pending);
        assert_eq!(ticket.event_id, event.id);
        assert_eq!(ticket.client_id, client.id);
        assert_eq!(ticket.code.len(), 6);
        assert!(
            ticket.code.chars().all(|c| CODE_ALPHABET.contains(c)),
            "code {} uses a character outside the alphabet",
            ticket.code
        );
    }

    let reloaded = state
        .event_repository
        .get_by_id(event.id)
        .await
        .expect("event lookup failed")
        .expect("event missing");
    assert_eq!(reloaded.tickets_redeemed, 3);
}

#[tokio::test]
async fn redeem_over_capacity_fails_without_partial_issuance() {
    let state = test_state().await;
    let organizer = register_organizer(&state, "org@example.com").await;
    let client = register_client(&state, "client@example.com").await;
    let event = seed_running_event(&state, organizer.id, 10).await;

    state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 8))
        .await
        .expect("initial redemption failed");

    // 8 of 10 redeemed: asking for 3 must fail and change nothing.
    let result = state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 3))
        .await;
    assert!(matches!(result, Err(Error::NoTicketsAvailable(_))));

    let reloaded = state
        .event_repository
        .get_by_id(event.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.tickets_redeemed, 8);

    let (_, total) = state
        .ticket_repository
        .list_by_client(client.id, 1, 100)
        .await
        .expect("listing failed");
    assert_eq!(total, 8, "no partial batch may be written");

    // The remaining 2 still fit.
    state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 2))
        .await
        .expect("redeeming the remainder failed");

    let reloaded = state
        .event_repository
        .get_by_id(event.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.tickets_redeemed, 10);

    // Sold out now.
    let result = state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 1))
        .await;
    assert!(matches!(result, Err(Error::NoTicketsAvailable(_))));
}

#[tokio::test]
async fn redeem_rejects_zero_count_and_unknown_event() {
    let state = test_state().await;
    let organizer = register_organizer(&state, "org@example.com").await;
    let client = register_client(&state, "client@example.com").await;
    let event = seed_running_event(&state, organizer.id, 5).await;

    let result = state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 0))
        .await;
    assert!(matches!(result, Err(Error::InvalidTicketQuantity(0))));

    let result = state
        .redeem_tickets
        .execute(redeem_input(9999, client.id, 1))
        .await;
    assert!(matches!(result, Err(Error::EventNotFound(9999))));
}

#[tokio::test]
async fn organizer_validates_each_ticket_exactly_once() {
    let state = test_state().await;
    let organizer = register_organizer(&state, "org@example.com").await;
    let client = register_client(&state, "client@example.com").await;
    let event = seed_running_event(&state, organizer.id, 5).await;

    let issued = state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 1))
        .await
        .expect("redemption failed");
    let code = issued[0].code.clone();

    let validated = state
        .validate_ticket
        .execute(ValidateTicketInput {
            user_id: organizer.id,
            user_role: UserRole::Organizer,
            code: code.clone(),
        })
        .await
        .expect("first validation failed");
    assert_eq!(validated.status, TicketStatus::Validated);

    let result = state
        .validate_ticket
        .execute(ValidateTicketInput {
            user_id: organizer.id,
            user_role: UserRole::Organizer,
            code,
        })
        .await;
    assert!(matches!(result, Err(Error::TicketAlreadyValidated(_))));
}

#[tokio::test]
async fn validation_normalizes_the_entered_code() {
    let state = test_state().await;
    let organizer = register_organizer(&state, "org@example.com").await;
    let client = register_client(&state, "client@example.com").await;
    let event = seed_running_event(&state, organizer.id, 5).await;

    let issued = state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 1))
        .await
        .expect("redemption failed");

    let scanned = format!("  {}  ", issued[0].code.to_lowercase());
    let validated = state
        .validate_ticket
        .execute(ValidateTicketInput {
            user_id: organizer.id,
            user_role: UserRole::Organizer,
            code: scanned,
        })
        .await
        .expect("validation of a lowercased code failed");
    assert_eq!(validated.code, issued[0].code);
}

#[tokio::test]
async fn client_can_never_validate_even_their_own_ticket() {
    let state = test_state().await;
    let organizer = register_organizer(&state, "org@example.com").await;
    let client = register_client(&state, "client@example.com").await;
    let event = seed_running_event(&state, organizer.id, 5).await;

    let issued = state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 1))
        .await
        .expect("redemption failed");

    let result = state
        .validate_ticket
        .execute(ValidateTicketInput {
            user_id: client.id,
            user_role: UserRole::Client,
            code: issued[0].code.clone(),
        })
        .await;
    assert!(matches!(result, Err(Error::UnauthorizedValidation { .. })));
}

#[tokio::test]
async fn staff_needs_to_be_on_the_event_staff_list() {
    let state = test_state().await;
    let organizer = register_organizer(&state, "org@example.com").await;
    let client = register_client(&state, "client@example.com").await;
    let staff = register_staff(&state, "staff@example.com").await;
    let event = seed_running_event(&state, organizer.id, 5).await;

    let issued = state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 1))
        .await
        .expect("redemption failed");
    let code = issued[0].code.clone();

    let result = state
        .validate_ticket
        .execute(ValidateTicketInput {
            user_id: staff.id,
            user_role: UserRole::Staff,
            code: code.clone(),
        })
        .await;
    assert!(matches!(result, Err(Error::UnauthorizedValidation { .. })));

    state
        .add_event_staff
        .execute(EventStaffInput {
            event_id: event.id,
            staff_id: staff.id,
        })
        .await
        .expect("adding staff failed");

    let validated = state
        .validate_ticket
        .execute(ValidateTicketInput {
            user_id: staff.id,
            user_role: UserRole::Staff,
            code,
        })
        .await
        .expect("validation by listed staff failed");
    assert_eq!(validated.status, TicketStatus::Validated);
}

#[tokio::test]
async fn organizer_of_another_event_is_unauthorized() {
    let state = test_state().await;
    let organizer = register_organizer(&state, "org@example.com").await;
    let other = register_organizer(&state, "other@example.com").await;
    let client = register_client(&state, "client@example.com").await;
    let event = seed_running_event(&state, organizer.id, 5).await;

    let issued = state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 1))
        .await
        .expect("redemption failed");

    let result = state
        .validate_ticket
        .execute(ValidateTicketInput {
            user_id: other.id,
            user_role: UserRole::Organizer,
            code: issued[0].code.clone(),
        })
        .await;
    assert!(matches!(result, Err(Error::UnauthorizedValidation { .. })));
}

#[tokio::test]
async fn validation_outside_the_event_window_fails() {
    let state = test_state().await;
    let organizer = register_organizer(&state, "org@example.com").await;
    let client = register_client(&state, "client@example.com").await;

    let now = Utc::now();
    let event = seed_event(
        &state,
        organizer.id,
        now + Duration::hours(5),
        now + Duration::hours(8),
        5,
    )
    .await;

    let issued = state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 1))
        .await
        .expect("redemption failed");

    // Even the owning organizer cannot validate before doors open.
    let result = state
        .validate_ticket
        .execute(ValidateTicketInput {
            user_id: organizer.id,
            user_role: UserRole::Organizer,
            code: issued[0].code.clone(),
        })
        .await;
    assert!(matches!(
        result,
        Err(Error::TicketValidationTime { event_id, .. }) if event_id == event.id
    ));
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let state = test_state().await;
    let organizer = register_organizer(&state, "org@example.com").await;

    let result = state
        .validate_ticket
        .execute(ValidateTicketInput {
            user_id: organizer.id,
            user_role: UserRole::Organizer,
            code: "ZZZZZZ".to_string(),
        })
        .await;
    assert!(matches!(result, Err(Error::TicketNotFound(_))));
}

#[tokio::test]
async fn client_ticket_listing_paginates() {
    let state = test_state().await;
    let organizer = register_organizer(&state, "org@example.com").await;
    let client = register_client(&state, "client@example.com").await;
    let event = seed_running_event(&state, organizer.id, 10).await;

    state
        .redeem_tickets
        .execute(redeem_input(event.id, client.id, 5))
        .await
        .expect("redemption failed");

    let (page, total) = state
        .list_client_tickets
        .execute(ListClientTicketsInput {
            client_id: client.id,
            page: 1,
            page_size: 2,
        })
        .await
        .expect("listing failed");
    assert_eq!(page.len(), 2);
    assert_eq!(total, 5);

    let (page, _) = state
        .list_client_tickets
        .execute(ListClientTicketsInput {
            client_id: client.id,
            page: 3,
            page_size: 2,
        })
        .await
        .expect("listing failed");
    assert_eq!(page.len(), 1);

    let result = state
        .list_client_tickets
        .execute(ListClientTicketsInput {
            client_id: client.id,
            page: 0,
            page_size: 2,
        })
        .await;
    assert!(matches!(result, Err(Error::InvalidPage(0))));
}
