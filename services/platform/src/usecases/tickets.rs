//! Ticket redemption and validation use cases

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};

use crate::email::EmailSender;
use crate::error::{Error, Result};
use crate::models::ticket::{NewTicket, Ticket};
use crate::models::user::UserRole;
use crate::repositories::{EventRepository, TicketRepository, UserRepository};
use crate::templates::TemplateEngine;
use crate::usecases::ensure_valid_page;

/// Alphabet for ticket codes; O, I, 0 and 1 are excluded as ambiguous.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LENGTH: usize = 6;

fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Redemption request
#[derive(Debug, Clone)]
pub struct RedeemTicketsInput {
    pub event_id: i64,
    pub client_id: i64,
    pub count: u32,
    pub send_email: bool,
}

/// Issue uniquely-coded tickets against an event's capacity
#[derive(Clone)]
pub struct RedeemTicketsUseCase {
    tickets: TicketRepository,
    events: EventRepository,
    users: UserRepository,
    mailer: Option<Arc<dyn EmailSender>>,
    templates: Option<TemplateEngine>,
}

impl RedeemTicketsUseCase {
    pub fn new(
        tickets: TicketRepository,
        events: EventRepository,
        users: UserRepository,
    ) -> Self {
        Self {
            tickets,
            events,
            users,
            mailer: None,
            templates: None,
        }
    }

    /// Opt in to best-effort email notifications
    pub fn with_mailer(
        mut self,
        mailer: Arc<dyn EmailSender>,
        templates: Option<TemplateEngine>,
    ) -> Self {
        self.mailer = Some(mailer);
        self.templates = templates;
        self
    }

    /// Redeem `count` tickets for a client
    ///
    /// The capacity check here gives a friendly early error; the repository
    /// re-checks it atomically inside the insert transaction, so a
    /// concurrent redemption can never oversubscribe the event.
    pub async fn execute(&self, input: RedeemTicketsInput) -> Result<Vec<Ticket>> {
        if input.count == 0 {
            return Err(Error::InvalidTicketQuantity(0));
        }

        let event = self
            .events
            .get_by_id(input.event_id)
            .await?
            .ok_or(Error::EventNotFound(input.event_id))?;

        if i64::from(input.count) > event.remaining_capacity() {
            return Err(Error::NoTicketsAvailable(event.name.clone()));
        }

        let codes = self.generate_unique_codes(input.count as usize).await?;
        let new_tickets = codes
            .iter()
            .map(|code| NewTicket::create(event.id, input.client_id, code))
            .collect::<Result<Vec<_>>>()?;

        let issued = self
            .tickets
            .redeem_batch(event.id, &new_tickets)
            .await?
            .ok_or_else(|| Error::NoTicketsAvailable(event.name.clone()))?;

        info!(
            "Client {} redeemed {} tickets for event {}",
            input.client_id,
            issued.len(),
            event.id
        );

        if input.send_email {
            // Notification is advisory; the issued tickets are the source
            // of truth, so a failure here never rolls back the redemption.
            if let Err(e) = self.send_codes_email(input.client_id, &issued).await {
                warn!("Failed to send redemption email: {}", e);
            }
        }

        Ok(issued)
    }

    /// Generate collision-free codes, bounded by an attempt budget
    async fn generate_unique_codes(&self, count: usize) -> Result<Vec<String>> {
        let mut codes: Vec<String> = Vec::with_capacity(count);
        let max_attempts = std::cmp::max(100, count * 20);
        let mut attempts = 0;

        while codes.len() < count && attempts < max_attempts {
            attempts += 1;
            let candidate = generate_code();
            if codes.contains(&candidate) {
                continue;
            }
            if self.tickets.code_exists(&candidate).await? {
                continue;
            }
            codes.push(candidate);
        }

        if codes.len() < count {
            return Err(Error::TicketCodeAlreadyExists);
        }

        Ok(codes)
    }

    async fn send_codes_email(&self, client_id: i64, tickets: &[Ticket]) -> Result<()> {
        let Some(mailer) = &self.mailer else {
            return Ok(());
        };

        let Some(user) = self.users.find_by_id(client_id).await? else {
            return Ok(());
        };

        let codes_html = tickets
            .iter()
            .map(|t| t.code.as_str())
            .collect::<Vec<_>>()
            .join("<br>");

        let body = match &self.templates {
            Some(engine) => engine.render(
                "redeem_ticket.html",
                &[("user_name", &user.name), ("ticket_codes", &codes_html)],
            )?,
            None => format!(
                "<p>Hello {},</p><p>Your ticket codes:</p><p>{}</p>",
                user.name, codes_html
            ),
        };

        mailer.send(&user.email, "Your ticket(s) were redeemed", &body)
    }
}

/// Validation request; the code is as typed at the door
#[derive(Debug, Clone)]
pub struct ValidateTicketInput {
    pub user_id: i64,
    pub user_role: UserRole,
    pub code: String,
}

/// Mark a ticket as used, enforcing caller identity and the event window
#[derive(Clone)]
pub struct ValidateTicketUseCase {
    tickets: TicketRepository,
    events: EventRepository,
}

impl ValidateTicketUseCase {
    pub fn new(tickets: TicketRepository, events: EventRepository) -> Self {
        Self { tickets, events }
    }

    pub async fn execute(&self, input: ValidateTicketInput) -> Result<Ticket> {
        let code = input.code.trim().to_uppercase();

        // Clients can never validate, not even their own tickets.
        if input.user_role == UserRole::Client {
            return Err(Error::UnauthorizedValidation {
                user_id: input.user_id,
                user_role: input.user_role,
                code,
            });
        }

        let ticket = self
            .tickets
            .get_by_code(&code)
            .await?
            .ok_or_else(|| Error::TicketNotFound(code.clone()))?;

        let event = self
            .events
            .get_by_id(ticket.event_id)
            .await?
            .ok_or(Error::TicketEventNotFound(ticket.event_id))?;

        if !event.is_running_at(Utc::now()) {
            return Err(Error::TicketValidationTime {
                start: event.start_date,
                end: event.end_date,
                event_id: event.id,
            });
        }

        let authorized = match input.user_role {
            UserRole::Organizer => event.organizer_id == input.user_id,
            UserRole::Staff => event.staff_ids.contains(&input.user_id),
            UserRole::Client => false,
        };
        if !authorized {
            return Err(Error::UnauthorizedValidation {
                user_id: input.user_id,
                user_role: input.user_role,
                code,
            });
        }

        let validated = ticket.validate()?;
        self.tickets.update(&validated).await?;

        info!(
            "Ticket {} validated by user {} ({})",
            validated.code, input.user_id, input.user_role
        );

        Ok(validated)
    }
}

/// Listing request for a client's own tickets
#[derive(Debug, Clone)]
pub struct ListClientTicketsInput {
    pub client_id: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Paginated listing of a client's tickets
#[derive(Clone)]
pub struct ListClientTicketsUseCase {
    tickets: TicketRepository,
}

impl ListClientTicketsUseCase {
    pub fn new(tickets: TicketRepository) -> Self {
        Self { tickets }
    }

    pub async fn execute(&self, input: ListClientTicketsInput) -> Result<(Vec<Ticket>, i64)> {
        ensure_valid_page(input.page, input.page_size)?;
        self.tickets
            .list_by_client(input.client_id, input.page, input.page_size)
            .await
    }
}
