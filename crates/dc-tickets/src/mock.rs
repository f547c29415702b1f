//! In-memory ticket store for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use dc_protocol::{Priority, TicketFields, TicketRecord, TicketStats};

use crate::error::{TicketResult, TicketStoreError};
use crate::store::TicketStore;

/// Mock ticket store with sequential IT-NNNN numbering, owner tracking,
/// and a failure switch for exercising persistence error paths.
pub struct MockTicketStore {
    /// Stored rows as (owner email, record), in creation order.
    rows: Mutex<Vec<(String, TicketRecord)>>,
    /// Fields passed to `create_ticket` (for test assertions).
    created: Mutex<Vec<TicketFields>>,
    next_record_id: Mutex<i64>,
    /// When true, `create_ticket` fails with a scripted HTTP 500.
    fail_creates: Mutex<bool>,
}

impl MockTicketStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            next_record_id: Mutex::new(1),
            fail_creates: Mutex::new(false),
        }
    }

    /// Insert an existing record owned by `email`, bypassing create.
    pub fn seed(&self, email: impl Into<String>, record: TicketRecord) {
        let mut next = self.next_record_id.lock().unwrap();
        if record.record_id >= *next {
            *next = record.record_id + 1;
        }
        self.rows.lock().unwrap().push((email.into(), record));
    }

    /// Make subsequent `create_ticket` calls fail.
    pub fn set_fail_creates(&self, fail: bool) {
        *self.fail_creates.lock().unwrap() = fail;
    }

    /// Fields passed to `create_ticket` so far, including failed attempts.
    pub fn created(&self) -> Vec<TicketFields> {
        self.created.lock().unwrap().clone()
    }

    /// All stored records, in creation order.
    pub fn records(&self) -> Vec<TicketRecord> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }
}

impl Default for MockTicketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketStore for MockTicketStore {
    async fn create_ticket(&self, fields: &TicketFields) -> TicketResult<TicketRecord> {
        self.created.lock().unwrap().push(fields.clone());

        if *self.fail_creates.lock().unwrap() {
            return Err(TicketStoreError::Http {
                status: 500,
                message: "scripted create failure".into(),
            });
        }

        let record_id = {
            let mut next = self.next_record_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };

        let record = TicketRecord {
            ticket_number: format!("IT-{record_id:04}"),
            record_id,
            subject: fields.subject.clone(),
            status: fields.status,
            priority: fields.priority,
            category: fields.category.clone(),
            submitted: Some(Utc::now()),
            resolution: None,
            url: format!("https://mock.quickbase.local/db/tickets?a=dr&rid={record_id}"),
        };
        self.rows
            .lock()
            .unwrap()
            .push((fields.requester_email.clone(), record.clone()));
        Ok(record)
    }

    async fn get_ticket(&self, ticket_number: &str) -> TicketResult<Option<TicketRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(_, r)| r.ticket_number.eq_ignore_ascii_case(ticket_number))
            .map(|(_, r)| r.clone()))
    }

    async fn get_user_tickets(&self, email: &str) -> TicketResult<Vec<TicketRecord>> {
        let mut tickets: Vec<TicketRecord> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, r)| owner.eq_ignore_ascii_case(email) && r.status.is_open())
            .map(|(_, r)| r.clone())
            .collect();
        tickets.sort_by(|a, b| b.submitted.cmp(&a.submitted));
        Ok(tickets)
    }

    async fn get_statistics(&self) -> TicketResult<TicketStats> {
        let rows = self.rows.lock().unwrap();
        let today = Utc::now().date_naive();

        let mut by_priority: HashMap<Priority, u64> = HashMap::new();
        let mut total_open = 0u64;
        let mut total_resolved_today = 0u64;

        for (_, record) in rows.iter() {
            if record.status.is_open() {
                total_open += 1;
                *by_priority.entry(record.priority).or_insert(0) += 1;
            } else if record.status == dc_protocol::TicketStatus::Resolved
                && record.submitted.map(|s| s.date_naive()) == Some(today)
            {
                total_resolved_today += 1;
            }
        }

        Ok(TicketStats {
            total_open,
            total_resolved_today,
            by_priority,
        })
    }
}
