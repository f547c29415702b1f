//! QuickBase records REST client.
//!
//! Talks to the `/records` and `/records/query` endpoints of the QuickBase
//! JSON API. QuickBase addresses columns by numeric field ID, so the table
//! layout is pinned here as constants; records on the wire look like
//! `{"7": {"value": "subject text"}, ...}`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::Value;

use dc_protocol::{Priority, TicketFields, TicketRecord, TicketStats, TicketStatus};

use crate::config::QuickbaseConfig;
use crate::error::{TicketResult, TicketStoreError};
use crate::store::TicketStore;

// Field IDs in the tickets table.
const FIELD_RECORD_ID: u32 = 3;
const FIELD_TICKET_NUMBER: u32 = 6;
const FIELD_SUBJECT: u32 = 7;
const FIELD_DESCRIPTION: u32 = 8;
const FIELD_PRIORITY: u32 = 9;
const FIELD_CATEGORY: u32 = 10;
const FIELD_STATUS: u32 = 11;
const FIELD_REQUESTER_EMAIL: u32 = 12;
const FIELD_REQUESTER_NAME: u32 = 13;
const FIELD_SUBMITTED: u32 = 14;
const FIELD_RESOLUTION: u32 = 15;
const FIELD_RESOLVED_DATE: u32 = 16;

/// Fields requested back for any record we parse into a `TicketRecord`.
const SELECT_FIELDS: &[u32] = &[
    FIELD_RECORD_ID,
    FIELD_TICKET_NUMBER,
    FIELD_SUBJECT,
    FIELD_PRIORITY,
    FIELD_CATEGORY,
    FIELD_STATUS,
    FIELD_SUBMITTED,
    FIELD_RESOLUTION,
];

/// Ticket store backed by the QuickBase records API.
pub struct QuickbaseTicketStore {
    client: reqwest::Client,
    config: QuickbaseConfig,
}

impl QuickbaseTicketStore {
    pub fn new(config: QuickbaseConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build reqwest client");
        Self { client, config }
    }

    fn api_base(&self) -> &str {
        self.config.api_base.trim_end_matches('/')
    }

    /// UI deep link for a record, shown to users alongside the ticket number.
    fn record_url(&self, record_id: i64) -> String {
        format!(
            "https://{}/db/{}?a=dr&rid={}",
            self.config.realm, self.config.table_id, record_id
        )
    }

    /// Attach realm + token headers, send, and classify HTTP failures.
    async fn execute(&self, request: reqwest::RequestBuilder) -> TicketResult<reqwest::Response> {
        let response = request
            .header("QB-Realm-Hostname", &self.config.realm)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("QB-USER-TOKEN {}", self.config.user_token),
            )
            .send()
            .await
            .map_err(|e| TicketStoreError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TicketStoreError::Auth {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "quickbase returned error");
            return Err(TicketStoreError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Run a records query and return the raw rows.
    async fn query(&self, where_clause: &str, select: &[u32]) -> TicketResult<Vec<Value>> {
        let url = format!("{}/records/query", self.api_base());
        let body = serde_json::json!({
            "from": self.config.table_id,
            "select": select,
            "where": where_clause,
        });

        let response = self.execute(self.client.post(&url).json(&body)).await?;
        let payload: Value = response
            .json()
            .await
            .map_err(|e| TicketStoreError::Payload(e.to_string()))?;

        match payload.get("data").and_then(Value::as_array) {
            Some(rows) => Ok(rows.clone()),
            None => Err(TicketStoreError::Payload(
                "query response has no data array".into(),
            )),
        }
    }

    fn parse_record(&self, rec: &Value) -> TicketResult<TicketRecord> {
        let record_id = field_i64(rec, FIELD_RECORD_ID)
            .ok_or_else(|| TicketStoreError::Payload("record id missing".into()))?;
        let ticket_number = field_str(rec, FIELD_TICKET_NUMBER)
            .ok_or_else(|| TicketStoreError::Payload("ticket number missing".into()))?
            .to_string();

        // Unknown choice-field labels are logged, not fatal; admins add
        // statuses to the table without telling us.
        let status = match field_str(rec, FIELD_STATUS).and_then(TicketStatus::from_str) {
            Some(s) => s,
            None => {
                tracing::warn!(ticket = %ticket_number, "unrecognized ticket status, treating as New");
                TicketStatus::New
            }
        };
        let priority = match field_str(rec, FIELD_PRIORITY).and_then(Priority::from_str) {
            Some(p) => p,
            None => {
                tracing::warn!(ticket = %ticket_number, "unrecognized priority, treating as Medium");
                Priority::Medium
            }
        };

        let submitted = field_str(rec, FIELD_SUBMITTED)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(TicketRecord {
            ticket_number,
            record_id,
            subject: field_str(rec, FIELD_SUBJECT).unwrap_or_default().to_string(),
            status,
            priority,
            category: field_str(rec, FIELD_CATEGORY)
                .unwrap_or_default()
                .to_string(),
            submitted,
            resolution: field_str(rec, FIELD_RESOLUTION)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            url: self.record_url(record_id),
        })
    }
}

#[async_trait]
impl TicketStore for QuickbaseTicketStore {
    async fn create_ticket(&self, fields: &TicketFields) -> TicketResult<TicketRecord> {
        let url = format!("{}/records", self.api_base());

        let mut record = serde_json::Map::new();
        record.insert(fid(FIELD_SUBJECT), field_value(fields.subject.as_str()));
        record.insert(
            fid(FIELD_DESCRIPTION),
            field_value(fields.description.as_str()),
        );
        record.insert(fid(FIELD_PRIORITY), field_value(fields.priority.as_str()));
        record.insert(fid(FIELD_CATEGORY), field_value(fields.category.as_str()));
        record.insert(fid(FIELD_STATUS), field_value(fields.status.as_str()));
        record.insert(
            fid(FIELD_REQUESTER_EMAIL),
            field_value(fields.requester_email.as_str()),
        );
        record.insert(
            fid(FIELD_REQUESTER_NAME),
            field_value(fields.requester_name.as_str()),
        );

        // Ticket number is auto-generated by the table; request it back
        // rather than sending it.
        let body = serde_json::json!({
            "to": self.config.table_id,
            "data": [record],
            "fieldsToReturn": SELECT_FIELDS,
        });

        let response = self.execute(self.client.post(&url).json(&body)).await?;
        let payload: Value = response
            .json()
            .await
            .map_err(|e| TicketStoreError::Payload(e.to_string()))?;

        let rec = payload
            .get("data")
            .and_then(|d| d.get(0))
            .ok_or_else(|| TicketStoreError::Payload("create response has no data".into()))?;

        let record = self.parse_record(rec)?;
        tracing::info!(
            ticket = %record.ticket_number,
            priority = %record.priority,
            "ticket created"
        );
        Ok(record)
    }

    async fn get_ticket(&self, ticket_number: &str) -> TicketResult<Option<TicketRecord>> {
        // Query literals are single-quoted; strip quotes from user input.
        let clause = format!(
            "{{{}.EX.'{}'}}",
            FIELD_TICKET_NUMBER,
            ticket_number.replace('\'', "")
        );
        let rows = self.query(&clause, SELECT_FIELDS).await?;
        match rows.first() {
            Some(rec) => Ok(Some(self.parse_record(rec)?)),
            None => Ok(None),
        }
    }

    async fn get_user_tickets(&self, email: &str) -> TicketResult<Vec<TicketRecord>> {
        let clause = format!(
            "{{{}.EX.'{}'}}",
            FIELD_REQUESTER_EMAIL,
            email.replace('\'', "")
        );
        let rows = self.query(&clause, SELECT_FIELDS).await?;

        let mut tickets = Vec::with_capacity(rows.len());
        for rec in &rows {
            tickets.push(self.parse_record(rec)?);
        }
        tickets.retain(|t| t.status.is_open());
        tickets.sort_by(|a, b| b.submitted.cmp(&a.submitted));
        Ok(tickets)
    }

    async fn get_statistics(&self) -> TicketResult<TicketStats> {
        let open_clause = format!(
            "{{{f}.XEX.'Resolved'}}AND{{{f}.XEX.'Closed'}}",
            f = FIELD_STATUS
        );
        let open_rows = self
            .query(&open_clause, &[FIELD_RECORD_ID, FIELD_PRIORITY])
            .await?;

        let mut by_priority: HashMap<Priority, u64> = HashMap::new();
        for rec in &open_rows {
            if let Some(priority) = field_str(rec, FIELD_PRIORITY).and_then(Priority::from_str) {
                *by_priority.entry(priority).or_insert(0) += 1;
            }
        }

        let resolved_clause = format!(
            "{{{}.EX.'Resolved'}}AND{{{}.OAF.'today'}}",
            FIELD_STATUS, FIELD_RESOLVED_DATE
        );
        let resolved_rows = self.query(&resolved_clause, &[FIELD_RECORD_ID]).await?;

        Ok(TicketStats {
            total_open: open_rows.len() as u64,
            total_resolved_today: resolved_rows.len() as u64,
            by_priority,
        })
    }
}

fn fid(id: u32) -> String {
    id.to_string()
}

fn field_value(v: impl Into<Value>) -> Value {
    serde_json::json!({ "value": v.into() })
}

fn field<'a>(rec: &'a Value, id: u32) -> Option<&'a Value> {
    rec.get(id.to_string())?.get("value")
}

fn field_str(rec: &Value, id: u32) -> Option<&str> {
    field(rec, id)?.as_str()
}

fn field_i64(rec: &Value, id: u32) -> Option<i64> {
    field(rec, id)?.as_i64()
}
