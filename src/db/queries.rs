use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Business, Call, EnterpriseInquiry, TranscriptTurn, Urgency};

// ── Businesses ──

const BUSINESS_COLUMNS: &str = "id, user_token, business_name, owner_name, industry, service_area, \
     services_offered, business_phone, twilio_number, notification_phone, notification_email, \
     plan_tier, stripe_customer_id, stripe_subscription_id, subscription_status";

fn parse_business_row(row: &rusqlite::Row) -> anyhow::Result<Business> {
    let services_json: String = row.get(6)?;
    let services_offered: Vec<String> = serde_json::from_str(&services_json).unwrap_or_default();

    Ok(Business {
        id: row.get(0)?,
        user_token: row.get(1)?,
        business_name: row.get(2)?,
        owner_name: row.get(3)?,
        industry: row.get(4)?,
        service_area: row.get(5)?,
        services_offered,
        business_phone: row.get(7)?,
        twilio_number: row.get(8)?,
        notification_phone: row.get(9)?,
        notification_email: row.get(10)?,
        plan_tier: row.get(11)?,
        stripe_customer_id: row.get(12)?,
        stripe_subscription_id: row.get(13)?,
        subscription_status: row.get(14)?,
    })
}

/// Resolve the business owning an AI agent number. Exact match only — an
/// unknown destination number means the webhook is rejected.
pub fn get_business_by_twilio_number(
    conn: &Connection,
    number: &str,
) -> anyhow::Result<Option<Business>> {
    let sql = format!("SELECT {BUSINESS_COLUMNS} FROM businesses WHERE twilio_number = ?1");
    let result = conn.query_row(&sql, params![number], |row| Ok(parse_business_row(row)));

    match result {
        Ok(business) => Ok(Some(business?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_business_by_token(conn: &Connection, token: &str) -> anyhow::Result<Option<Business>> {
    let sql = format!("SELECT {BUSINESS_COLUMNS} FROM businesses WHERE user_token = ?1");
    let result = conn.query_row(&sql, params![token], |row| Ok(parse_business_row(row)));

    match result {
        Ok(business) => Ok(Some(business?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_business(conn: &Connection, business: &Business) -> anyhow::Result<()> {
    let services_json = serde_json::to_string(&business.services_offered)?;

    conn.execute(
        "INSERT INTO businesses (id, user_token, business_name, owner_name, industry, service_area,
             services_offered, business_phone, twilio_number, notification_phone, notification_email,
             plan_tier, stripe_customer_id, stripe_subscription_id, subscription_status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
         ON CONFLICT(id) DO UPDATE SET
           user_token = excluded.user_token,
           business_name = excluded.business_name,
           owner_name = excluded.owner_name,
           industry = excluded.industry,
           service_area = excluded.service_area,
           services_offered = excluded.services_offered,
           business_phone = excluded.business_phone,
           twilio_number = excluded.twilio_number,
           notification_phone = excluded.notification_phone,
           notification_email = excluded.notification_email,
           plan_tier = excluded.plan_tier,
           stripe_customer_id = excluded.stripe_customer_id,
           stripe_subscription_id = excluded.stripe_subscription_id,
           subscription_status = excluded.subscription_status,
           updated_at = datetime('now')",
        params![
            business.id,
            business.user_token,
            business.business_name,
            business.owner_name,
            business.industry,
            business.service_area,
            services_json,
            business.business_phone,
            business.twilio_number,
            business.notification_phone,
            business.notification_email,
            business.plan_tier,
            business.stripe_customer_id,
            business.stripe_subscription_id,
            business.subscription_status,
        ],
    )?;
    Ok(())
}

pub fn set_twilio_number(conn: &Connection, business_id: &str, number: &str) -> anyhow::Result<()> {
    conn.execute(
        "UPDATE businesses SET twilio_number = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![number, business_id],
    )?;
    Ok(())
}

pub fn set_subscription_status(
    conn: &Connection,
    business_id: &str,
    status: &str,
) -> anyhow::Result<()> {
    conn.execute(
        "UPDATE businesses SET subscription_status = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![status, business_id],
    )?;
    Ok(())
}

// ── Calls ──

pub fn insert_call(conn: &Connection, call: &Call) -> anyhow::Result<()> {
    let transcript_json = serde_json::to_string(&call.call_transcript)?;
    let created_at = call.created_at.format("%Y-%m-%d %H:%M:%S").to_string();

    conn.execute(
        "INSERT INTO calls (id, business_id, customer_name, customer_phone, customer_address,
             service_needed, urgency, call_status, call_duration_seconds, call_transcript,
             call_recording_url, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            call.id,
            call.business_id,
            call.customer_name,
            call.customer_phone,
            call.customer_address,
            call.service_needed,
            call.urgency.as_str(),
            call.call_status,
            call.call_duration_seconds,
            transcript_json,
            call.call_recording_url,
            created_at,
        ],
    )?;
    Ok(())
}

pub fn get_calls_for_business(conn: &Connection, business_id: &str) -> anyhow::Result<Vec<Call>> {
    let mut stmt = conn.prepare(
        "SELECT id, business_id, customer_name, customer_phone, customer_address, service_needed,
                urgency, call_status, call_duration_seconds, call_transcript, call_recording_url,
                created_at
         FROM calls WHERE business_id = ?1 ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map(params![business_id], |row| Ok(parse_call_row(row)))?;

    let mut calls = vec![];
    for row in rows {
        calls.push(row??);
    }
    Ok(calls)
}

fn parse_call_row(row: &rusqlite::Row) -> anyhow::Result<Call> {
    let urgency_str: String = row.get(6)?;
    let transcript_json: String = row.get(9)?;
    let created_at_str: String = row.get(11)?;

    let call_transcript: Vec<TranscriptTurn> =
        serde_json::from_str(&transcript_json).unwrap_or_default();
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Call {
        id: row.get(0)?,
        business_id: row.get(1)?,
        customer_name: row.get(2)?,
        customer_phone: row.get(3)?,
        customer_address: row.get(4)?,
        service_needed: row.get(5)?,
        urgency: Urgency::parse(&urgency_str),
        call_status: row.get(7)?,
        call_duration_seconds: row.get(8)?,
        call_transcript,
        call_recording_url: row.get(10)?,
        created_at,
    })
}

// ── Enterprise inquiries ──

pub fn insert_enterprise_inquiry(
    conn: &Connection,
    id: &str,
    inquiry: &EnterpriseInquiry,
) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO enterprise_inquiries (id, first_name, last_name, email, phone, company_name,
             num_locations, estimated_calls, current_solution, message)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            id,
            inquiry.first_name,
            inquiry.last_name,
            inquiry.email,
            inquiry.phone,
            inquiry.company_name,
            inquiry.num_locations,
            inquiry.estimated_calls,
            inquiry.current_solution,
            inquiry.message,
        ],
    )?;
    Ok(())
}
