//! The normalized message record.

use super::{AttachmentBody, HeaderMap, PartBody, Recipient};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One ingested email, immutable once assembled. `received` always has a
/// value: the Date header when decodable, ingestion time otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailRecord {
  pub headers: HeaderMap,
  #[serde(
    rename = "datetime",
    serialize_with = "ser_received",
    deserialize_with = "de_received"
  )]
  pub received: NaiveDateTime,
  pub subject: String,
  pub to: Vec<Recipient>,
  #[serde(rename = "reply-to")]
  pub reply_to: Vec<Recipient>,
  pub from: Vec<Recipient>,
  pub cc: Vec<Recipient>,
  pub attachments: Vec<AttachmentBody>,
  pub parts: Vec<PartBody>,
  pub encoding: String,
}

const RECEIVED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn ser_received<S: Serializer>(t: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_str(&t.format(RECEIVED_FORMAT).to_string())
}

fn de_received<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
  let raw = String::deserialize(d)?;
  NaiveDateTime::parse_from_str(&raw, RECEIVED_FORMAT).map_err(serde::de::Error::custom)
}
