use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::service::Service;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    InStudio,
    Mobile,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::InStudio => "in-studio",
            ServiceType::Mobile => "mobile",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "in-studio" => Some(ServiceType::InStudio),
            "mobile" => Some(ServiceType::Mobile),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Confirmed" => Some(BookingStatus::Confirmed),
            "Completed" => Some(BookingStatus::Completed),
            "Cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentOption {
    Deposit,
    PayInPerson,
}

impl PaymentOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentOption::Deposit => "deposit",
            PaymentOption::PayInPerson => "pay-in-person",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "deposit" => Some(PaymentOption::Deposit),
            "pay-in-person" => Some(PaymentOption::PayInPerson),
            _ => None,
        }
    }
}

/// Screen-to-screen navigation parameters. Every field is optional so that a
/// half-filled or tampered link still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Query strings carry the price as text while JSON clients may send a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub service: &'static Service,
    pub service_type: ServiceType,
    pub date: NaiveDate,
    pub time: String,
    pub location: Option<String>,
    pub price: f64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl BookingDraft {
    pub fn to_params(&self) -> BookingParams {
        BookingParams {
            service_id: Some(self.service.id.to_string()),
            service_type: Some(self.service_type.as_str().to_string()),
            date: Some(self.date.format("%Y-%m-%d").to_string()),
            time: Some(self.time.clone()),
            price: Some(self.price.to_string()),
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            location: self.location.clone(),
        }
    }
}

/// A finalized booking before the store assigns it an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub service_id: String,
    pub service_name: String,
    pub service_type: ServiceType,
    pub date: NaiveDate,
    pub time: String,
    pub price: f64,
    pub deposit: f64,
    pub payment_option: PaymentOption,
    pub location: Option<String>,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub status: BookingStatus,
}

impl NewBooking {
    pub fn confirmed(draft: &BookingDraft, payment_option: PaymentOption, deposit: f64) -> Self {
        Self {
            service_id: draft.service.id.to_string(),
            service_name: draft.service.name.to_string(),
            service_type: draft.service_type,
            date: draft.date,
            time: draft.time.clone(),
            price: draft.price,
            deposit,
            payment_option,
            location: draft.location.clone(),
            client_name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            status: BookingStatus::Confirmed,
        }
    }

    pub fn into_booking(self, id: String, created_at: NaiveDateTime) -> Booking {
        Booking {
            id,
            service_id: self.service_id,
            service_name: self.service_name,
            service_type: self.service_type,
            date: self.date,
            time: self.time,
            price: self.price,
            deposit: self.deposit,
            payment_option: self.payment_option,
            location: self.location,
            client_name: self.client_name,
            email: self.email,
            phone: self.phone,
            status: self.status,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub service_id: String,
    pub service_name: String,
    pub service_type: ServiceType,
    pub date: NaiveDate,
    pub time: String,
    pub price: f64,
    pub deposit: f64,
    pub payment_option: PaymentOption,
    pub location: Option<String>,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}
