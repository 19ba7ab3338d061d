use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::apartment::ApartmentListing;
use crate::errors::ComposeError;

/// Upper bound on adults plus children for a single booking.
pub const MAX_GUESTS: u32 = 50;
/// Longest stay a single request may cover.
pub const MAX_STAY_NIGHTS: u32 = 365;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Reservation,
    Inquiry,
    VirtualTour,
    Support,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Reservation => "reservation",
            IntentKind::Inquiry => "inquiry",
            IntentKind::VirtualTour => "virtual_tour",
            IntentKind::Support => "support",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl UrgencyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "Faible",
            UrgencyLevel::Normal => "Normal",
            UrgencyLevel::High => "Élevée",
            UrgencyLevel::Urgent => "Urgent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDetails {
    check_in: NaiveDate,
    check_out: NaiveDate,
    adults: u32,
    children: u32,
    total_price: Option<u64>,
}

impl ReservationDetails {
    pub fn new(
        check_in: NaiveDate,
        check_out: NaiveDate,
        adults: u32,
        children: u32,
    ) -> Result<Self, ComposeError> {
        if check_out <= check_in {
            return Err(ComposeError::InvalidStay {
                check_in: check_in.to_string(),
                check_out: check_out.to_string(),
            });
        }
        if adults == 0 {
            return Err(ComposeError::NoAdults);
        }
        let nights = (check_out - check_in).num_days();
        if nights > i64::from(MAX_STAY_NIGHTS) {
            return Err(ComposeError::StayTooLong {
                nights,
                max: MAX_STAY_NIGHTS,
            });
        }
        let guests = u64::from(adults) + u64::from(children);
        if guests > u64::from(MAX_GUESTS) {
            return Err(ComposeError::TooManyGuests {
                guests,
                max: MAX_GUESTS,
            });
        }
        Ok(Self {
            check_in,
            check_out,
            adults,
            children,
            total_price: None,
        })
    }

    /// Overrides the computed quote with a price agreed elsewhere.
    pub fn with_total_price(mut self, total: u64) -> Self {
        self.total_price = Some(total);
        self
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn adults(&self) -> u32 {
        self.adults
    }

    pub fn children(&self) -> u32 {
        self.children
    }

    pub fn guests(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    pub fn total_price(&self) -> Option<u64> {
        self.total_price
    }

    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days() as u32
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryDetails {
    /// Nightly budget in FCFA.
    pub budget: Option<u64>,
    pub guests: Option<u32>,
    pub period: Option<String>,
    pub questions: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourDetails {
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportDetails {
    description: String,
    pub support_type: Option<String>,
    pub urgency: UrgencyLevel,
}

impl SupportDetails {
    pub fn new(description: impl Into<String>) -> Result<Self, ComposeError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ComposeError::MissingField {
                kind: IntentKind::Support.as_str(),
                field: "description",
            });
        }
        Ok(Self {
            description,
            support_type: None,
            urgency: UrgencyLevel::default(),
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// What the visitor wants to tell the agent. Each variant carries exactly the
/// data its message needs, so an incomplete intent cannot be built.
#[derive(Debug, Clone)]
pub enum BookingIntent<'a> {
    Reservation {
        apartment: &'a ApartmentListing,
        details: ReservationDetails,
    },
    Inquiry {
        apartment: Option<&'a ApartmentListing>,
        details: InquiryDetails,
    },
    VirtualTour {
        apartment: &'a ApartmentListing,
        details: TourDetails,
    },
    Support {
        apartment: Option<&'a ApartmentListing>,
        details: SupportDetails,
    },
}

impl BookingIntent<'_> {
    pub fn kind(&self) -> IntentKind {
        match self {
            BookingIntent::Reservation { .. } => IntentKind::Reservation,
            BookingIntent::Inquiry { .. } => IntentKind::Inquiry,
            BookingIntent::VirtualTour { .. } => IntentKind::VirtualTour,
            BookingIntent::Support { .. } => IntentKind::Support,
        }
    }
}

/// Loosely typed intent as posted by the front-end.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentRequest {
    pub kind: IntentKind,
    #[serde(default)]
    pub apartment_id: Option<String>,
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub adults: Option<u32>,
    #[serde(default)]
    pub children: Option<u32>,
    #[serde(default)]
    pub total_price: Option<u64>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub guests: Option<u32>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub questions: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<NaiveDate>,
    #[serde(default)]
    pub preferred_time: Option<NaiveTime>,
    #[serde(default)]
    pub support_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub urgency: Option<UrgencyLevel>,
}

impl IntentRequest {
    pub fn new(kind: IntentKind) -> Self {
        Self {
            kind,
            apartment_id: None,
            check_in: None,
            check_out: None,
            adults: None,
            children: None,
            total_price: None,
            budget: None,
            guests: None,
            period: None,
            questions: None,
            preferred_date: None,
            preferred_time: None,
            support_type: None,
            description: None,
            urgency: None,
        }
    }

    /// Looks up the referenced apartment and checks the fields required by
    /// `kind`.
    pub fn resolve<'a>(
        &self,
        catalog: &'a [ApartmentListing],
    ) -> Result<BookingIntent<'a>, ComposeError> {
        let kind = self.kind.as_str();
        let apartment = match self.apartment_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => Some(
                catalog
                    .iter()
                    .find(|a| a.id == id)
                    .ok_or_else(|| ComposeError::UnknownApartment(id.to_string()))?,
            ),
            None => None,
        };

        match self.kind {
            IntentKind::Reservation => {
                let apartment = apartment.ok_or(ComposeError::MissingApartment { kind })?;
                let check_in = self.check_in.ok_or(ComposeError::MissingField {
                    kind,
                    field: "check_in",
                })?;
                let check_out = self.check_out.ok_or(ComposeError::MissingField {
                    kind,
                    field: "check_out",
                })?;
                let adults = self.adults.ok_or(ComposeError::MissingField {
                    kind,
                    field: "adults",
                })?;
                let mut details = ReservationDetails::new(
                    check_in,
                    check_out,
                    adults,
                    self.children.unwrap_or(0),
                )?;
                if let Some(total) = self.total_price {
                    details = details.with_total_price(total);
                }
                Ok(BookingIntent::Reservation { apartment, details })
            }
            IntentKind::Inquiry => Ok(BookingIntent::Inquiry {
                apartment,
                details: InquiryDetails {
                    budget: self.budget,
                    guests: self.guests,
                    period: self.period.clone(),
                    questions: self.questions.clone(),
                },
            }),
            IntentKind::VirtualTour => {
                let apartment = apartment.ok_or(ComposeError::MissingApartment { kind })?;
                Ok(BookingIntent::VirtualTour {
                    apartment,
                    details: TourDetails {
                        preferred_date: self.preferred_date,
                        preferred_time: self.preferred_time,
                    },
                })
            }
            IntentKind::Support => {
                let mut details = SupportDetails::new(self.description.clone().unwrap_or_default())?;
                details.support_type = self.support_type.clone();
                details.urgency = self.urgency.unwrap_or_default();
                Ok(BookingIntent::Support { apartment, details })
            }
        }
    }
}
