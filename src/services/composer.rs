use std::fmt::Write;

use crate::models::{
    ApartmentListing, BookingIntent, InquiryDetails, ReservationDetails, SupportDetails,
    TourDetails,
};
use crate::services::formatting::{format_capacity, format_long_date, format_price};
use crate::services::pricing::quote_stay;

pub const DEFAULT_BUSINESS_NAME: &str = "Douala Luxury Stays";

const NOT_AVAILABLE: &str = "N/A";
const TO_CONFIRM: &str = "À confirmer";
const FLEXIBLE: &str = "Flexible";
const GENERAL_INQUIRY: &str = "Demande générale";
const DEFAULT_PERIOD: &str = "À définir";
const DEFAULT_QUESTIONS: &str = "Informations générales sur l'appartement";
const DEFAULT_SUPPORT_TYPE: &str = "Général";

/// Renders booking intents as plain-text WhatsApp messages for the agent.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    business_name: String,
    hashtag: String,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self::new(DEFAULT_BUSINESS_NAME)
    }
}

impl MessageComposer {
    pub fn new(business_name: &str) -> Self {
        let hashtag = business_name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        Self {
            business_name: business_name.to_string(),
            hashtag,
        }
    }

    pub fn compose(&self, intent: &BookingIntent<'_>) -> String {
        match intent {
            BookingIntent::Reservation { apartment, details } => {
                self.reservation(apartment, details)
            }
            BookingIntent::Inquiry { apartment, details } => self.inquiry(*apartment, details),
            BookingIntent::VirtualTour { apartment, details } => {
                self.virtual_tour(apartment, details)
            }
            BookingIntent::Support { apartment, details } => self.support(*apartment, details),
        }
    }

    fn subject(&self, title: &str) -> String {
        format!("{title} - {}", self.business_name.to_uppercase())
    }

    fn tags(&self, topic: &str) -> String {
        if self.hashtag.is_empty() {
            format!("#{topic}")
        } else {
            format!("#{} #{topic}", self.hashtag)
        }
    }

    fn reservation(&self, apt: &ApartmentListing, stay: &ReservationDetails) -> String {
        let nights = stay.nights();
        let total = stay
            .total_price()
            .or_else(|| quote_stay(apt, nights, stay.guests()).map(|q| q.total))
            .map(format_price)
            .unwrap_or_else(|| TO_CONFIRM.to_string());
        let children = if stay.children() > 0 {
            format!(", {} enfant(s)", stay.children())
        } else {
            String::new()
        };

        let mut msg = String::new();
        let _ = writeln!(msg, "🏠 {}", self.subject("DEMANDE DE RÉSERVATION"));
        msg.push('\n');
        msg.push_str("📋 Détails de la réservation:\n");
        let _ = writeln!(msg, "• Appartement: {}", apt.title);
        let _ = writeln!(msg, "• Type: {}", type_name(apt));
        let _ = writeln!(msg, "• Quartier: {}", quarter_name(apt));
        if let Some(capacity) = apt.capacity {
            let _ = writeln!(msg, "• Capacité: {}", format_capacity(capacity));
        }
        let _ = writeln!(
            msg,
            "• Dates: {} → {}",
            format_long_date(stay.check_in()),
            format_long_date(stay.check_out())
        );
        let _ = writeln!(msg, "• Durée: {nights} nuit(s)");
        let _ = writeln!(msg, "• Personnes: {} adulte(s){children}", stay.adults());
        let _ = writeln!(msg, "• Prix estimé: {total}");
        msg.push('\n');
        msg.push_str("👤 Informations contact:\n");
        msg.push_str("• Nom: [À compléter]\n");
        msg.push_str("• Email: [À compléter]\n");
        msg.push_str("• Téléphone: [À compléter]\n");
        msg.push('\n');
        msg.push_str(
            "💬 Bonjour, je souhaite réserver cet appartement pour les dates mentionnées. \
             Merci de me confirmer la disponibilité et les modalités de paiement.\n",
        );
        msg.push('\n');
        msg.push_str(&self.tags("Reservation"));
        msg
    }

    fn inquiry(&self, apt: Option<&ApartmentListing>, details: &InquiryDetails) -> String {
        let name = apt.map(|a| a.title.as_str()).unwrap_or(GENERAL_INQUIRY);
        let quarter = apt.map(quarter_name).unwrap_or(NOT_AVAILABLE);
        let budget = details
            .budget
            .map(|b| format!("{}/nuit", format_price(b)))
            .unwrap_or_else(|| FLEXIBLE.to_string());
        let guests = details.guests.unwrap_or(1);
        let period = non_blank(details.period.as_deref()).unwrap_or(DEFAULT_PERIOD);
        let questions = non_blank(details.questions.as_deref()).unwrap_or(DEFAULT_QUESTIONS);

        let mut msg = String::new();
        let _ = writeln!(msg, "❓ {}", self.subject("DEMANDE D'INFORMATION"));
        msg.push('\n');
        let _ = writeln!(msg, "🏠 Appartement d'intérêt: {name}");
        let _ = writeln!(msg, "📍 Quartier: {quarter}");
        let _ = writeln!(msg, "💰 Budget estimé: {budget}");
        let _ = writeln!(msg, "👥 Nombre de personnes: {guests}");
        let _ = writeln!(msg, "📅 Période souhaitée: {period}");
        msg.push('\n');
        msg.push_str("❓ Questions spécifiques:\n");
        let _ = writeln!(msg, "{questions}");
        msg.push('\n');
        msg.push_str("Merci de me fournir plus d'informations.\n");
        msg.push('\n');
        msg.push_str(&self.tags("Information"));
        msg
    }

    fn virtual_tour(&self, apt: &ApartmentListing, details: &TourDetails) -> String {
        let date = details
            .preferred_date
            .map(format_long_date)
            .unwrap_or_else(|| FLEXIBLE.to_string());
        let time = details
            .preferred_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| FLEXIBLE.to_string());

        let mut msg = String::new();
        let _ = writeln!(msg, "📹 {}", self.subject("DEMANDE DE VISITE VIRTUELLE"));
        msg.push('\n');
        let _ = writeln!(msg, "🏠 Appartement: {}", apt.title);
        let _ = writeln!(msg, "📍 Quartier: {}", quarter_name(apt));
        let _ = writeln!(msg, "📅 Date souhaitée: {date}");
        let _ = writeln!(msg, "⏰ Heure préférée: {time}");
        msg.push('\n');
        msg.push_str(
            "💬 Je souhaiterais faire une visite virtuelle de cet appartement \
             via WhatsApp Video ou Zoom.\n",
        );
        msg.push('\n');
        msg.push_str("Merci de me proposer un créneau.\n");
        msg.push('\n');
        msg.push_str(&self.tags("VisiteVirtuelle"));
        msg
    }

    fn support(&self, apt: Option<&ApartmentListing>, details: &SupportDetails) -> String {
        let name = apt.map(|a| a.title.as_str()).unwrap_or(NOT_AVAILABLE);
        let support_type =
            non_blank(details.support_type.as_deref()).unwrap_or(DEFAULT_SUPPORT_TYPE);

        let mut msg = String::new();
        let _ = writeln!(msg, "🆘 {}", self.subject("DEMANDE D'ASSISTANCE"));
        msg.push('\n');
        let _ = writeln!(msg, "📞 Type d'assistance: {support_type}");
        let _ = writeln!(msg, "🏠 Appartement concerné: {name}");
        msg.push_str("📋 Description du problème:\n");
        let _ = writeln!(msg, "{}", details.description().trim());
        msg.push('\n');
        let _ = writeln!(msg, "⚡ Urgence: {}", details.urgency.label());
        msg.push('\n');
        msg.push_str("Merci de votre aide rapide.\n");
        msg.push('\n');
        msg.push_str(&self.tags("Support"));
        msg
    }
}

/// Composes with the default business name.
pub fn compose_message(intent: &BookingIntent<'_>) -> String {
    MessageComposer::default().compose(intent)
}

fn type_name(apt: &ApartmentListing) -> &'static str {
    apt.apartment_type.map(|t| t.name()).unwrap_or(NOT_AVAILABLE)
}

fn quarter_name(apt: &ApartmentListing) -> &str {
    apt.quarter_name().unwrap_or(NOT_AVAILABLE)
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
