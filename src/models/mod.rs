pub mod apartment;
pub mod criteria;
pub mod intent;
pub mod schedule;

pub use apartment::{
    Amenity, ApartmentListing, ApartmentType, AvailabilityStatus, Coordinates,
    ListingAvailability, Pricing, Quarter, Rating, Video,
};
pub use criteria::{FilterCriteria, FilterOptions, FilterQuery, PriceRange, SortOrder};
pub use intent::{
    BookingIntent, InquiryDetails, IntentKind, IntentRequest, ReservationDetails, SupportDetails,
    TourDetails, UrgencyLevel, MAX_GUESTS, MAX_STAY_NIGHTS,
};
pub use schedule::{business_status, is_business_open, BusinessStatus, DayHours, WeeklyHours};
