use serde::Serialize;

use crate::models::ApartmentListing;

const WEEK: u64 = 7;
const MONTH: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StayQuote {
    pub nights: u32,
    pub guests: u32,
    pub base_price: u64,
    pub extra_guest_fees: u64,
    pub cleaning_fee: u64,
    pub subtotal: u64,
    pub total: u64,
    /// Reported separately, never part of `total`.
    pub deposit: u64,
    /// Discount against the plain nightly rate.
    pub savings: u64,
}

/// Tiered rate: whole months at the monthly rate, else whole weeks at the
/// weekly rate, with leftover nights at the daily rate. Guests above capacity
/// pay the extra-person fee per night.
///
/// Returns `None` when the listing has no pricing or an amount overflows.
pub fn quote_stay(listing: &ApartmentListing, nights: u32, guests: u32) -> Option<StayQuote> {
    let pricing = listing.pricing.as_ref()?;
    let n = u64::from(nights);

    let base_price = if n >= MONTH {
        tier(pricing.monthly, n / MONTH, pricing.daily, n % MONTH)?
    } else if n >= WEEK {
        tier(pricing.weekly, n / WEEK, pricing.daily, n % WEEK)?
    } else {
        pricing.daily.checked_mul(n)?
    };

    let capacity = listing.capacity.unwrap_or(guests);
    let extra_guests = u64::from(guests.saturating_sub(capacity));
    let extra_guest_fees = extra_guests
        .checked_mul(pricing.extra_person_fee)?
        .checked_mul(n)?;

    let subtotal = base_price.checked_add(extra_guest_fees)?;
    let total = subtotal.checked_add(pricing.cleaning_fee)?;
    let savings = if n >= WEEK {
        pricing.daily.checked_mul(n)?.saturating_sub(base_price)
    } else {
        0
    };

    Some(StayQuote {
        nights,
        guests,
        base_price,
        extra_guest_fees,
        cleaning_fee: pricing.cleaning_fee,
        subtotal,
        total,
        deposit: pricing.deposit,
        savings,
    })
}

fn tier(rate: u64, periods: u64, daily: u64, leftover: u64) -> Option<u64> {
    rate.checked_mul(periods)?
        .checked_add(daily.checked_mul(leftover)?)
}
