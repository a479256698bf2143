use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::common::{FixedDepartureId, PackageId, Validate, ValidationErrors};
use crate::domains::fixed_departures::models::{
    CreateFixedDeparture, DepartureStatus, FixedDepartureWithPackage, UpdateFixedDeparture,
};

const MAX_SEATS: i32 = 10_000;

#[derive(Debug, Clone, Serialize)]
pub struct FixedDepartureData {
    pub id: FixedDepartureId,
    pub package_id: PackageId,
    pub package_slug: String,
    pub package_title: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub nights: Option<i64>,
    pub seats_total: i32,
    pub seats_available: i32,
    pub price: Option<Decimal>,
    pub currency: String,
    pub status: DepartureStatus,
}

impl From<FixedDepartureWithPackage> for FixedDepartureData {
    fn from(row: FixedDepartureWithPackage) -> Self {
        let departure = row.departure;
        Self {
            status: departure.status(),
            nights: departure
                .return_date
                .map(|ret| (ret - departure.departure_date).num_days()),
            id: departure.id,
            package_id: departure.package_id,
            package_slug: row.package_slug,
            package_title: row.package_title,
            departure_date: departure.departure_date,
            return_date: departure.return_date,
            seats_total: departure.seats_total,
            seats_available: departure.seats_available,
            price: departure.price,
            currency: departure.currency,
        }
    }
}

fn check_seats(errors: &mut ValidationErrors, total: Option<i32>, available: Option<i32>) {
    errors.check_range("seats_total", total, 1, MAX_SEATS);
    errors.check_range("seats_available", available, 0, MAX_SEATS);
    errors.check_order(
        "seats_available",
        available,
        total,
        "must not exceed seats_total",
    );
}

impl Validate for CreateFixedDeparture {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.package_id.is_none() {
            errors.add("package_id", "is required");
        }
        if self.departure_date.is_none() {
            errors.add("departure_date", "is required");
        }
        if self.seats_total.is_none() {
            errors.add("seats_total", "is required");
        }
        check_seats(&mut errors, self.seats_total, self.seats_available);
        errors.check_order(
            "return_date",
            self.departure_date,
            self.return_date,
            "must not be before departure_date",
        );
        errors.check_non_negative("price", self.price);
        errors.check_currency("currency", self.currency.as_deref());
        errors.into_result()
    }
}

impl Validate for UpdateFixedDeparture {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_seats(&mut errors, self.seats_total, self.seats_available);
        errors.check_order(
            "return_date",
            self.departure_date,
            self.return_date,
            "must not be before departure_date",
        );
        errors.check_non_negative("price", self.price);
        errors.check_currency("currency", self.currency.as_deref());
        errors.into_result()
    }
}
