//! # Report Catalog
//!
//! Priced vehicle-history report offers, one per car type.
//! Offers are loaded from `config/reports.toml`.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    EUR,
    GBP,
}

impl Currency {
    fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (cents for USD)
    pub amount: i64,
    /// Currency
    #[serde(default)]
    pub currency: Currency,
}

impl Price {
    /// Create a price from smallest unit (cents)
    pub fn from_cents(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Format for display (e.g., "$35.00")
    pub fn display(&self) -> String {
        format!(
            "{}{}.{:02}",
            self.currency.symbol(),
            self.amount / 100,
            self.amount % 100
        )
    }
}

/// Vehicle category a report is priced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarType {
    #[serde(rename = "hatchback")]
    Hatchback,
    #[serde(rename = "sedan")]
    Sedan,
    #[serde(rename = "4x4")]
    FourByFour,
}

impl std::str::FromStr for CarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hatchback" => Ok(CarType::Hatchback),
            "sedan" => Ok(CarType::Sedan),
            "4x4" | "suv" => Ok(CarType::FourByFour),
            other => Err(format!("Unknown car type: {}", other)),
        }
    }
}

/// One purchasable report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOffer {
    /// Car type this offer covers
    pub car_type: CarType,

    /// Display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Paddle price id handed to the checkout widget (`pri_...`)
    pub price_id: String,

    /// Price
    pub price: Price,

    /// Whether this offer is currently sold
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl ReportOffer {
    pub fn new(
        car_type: CarType,
        name: impl Into<String>,
        price_id: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            car_type,
            name: name.into(),
            description: String::new(),
            price_id: price_id.into(),
            price,
            active: true,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }
}

/// Report catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportCatalog {
    #[serde(default)]
    pub reports: Vec<ReportOffer>,
}

impl ReportCatalog {
    /// The offers the pricing page ships with
    pub fn default_catalog() -> Self {
        Self {
            reports: vec![
                ReportOffer::new(
                    CarType::Hatchback,
                    "Hatchback Report",
                    "pri_01k34bw78gwcmqk98s3jjda6k4",
                    Price::from_cents(3500, Currency::USD),
                )
                .with_description("Full vehicle history report for hatchbacks"),
                ReportOffer::new(
                    CarType::Sedan,
                    "Sedan Report",
                    "pri_01kcvwfzy6kffsgz4v9s3d8fx9",
                    Price::from_cents(6000, Currency::USD),
                )
                .with_description("Full vehicle history report for sedans"),
                ReportOffer::new(
                    CarType::FourByFour,
                    "4x4/SUV Report",
                    "pri_01kcvwnemp9042xv448gefr5ct",
                    Price::from_cents(9000, Currency::USD),
                )
                .with_description("Full vehicle history report for 4x4s and SUVs"),
            ],
        }
    }

    /// Find the offer for a car type
    pub fn get(&self, car_type: CarType) -> Option<&ReportOffer> {
        self.reports.iter().find(|r| r.car_type == car_type)
    }

    /// Get all active offers
    pub fn active_offers(&self) -> impl Iterator<Item = &ReportOffer> {
        self.reports.iter().filter(|r| r.active)
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(3500, Currency::USD).display(), "$35.00");
        assert_eq!(Price::from_cents(1999, Currency::EUR).display(), "€19.99");
    }

    #[test]
    fn test_car_type_parsing() {
        assert_eq!("hatchback".parse::<CarType>(), Ok(CarType::Hatchback));
        assert_eq!("SEDAN".parse::<CarType>(), Ok(CarType::Sedan));
        assert_eq!("4x4".parse::<CarType>(), Ok(CarType::FourByFour));
        assert!("truck".parse::<CarType>().is_err());
    }

    #[test]
    fn test_default_catalog() {
        let catalog = ReportCatalog::default_catalog();
        assert_eq!(catalog.active_offers().count(), 3);

        let sedan = catalog.get(CarType::Sedan).unwrap();
        assert_eq!(sedan.price_id, "pri_01kcvwfzy6kffsgz4v9s3d8fx9");
        assert_eq!(sedan.price.amount, 6000);
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
            [[reports]]
            carType = "4x4"
            name = "SUV Report"
            priceId = "pri_suv"
            price = { amount = 9000 }

            [[reports]]
            carType = "hatchback"
            name = "Hatchback Report"
            priceId = "pri_hatch"
            price = { amount = 3500, currency = "usd" }
            active = false
        "#;

        let catalog = ReportCatalog::from_toml(toml_str).unwrap();
        assert_eq!(catalog.reports.len(), 2);
        assert_eq!(catalog.active_offers().count(), 1);
        assert_eq!(catalog.get(CarType::FourByFour).unwrap().price.currency, Currency::USD);
    }
}
