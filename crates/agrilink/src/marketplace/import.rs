use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{Category, DeliveryOptions, ListingDraft, SellerSummary, Specifications};

/// Parses a listing export (one row per offer) into drafts ready for the
/// marketplace service. Used to bulk-seed a server from spreadsheet data.
pub struct ListingCsvImporter;

impl ListingCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ListingDraft>, ListingImportError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        Self::collect(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ListingDraft>, ListingImportError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::collect(reader)
    }

    fn collect<R: Read>(
        mut reader: csv::Reader<R>,
    ) -> Result<Vec<ListingDraft>, ListingImportError> {
        let mut drafts = Vec::new();

        for record in reader.deserialize::<ListingRow>() {
            let row = record?;
            drafts.push(row.into_draft());
        }

        if drafts.is_empty() {
            return Err(ListingImportError::Empty);
        }

        Ok(drafts)
    }
}

/// Error raised while reading a listing export.
#[derive(Debug, thiserror::Error)]
pub enum ListingImportError {
    #[error("failed to read listing export: {0}")]
    Csv(#[from] csv::Error),
    #[error("listing export contains no rows")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Farmer ID")]
    farmer_id: String,
    #[serde(rename = "Type of Good")]
    type_of_good: String,
    #[serde(rename = "Condition")]
    condition: String,
    #[serde(rename = "Quantity")]
    quantity: f64,
    #[serde(rename = "Unit")]
    unit: String,
    #[serde(rename = "Quality")]
    quality: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Price Per Unit")]
    price_per_unit: u32,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(
        rename = "Description",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    description: Option<String>,
    #[serde(rename = "Origin", default, deserialize_with = "empty_string_as_none")]
    origin: Option<String>,
    #[serde(
        rename = "Seller Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    seller_name: Option<String>,
}

impl ListingRow {
    fn into_draft(self) -> ListingDraft {
        let category = self
            .category
            .as_deref()
            .map(parse_category)
            .unwrap_or(Category::Other);

        ListingDraft {
            seller: SellerSummary {
                name: self
                    .seller_name
                    .unwrap_or_else(|| self.farmer_id.clone()),
                rating: 0.0,
                total_sales: 0,
            },
            farmer_id: self.farmer_id,
            type_of_good: self.type_of_good,
            condition: self.condition,
            quantity: self.quantity,
            unit: self.unit,
            quality: self.quality,
            location: self.location,
            description: self.description.unwrap_or_default(),
            photos: Vec::new(),
            price_per_unit: self.price_per_unit,
            delivery_options: DeliveryOptions {
                available: false,
                estimated_cost: None,
                estimated_time: None,
            },
            category,
            specifications: Specifications {
                origin: self.origin.unwrap_or_default(),
                ..Specifications::default()
            },
        }
    }
}

fn parse_category(value: &str) -> Category {
    match value.trim().to_ascii_lowercase().as_str() {
        "fruits" | "fruit" => Category::Fruits,
        "vegetables" | "vegetable" => Category::Vegetables,
        "grains" | "grain" => Category::Grains,
        "dairy" => Category::Dairy,
        "meat" => Category::Meat,
        _ => Category::Other,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
